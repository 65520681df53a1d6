// SPDX-FileCopyrightText: 2024 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Once;

use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, registry};
use tracing_subscriber::{fmt, layer::SubscriberExt};

static INIT_LOGGER_ONCE: Once = Once::new();

/// Installs the global tracing subscriber.
///
/// Returns `true` if this call installed it.
pub(crate) fn init_logger() -> bool {
    let mut installed = false;
    INIT_LOGGER_ONCE.call_once(|| {
        installed = do_init_logger();
    });
    info!(installed, "init_logger");
    installed
}

fn do_init_logger() -> bool {
    let default_level = if cfg!(debug_assertions) {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    // Fails if the app already installed a subscriber, which then also
    // receives our events.
    registry()
        .with(env_filter)
        .with(fmt::Layer::new())
        .try_init()
        .is_ok()
}
