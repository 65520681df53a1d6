// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use flutter_rust_bridge::frb;

/// Installs the logger of the navigation library.
///
/// Returns `false` if a logger was already installed.
#[frb(sync)]
pub fn init_navigation_logger() -> bool {
    crate::logging::init_logger()
}
