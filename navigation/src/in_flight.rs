// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    collections::HashMap,
    sync::{Arc, OnceLock},
};

use parking_lot::Mutex;
use tracing::warn;

static GLOBAL_TRACKER: OnceLock<Arc<InFlightTracker>> = OnceLock::new();

/// Counts imperative singleton navigations that are currently suspended,
/// per route name.
///
/// Only used to detect overlapping navigations. It never blocks or cancels
/// any of them.
#[derive(Debug, Default)]
pub struct InFlightTracker {
    counts: Mutex<HashMap<String, usize>>,
}

impl InFlightTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global() -> Arc<Self> {
        GLOBAL_TRACKER.get_or_init(Default::default).clone()
    }

    /// Marks a navigation to `route_name` as in flight until the returned
    /// guard is dropped.
    pub fn enter(self: &Arc<Self>, route_name: &str) -> InFlight {
        let previous = {
            let mut counts = self.counts.lock();
            let count = counts.entry(route_name.to_owned()).or_default();
            *count += 1;
            *count - 1
        };
        if previous > 0 {
            warn!(
                route = %route_name,
                in_flight = previous,
                "singleton navigation started while another one is still in flight"
            );
        }
        InFlight {
            tracker: self.clone(),
            route_name: route_name.to_owned(),
        }
    }

    pub fn count(&self, route_name: &str) -> usize {
        self.counts.lock().get(route_name).copied().unwrap_or(0)
    }

    pub fn is_in_flight(&self, route_name: &str) -> bool {
        self.count(route_name) > 0
    }

    fn leave(&self, route_name: &str) {
        let mut counts = self.counts.lock();
        if let Some(count) = counts.get_mut(route_name) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                counts.remove(route_name);
            }
        }
    }
}

/// Guard of an in-flight navigation, see [`InFlightTracker::enter`]
#[derive(Debug)]
pub struct InFlight {
    tracker: Arc<InFlightTracker>,
    route_name: String,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.tracker.leave(&self.route_name);
    }
}
