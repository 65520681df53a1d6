#![allow(dead_code)]

// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::{Arc, LazyLock};

use airnavigation::{
    AsyncNestedRouter, InFlightTracker, NestedRouter, RootNavigator, RouteDescriptor,
};
use anyhow::{Result, bail};
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

static TRACING: LazyLock<()> = LazyLock::new(|| {
    // To see the diagnostics of a test run: `TEST_LOG=true cargo test`
    if std::env::var("TEST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .with_test_writer()
            .try_init();
    }
});

pub fn init_test_tracing() {
    LazyLock::force(&TRACING);
}

pub fn route(name: &str) -> RouteDescriptor {
    RouteDescriptor::named(name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    PopUntil,
    Replace(Vec<RouteDescriptor>),
}

/// Root navigator that records every stack operation
///
/// Every operation yields to the scheduler once before it takes effect, so
/// concurrently started navigations interleave.
#[derive(Default)]
pub struct FakeNavigator {
    state: Mutex<FakeState>,
    tracker: Option<Arc<InFlightTracker>>,
}

#[derive(Default)]
struct FakeState {
    stack: Vec<RouteDescriptor>,
    calls: Vec<Call>,
    fail_pop: bool,
    fail_replace: bool,
    observed_in_flight: Vec<usize>,
}

impl FakeNavigator {
    pub fn with_stack(stack: Vec<RouteDescriptor>) -> Self {
        let navigator = Self::default();
        navigator.state.lock().stack = stack;
        navigator
    }

    /// Records the in-flight count of "Home" whenever a pop starts.
    pub fn observing(mut self, tracker: Arc<InFlightTracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn failing_pop(self) -> Self {
        self.state.lock().fail_pop = true;
        self
    }

    pub fn failing_replace(self) -> Self {
        self.state.lock().fail_replace = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn current_stack(&self) -> Vec<RouteDescriptor> {
        self.state.lock().stack.clone()
    }

    pub fn observed_in_flight(&self) -> Vec<usize> {
        self.state.lock().observed_in_flight.clone()
    }
}

impl RootNavigator for FakeNavigator {
    fn stack(&self) -> Vec<RouteDescriptor> {
        self.state.lock().stack.clone()
    }

    async fn pop_until<P>(&self, predicate: P) -> Result<()>
    where
        P: Fn(&RouteDescriptor) -> bool + Send + Sync + 'static,
    {
        {
            let mut state = self.state.lock();
            state.calls.push(Call::PopUntil);
            if let Some(tracker) = &self.tracker {
                let count = tracker.count("Home");
                state.observed_in_flight.push(count);
            }
        }
        tokio::task::yield_now().await;

        let mut state = self.state.lock();
        if state.fail_pop {
            bail!("navigator is locked");
        }
        let Some(position) = state.stack.iter().rposition(&predicate) else {
            bail!("no route to pop back to");
        };
        state.stack.truncate(position + 1);
        Ok(())
    }

    async fn replace_all(&self, routes: Vec<RouteDescriptor>) -> Result<()> {
        self.state.lock().calls.push(Call::Replace(routes.clone()));
        tokio::task::yield_now().await;

        let mut state = self.state.lock();
        if state.fail_replace {
            bail!("navigator is disposed");
        }
        state.stack = routes;
        Ok(())
    }
}

/// Nested router that records the names of the opened routes
#[derive(Default, Clone)]
pub struct RecordingRouter {
    pub opened: Arc<Mutex<Vec<String>>>,
}

impl NestedRouter for RecordingRouter {
    fn navigate(&self, route: RouteDescriptor) -> Result<()> {
        self.opened.lock().push(route.name);
        Ok(())
    }
}

/// Nested router with asynchronous pushes that records the pushed routes
#[derive(Default, Clone)]
pub struct AsyncRecordingRouter {
    pub pushed: Arc<Mutex<Vec<String>>>,
    notify: Arc<tokio::sync::Notify>,
}

impl AsyncRecordingRouter {
    /// Waits until `count` routes were pushed.
    pub async fn wait_for(&self, count: usize) {
        loop {
            let notified = self.notify.notified();
            if self.pushed.lock().len() >= count {
                return;
            }
            notified.await;
        }
    }
}

impl AsyncNestedRouter for AsyncRecordingRouter {
    async fn push(&self, route: RouteDescriptor) -> Result<()> {
        tokio::task::yield_now().await;
        self.pushed.lock().push(route.name);
        self.notify.notify_waiters();
        Ok(())
    }
}
