// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Imperative navigation to singleton routes

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use crate::{
    forwarder::ForwarderRegistry,
    in_flight::InFlightTracker,
    navigator::RootNavigator,
    route::{RouteDescriptor, by_name, find_match},
};

/// Navigates to singleton routes without going through a
/// [`crate::guard::SingletonGuard`].
///
/// If the target is already mounted, the stack is popped back to it and the
/// nested routes of the target are forwarded to the mounted instance.
/// Otherwise the stack is replaced by the target.
pub struct SingletonNavigator<N> {
    navigator: N,
    forwarders: Arc<ForwarderRegistry>,
    in_flight: Arc<InFlightTracker>,
}

impl<N: RootNavigator> SingletonNavigator<N> {
    pub fn new(navigator: N) -> Self {
        Self::with_state(
            navigator,
            ForwarderRegistry::global(),
            InFlightTracker::global(),
        )
    }

    pub fn with_state(
        navigator: N,
        forwarders: Arc<ForwarderRegistry>,
        in_flight: Arc<InFlightTracker>,
    ) -> Self {
        Self {
            navigator,
            forwarders,
            in_flight,
        }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn in_flight(&self) -> &InFlightTracker {
        &self.in_flight
    }

    /// Navigates to `target`, reusing a mounted route with the same name.
    pub async fn navigate_to_singleton(&self, target: RouteDescriptor) -> Result<()> {
        let name = target.name.clone();
        self.navigate_to_singleton_where(target, move |route| route.name == name)
            .await
    }

    /// Navigates to `target`, reusing the first mounted route accepted by
    /// `matcher`.
    ///
    /// Only fails if nothing is mounted that matches and replacing the stack
    /// fails.
    pub async fn navigate_to_singleton_where<M>(
        &self,
        target: RouteDescriptor,
        matcher: M,
    ) -> Result<()>
    where
        M: Fn(&RouteDescriptor) -> bool + Send + Sync + 'static,
    {
        let _in_flight = self.in_flight.enter(&target.name);

        let stack = self.navigator.stack();
        let Some(existing) = find_match(&stack, &matcher).cloned() else {
            debug!(route = %target.name, "singleton route not mounted; replacing stack");
            return self.navigator.replace_all(vec![target]).await;
        };

        match self
            .navigator
            .pop_until(move |route| *route == existing)
            .await
        {
            Ok(()) => {
                if target.has_children() {
                    let forwarder = self.forwarders.get(&target.name);
                    forwarder.forward(target.into_children());
                }
                Ok(())
            }
            Err(error) => {
                warn!(
                    route = %target.name,
                    %error,
                    "failed to pop back to existing singleton route; replacing stack"
                );
                self.navigator.replace_all(vec![target]).await
            }
        }
    }

    /// Whether a route named `route_name` is mounted.
    pub fn singleton_exists(&self, route_name: &str) -> bool {
        find_match(&self.navigator.stack(), by_name(route_name)).is_some()
    }

    /// Whether a route with the same name as `target` is mounted.
    pub fn singleton_exists_for(&self, target: &RouteDescriptor) -> bool {
        self.singleton_exists(&target.name)
    }
}
