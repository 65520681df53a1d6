// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Declarative interception of navigation to singleton routes

use std::{future::Future, sync::Arc};

use tracing::{debug, warn};

use crate::{
    config::NavigationConfig,
    forwarder::ForwarderRegistry,
    navigator::RootNavigator,
    route::{RouteDescriptor, by_name, find_match},
};

/// Outcome of a navigation attempt evaluated by a [`NavigationGuard`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Let the navigation framework commit the route.
    Allow,
    /// The route was not committed. Instead, the stack was popped back to an
    /// existing instance.
    Deny(Redirect),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Redirect performed instead of a denied navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// The mounted instance that is now on top of the stack.
    pub existing: RouteDescriptor,
    /// Number of nested routes handed to the existing instance.
    pub forwarded: usize,
}

/// Evaluated by the navigation framework before a route is committed.
pub trait NavigationGuard: Send + Sync {
    fn on_navigation_attempt(
        &self,
        pending: &RouteDescriptor,
        stack: &[RouteDescriptor],
    ) -> impl Future<Output = Decision> + Send;
}

/// Keeps singleton routes from being mounted twice.
///
/// When a singleton route is already mounted, navigation to it is denied,
/// the stack is popped back to the mounted instance and the nested routes of
/// the request are forwarded to it.
pub struct SingletonGuard<N> {
    navigator: N,
    config: NavigationConfig,
    forwarders: Arc<ForwarderRegistry>,
}

impl<N: RootNavigator> SingletonGuard<N> {
    pub fn new(navigator: N, config: NavigationConfig) -> Self {
        Self::with_registry(navigator, config, ForwarderRegistry::global())
    }

    pub fn with_registry(
        navigator: N,
        config: NavigationConfig,
        forwarders: Arc<ForwarderRegistry>,
    ) -> Self {
        Self {
            navigator,
            config,
            forwarders,
        }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    async fn evaluate(&self, pending: &RouteDescriptor, stack: &[RouteDescriptor]) -> Decision {
        if !self.config.is_singleton(&pending.name) {
            return Decision::Allow;
        }

        let Some(existing) = find_match(stack, by_name(&pending.name)).cloned() else {
            return Decision::Allow;
        };

        let target = existing.clone();
        if let Err(error) = self
            .navigator
            .pop_until(move |route| *route == target)
            .await
        {
            // The stack is in an unknown state: let the requested navigation
            // through and skip forwarding.
            warn!(
                route = %pending.name,
                %error,
                "failed to pop back to existing singleton route; allowing navigation"
            );
            return Decision::Allow;
        }

        let forwarded = pending.children.len();
        if forwarded > 0 {
            self.forwarders
                .get(&pending.name)
                .forward(pending.children.clone());
        }
        debug!(route = %pending.name, forwarded, "redirected to existing singleton route");

        Decision::Deny(Redirect {
            existing,
            forwarded,
        })
    }
}

impl<N: RootNavigator> NavigationGuard for SingletonGuard<N> {
    fn on_navigation_attempt(
        &self,
        pending: &RouteDescriptor,
        stack: &[RouteDescriptor],
    ) -> impl Future<Output = Decision> + Send {
        self.evaluate(pending, stack)
    }
}
