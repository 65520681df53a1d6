// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Interfaces of the host navigation framework

use std::{future::Future, sync::Arc};

use crate::route::RouteDescriptor;

/// The app's root navigation stack.
///
/// Implemented by the host framework, e.g. [`crate::api::navigation::DartNavigator`].
pub trait RootNavigator: Send + Sync {
    /// Currently mounted routes, bottom first.
    fn stack(&self) -> Vec<RouteDescriptor>;

    /// Pops routes until the top route satisfies `predicate`.
    ///
    /// Popping stops at the first route from the top that satisfies
    /// `predicate`. Callers pass a predicate comparing against the matched
    /// route by value, so if the same route is mounted twice with identical
    /// descriptors, the stack is popped to the topmost of them.
    ///
    /// Fails if no mounted route satisfies `predicate` or the framework
    /// rejects the pop.
    fn pop_until<P>(&self, predicate: P) -> impl Future<Output = anyhow::Result<()>> + Send
    where
        P: Fn(&RouteDescriptor) -> bool + Send + Sync + 'static;

    /// Replaces the whole stack with `routes`.
    fn replace_all(
        &self,
        routes: Vec<RouteDescriptor>,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Router owned by a mounted singleton screen for its nested routes.
pub trait NestedRouter: Send + Sync {
    /// Pushes a single nested route.
    fn navigate(&self, route: RouteDescriptor) -> anyhow::Result<()>;
}

/// Nested router whose pushes complete asynchronously, e.g. a router on the
/// Dart side.
///
/// Use [`crate::QueuedRouter`] to turn it into a [`NestedRouter`] that keeps
/// the order of pushes.
pub trait AsyncNestedRouter: Send + Sync {
    fn push(&self, route: RouteDescriptor) -> impl Future<Output = anyhow::Result<()>> + Send;
}

impl<T: RootNavigator> RootNavigator for Arc<T> {
    fn stack(&self) -> Vec<RouteDescriptor> {
        (**self).stack()
    }

    fn pop_until<P>(&self, predicate: P) -> impl Future<Output = anyhow::Result<()>> + Send
    where
        P: Fn(&RouteDescriptor) -> bool + Send + Sync + 'static,
    {
        (**self).pop_until(predicate)
    }

    fn replace_all(
        &self,
        routes: Vec<RouteDescriptor>,
    ) -> impl Future<Output = anyhow::Result<()>> + Send {
        (**self).replace_all(routes)
    }
}

impl<T: NestedRouter + ?Sized> NestedRouter for Arc<T> {
    fn navigate(&self, route: RouteDescriptor) -> anyhow::Result<()> {
        (**self).navigate(route)
    }
}
