// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Singleton route coordination for the client application
//!
//! Some routes host a nested router of their own and must never be mounted
//! twice. Navigation to such a route either goes through the
//! [`SingletonGuard`] attached to the route, or through the imperative
//! [`SingletonNavigator`]. If the route is already mounted, the stack is
//! popped back to it and the nested routes of the request are handed to the
//! mounted [`SingletonHost`] via its [`RouteForwarder`].

pub mod api;

pub(crate) mod config;
pub(crate) mod forwarder;
pub(crate) mod guard;
pub(crate) mod host;
pub(crate) mod in_flight;
pub(crate) mod logging;
pub(crate) mod navigator;
pub(crate) mod queued_router;
pub(crate) mod route;
pub(crate) mod singleton;

pub use config::{ConfigError, NavigationConfig};
pub use forwarder::{DeliveryCallback, ForwarderRegistry, RouteForwarder};
pub use guard::{Decision, NavigationGuard, Redirect, SingletonGuard};
pub use host::SingletonHost;
pub use in_flight::{InFlight, InFlightTracker};
pub use navigator::{AsyncNestedRouter, NestedRouter, RootNavigator};
pub use queued_router::QueuedRouter;
pub use route::{RouteDescriptor, by_name, by_path_fragment};
pub use singleton::SingletonNavigator;
