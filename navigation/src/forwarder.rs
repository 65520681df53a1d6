// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Hand-off of nested routes to an already mounted singleton screen

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, OnceLock},
};

use parking_lot::Mutex;
use tracing::debug;

use crate::route::RouteDescriptor;

/// Receives a batch of nested routes, in the order they were requested.
pub type DeliveryCallback = Arc<dyn Fn(Vec<RouteDescriptor>) + Send + Sync>;

static GLOBAL_REGISTRY: OnceLock<Arc<ForwarderRegistry>> = OnceLock::new();

/// Map from route name to its [`RouteForwarder`]
///
/// Forwarders are created on first access and live as long as the registry.
#[derive(Default)]
pub struct ForwarderRegistry {
    forwarders: Mutex<HashMap<String, Arc<RouteForwarder>>>,
}

impl ForwarderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> Arc<Self> {
        GLOBAL_REGISTRY.get_or_init(Default::default).clone()
    }

    /// Returns the forwarder for `route_name`.
    ///
    /// Equal names always yield the same forwarder.
    pub fn get(&self, route_name: &str) -> Arc<RouteForwarder> {
        let mut forwarders = self.forwarders.lock();
        if let Some(forwarder) = forwarders.get(route_name) {
            return forwarder.clone();
        }
        let forwarder = Arc::new(RouteForwarder::new(route_name.to_owned()));
        forwarders.insert(route_name.to_owned(), forwarder.clone());
        forwarder
    }
}

impl fmt::Debug for ForwarderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let forwarders = self.forwarders.lock();
        f.debug_struct("ForwarderRegistry")
            .field("routes", &forwarders.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Per-route coordination point between a blocked navigation request and the
/// mounted instance of the route.
///
/// Holds at most one pending batch and at most one delivery callback.
pub struct RouteForwarder {
    route_name: String,
    inner: Mutex<ForwarderState>,
}

#[derive(Default)]
struct ForwarderState {
    pending: Option<Vec<RouteDescriptor>>,
    callback: Option<DeliveryCallback>,
}

impl RouteForwarder {
    fn new(route_name: String) -> Self {
        Self {
            route_name,
            inner: Default::default(),
        }
    }

    pub fn route_name(&self) -> &str {
        &self.route_name
    }

    /// Delivers `children` to the registered callback, or keeps them until a
    /// callback is registered.
    ///
    /// Without a callback, a previously pending batch is replaced.
    pub fn forward(&self, children: Vec<RouteDescriptor>) {
        let callback = {
            let mut state = self.inner.lock();
            match state.callback.clone() {
                Some(callback) => callback,
                None => {
                    debug!(
                        route = %self.route_name,
                        children = children.len(),
                        replaced = state.pending.is_some(),
                        "queueing forwarded routes"
                    );
                    state.pending = Some(children);
                    return;
                }
            }
        };
        debug!(
            route = %self.route_name,
            children = children.len(),
            "delivering forwarded routes"
        );
        callback(children);
    }

    /// Registers or detaches the delivery callback.
    ///
    /// Registering a callback delivers the pending batch (if any) to it and
    /// clears it.
    pub fn set_delivery_callback(&self, callback: Option<DeliveryCallback>) {
        let pending = {
            let mut state = self.inner.lock();
            state.callback = callback.clone();
            if callback.is_some() {
                state.pending.take()
            } else {
                None
            }
        };
        if let (Some(callback), Some(pending)) = (callback, pending) {
            debug!(
                route = %self.route_name,
                children = pending.len(),
                "delivering pending routes on registration"
            );
            callback(pending);
        }
    }

    /// Detaches the delivery callback only if `callback` is the registered one.
    ///
    /// Returns whether the callback was detached.
    pub fn clear_delivery_callback_if(&self, callback: &DeliveryCallback) -> bool {
        let mut state = self.inner.lock();
        match &state.callback {
            Some(registered) if Arc::ptr_eq(registered, callback) => {
                state.callback = None;
                true
            }
            _ => false,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.inner.lock().pending.is_some()
    }

    pub fn has_delivery_callback(&self) -> bool {
        self.inner.lock().callback.is_some()
    }
}

impl fmt::Debug for RouteForwarder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("RouteForwarder")
            .field("route_name", &self.route_name)
            .field("pending", &state.pending)
            .field("has_callback", &state.callback.is_some())
            .finish()
    }
}

static_assertions::assert_impl_all!(RouteForwarder: Send, Sync);
