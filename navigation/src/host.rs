// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Receiving side of forwarded routes

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, warn};

use crate::{
    forwarder::{DeliveryCallback, ForwarderRegistry, RouteForwarder},
    navigator::NestedRouter,
    route::RouteDescriptor,
};

/// State of a mounted singleton screen that receives forwarded nested routes
///
/// The screen subscribes when it is mounted and unsubscribes when it is
/// unmounted (at the latest when the host is dropped). While subscribed,
/// every forwarded batch is pushed onto the nested router, one route at a
/// time.
pub struct SingletonHost<R> {
    forwarder: Arc<RouteForwarder>,
    nested_router: Arc<Mutex<Option<Arc<R>>>>,
    subscription: Option<DeliveryCallback>,
}

impl<R: NestedRouter + 'static> SingletonHost<R> {
    pub fn new(route_name: &str, forwarders: &ForwarderRegistry) -> Self {
        Self {
            forwarder: forwarders.get(route_name),
            nested_router: Default::default(),
            subscription: None,
        }
    }

    pub fn route_name(&self) -> &str {
        self.forwarder.route_name()
    }

    /// Sets or unsets the router for nested routes.
    ///
    /// Batches delivered while no router is set are dropped.
    pub fn set_nested_router(&self, router: Option<R>) {
        *self.nested_router.lock() = router.map(Arc::new);
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Starts receiving forwarded routes.
    ///
    /// A batch that was forwarded before is delivered immediately.
    pub fn subscribe(&mut self) {
        if self.subscription.is_some() {
            return;
        }
        let route_name = self.route_name().to_owned();
        let nested_router = self.nested_router.clone();
        let callback: DeliveryCallback = Arc::new(move |routes| {
            let router = nested_router.lock().clone();
            deliver(&route_name, router.as_deref(), routes);
        });
        self.subscription = Some(callback.clone());
        self.forwarder.set_delivery_callback(Some(callback));
    }

    /// Stops receiving forwarded routes; they are queued again.
    pub fn unsubscribe(&mut self) {
        if let Some(callback) = self.subscription.take() {
            if !self.forwarder.clear_delivery_callback_if(&callback) {
                debug!(
                    route = %self.route_name(),
                    "delivery callback was replaced by another host"
                );
            }
        }
    }
}

fn deliver<R: NestedRouter>(route_name: &str, router: Option<&R>, routes: Vec<RouteDescriptor>) {
    let Some(router) = router else {
        error!(
            route = %route_name,
            dropped = routes.len(),
            "nested router is not set; dropping forwarded routes"
        );
        return;
    };
    for route in routes {
        let child = route.name.clone();
        if let Err(error) = router.navigate(route) {
            warn!(route = %route_name, %child, %error, "failed to open forwarded route");
        }
    }
}

impl<R> Drop for SingletonHost<R> {
    fn drop(&mut self) {
        if let Some(callback) = self.subscription.take() {
            self.forwarder.clear_delivery_callback_if(&callback);
        }
    }
}
