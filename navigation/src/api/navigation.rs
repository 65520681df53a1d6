// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use anyhow::{Context, anyhow, bail};
use flutter_rust_bridge::{DartFnFuture, DartOpaque, frb};
use tokio::sync::watch;
use tracing::debug;

use crate::{
    config::NavigationConfig,
    forwarder::ForwarderRegistry,
    guard::{NavigationGuard, SingletonGuard},
    host::SingletonHost,
    navigator::{AsyncNestedRouter, RootNavigator},
    queued_router::QueuedRouter,
    route::RouteDescriptor,
    singleton::SingletonNavigator,
};

/// Encapsulates the root router from the Dart side.
///
/// The Dart side reports every change of its stack with
/// [`DartNavigator::update_stack`]. Popping and replacing routes is done by
/// calling back into Dart. The callbacks return `None` on success and an
/// error message otherwise.
#[derive(Clone)]
pub struct DartNavigator {
    router: DartOpaque,
    stack_tx: Arc<watch::Sender<Vec<RouteDescriptor>>>,
    callbacks: Arc<Callbacks>,
}

struct Callbacks {
    pop: Box<dyn Fn(DartOpaque, u32) -> DartFnFuture<Option<String>> + Send + Sync>,
    replace:
        Box<dyn Fn(DartOpaque, Vec<RouteDescriptor>) -> DartFnFuture<Option<String>> + Send + Sync>,
}

static_assertions::assert_impl_all!(DartNavigator: Send, Sync);

impl DartNavigator {
    /// Wraps the root router from the Dart side.
    ///
    /// `pop_callback` pops the given number of routes, `replace_callback`
    /// replaces the whole stack. Both are called on the `router` parameter.
    #[frb(sync)]
    pub fn new(
        router: DartOpaque,
        pop_callback: impl Fn(DartOpaque, u32) -> DartFnFuture<Option<String>>
        + Send
        + Sync
        + 'static,
        replace_callback: impl Fn(DartOpaque, Vec<RouteDescriptor>) -> DartFnFuture<Option<String>>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            router,
            stack_tx: Arc::new(watch::Sender::new(Vec::new())),
            callbacks: Callbacks {
                pop: Box::new(pop_callback),
                replace: Box::new(replace_callback),
            }
            .into(),
        }
    }

    /// Called by the Dart side whenever its stack changes.
    #[frb(sync)]
    pub fn update_stack(&self, stack: Vec<RouteDescriptor>) {
        self.stack_tx.send_replace(stack);
    }
}

impl RootNavigator for DartNavigator {
    fn stack(&self) -> Vec<RouteDescriptor> {
        self.stack_tx.borrow().clone()
    }

    async fn pop_until<P>(&self, predicate: P) -> anyhow::Result<()>
    where
        P: Fn(&RouteDescriptor) -> bool + Send + Sync + 'static,
    {
        let count = {
            let stack = self.stack_tx.borrow();
            let Some(position) = stack.iter().rposition(&predicate) else {
                bail!("no mounted route to pop back to");
            };
            stack.len() - 1 - position
        };
        if count == 0 {
            return Ok(());
        }
        let count = u32::try_from(count).context("too many routes to pop")?;
        debug!(count, "popping routes");
        match (self.callbacks.pop)(self.router.clone(), count).await {
            None => Ok(()),
            Some(error) => Err(anyhow!(error).context("failed to pop routes")),
        }
    }

    async fn replace_all(&self, routes: Vec<RouteDescriptor>) -> anyhow::Result<()> {
        match (self.callbacks.replace)(self.router.clone(), routes).await {
            None => Ok(()),
            Some(error) => Err(anyhow!(error).context("failed to replace routes")),
        }
    }
}

/// Singleton route navigation exposed to the Dart side
///
/// Combines the guard, that is attached to the singleton routes of the Dart
/// router, with the imperative navigation helpers.
#[frb(opaque)]
pub struct SingletonNavigation {
    guard: SingletonGuard<DartNavigator>,
    navigator: SingletonNavigator<DartNavigator>,
}

impl SingletonNavigation {
    /// `config_json` lists the guarded singleton routes, see
    /// [`NavigationConfig`].
    #[frb(sync)]
    pub fn new(navigator: &DartNavigator, config_json: String) -> anyhow::Result<Self> {
        let config = NavigationConfig::from_json(&config_json)?;
        Ok(Self {
            guard: SingletonGuard::new(navigator.clone(), config),
            navigator: SingletonNavigator::new(navigator.clone()),
        })
    }

    /// Returns whether the Dart router may commit `pending`.
    pub async fn on_navigation_attempt(&self, pending: RouteDescriptor) -> bool {
        let stack = self.guard.navigator().stack();
        self.guard
            .on_navigation_attempt(&pending, &stack)
            .await
            .is_allowed()
    }

    pub async fn navigate_to_singleton(&self, target: RouteDescriptor) -> anyhow::Result<()> {
        self.navigator.navigate_to_singleton(target).await
    }

    /// Like [`Self::navigate_to_singleton`], but reuses a mounted route whose
    /// path contains `path_fragment`.
    pub async fn navigate_to_singleton_with_path(
        &self,
        target: RouteDescriptor,
        path_fragment: String,
    ) -> anyhow::Result<()> {
        self.navigator
            .navigate_to_singleton_where(target, move |route| {
                route
                    .path
                    .as_deref()
                    .is_some_and(|path| path.contains(&path_fragment))
            })
            .await
    }

    #[frb(sync)]
    pub fn singleton_exists(&self, route_name: String) -> bool {
        self.navigator.singleton_exists(&route_name)
    }

    #[frb(sync)]
    pub fn singleton_exists_for(&self, target: RouteDescriptor) -> bool {
        self.navigator.singleton_exists_for(&target)
    }
}

/// Encapsulates the nested router of a singleton screen on the Dart side.
#[derive(Clone)]
pub(crate) struct DartNestedRouter {
    router: DartOpaque,
    push: Arc<dyn Fn(DartOpaque, RouteDescriptor) -> DartFnFuture<Option<String>> + Send + Sync>,
}

static_assertions::assert_impl_all!(DartNestedRouter: Send, Sync);

impl AsyncNestedRouter for DartNestedRouter {
    async fn push(&self, route: RouteDescriptor) -> anyhow::Result<()> {
        match (self.push)(self.router.clone(), route).await {
            None => Ok(()),
            Some(error) => Err(anyhow!(error).context("failed to push nested route")),
        }
    }
}

/// Registration of a mounted singleton screen on the Dart side
///
/// The screen calls [`Self::subscribe`] when it is mounted and
/// [`Self::unsubscribe`] when it is disposed. While subscribed, nested routes
/// forwarded by [`SingletonNavigation`] are pushed onto the screen's nested
/// router, in order and one at a time.
#[frb(opaque)]
pub struct SingletonHostHandle {
    host: SingletonHost<QueuedRouter>,
    router: DartNestedRouter,
}

impl SingletonHostHandle {
    /// `push_callback` pushes a single route and is called on the
    /// `nested_router` parameter.
    #[frb(sync)]
    pub fn new(
        route_name: String,
        nested_router: DartOpaque,
        push_callback: impl Fn(DartOpaque, RouteDescriptor) -> DartFnFuture<Option<String>>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            host: SingletonHost::new(&route_name, &ForwarderRegistry::global()),
            router: DartNestedRouter {
                router: nested_router,
                push: Arc::new(push_callback),
            },
        }
    }

    #[frb(getter, sync)]
    pub fn is_subscribed(&self) -> bool {
        self.host.is_subscribed()
    }

    /// Starts receiving forwarded routes. A pending batch is pushed right
    /// away.
    pub async fn subscribe(&mut self) {
        if self.host.is_subscribed() {
            return;
        }
        self.host
            .set_nested_router(Some(QueuedRouter::spawn(self.router.clone())));
        self.host.subscribe();
    }

    /// Stops receiving forwarded routes; routes already handed over are still
    /// pushed.
    pub async fn unsubscribe(&mut self) {
        self.host.unsubscribe();
        self.host.set_nested_router(None);
    }
}
