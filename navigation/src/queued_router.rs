// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use anyhow::anyhow;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::warn;

use crate::{
    navigator::{AsyncNestedRouter, NestedRouter},
    route::RouteDescriptor,
};

/// [`NestedRouter`] on top of an [`AsyncNestedRouter`]
///
/// Routes are queued and pushed by a single task, each push awaited before
/// the next one starts. The task stops after the router is dropped and the
/// queue is drained.
pub struct QueuedRouter {
    tx: mpsc::UnboundedSender<RouteDescriptor>,
    task: JoinHandle<()>,
}

impl QueuedRouter {
    /// Spawns the push task on the current tokio runtime.
    pub fn spawn<R: AsyncNestedRouter + 'static>(router: R) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(push_loop(router, rx));
        Self { tx, task }
    }

    /// Stops accepting routes and waits until all queued routes are pushed.
    pub async fn finish(self) {
        let Self { tx, task } = self;
        drop(tx);
        if let Err(error) = task.await {
            warn!(%error, "nested router task failed");
        }
    }
}

impl NestedRouter for QueuedRouter {
    fn navigate(&self, route: RouteDescriptor) -> anyhow::Result<()> {
        self.tx
            .send(route)
            .map_err(|_| anyhow!("nested router task has stopped"))
    }
}

async fn push_loop<R: AsyncNestedRouter>(
    router: R,
    mut rx: mpsc::UnboundedReceiver<RouteDescriptor>,
) {
    while let Some(route) = rx.recv().await {
        let child = route.name.clone();
        if let Err(error) = router.push(route).await {
            warn!(%child, %error, "failed to push nested route");
        }
    }
}
