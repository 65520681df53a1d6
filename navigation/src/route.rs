// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Route descriptors and stack matching

use std::collections::HashMap;

use flutter_rust_bridge::frb;
use tracing::warn;

/// Describes a navigation target: a named route, optionally a concrete path
/// and parameters, and the nested routes to open inside of it.
///
/// Descriptors are values. A navigation stack is a slice of descriptors,
/// bottom first.
#[frb(dart_metadata = ("freezed"))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub name: String,
    pub path: Option<String>,
    pub params: HashMap<String, String>,
    #[frb(default = "[]")]
    pub children: Vec<RouteDescriptor>,
}

impl RouteDescriptor {
    #[frb(sync)]
    pub fn new(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    #[frb(ignore)]
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name.into())
    }

    #[frb(ignore)]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[frb(ignore)]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    #[frb(ignore)]
    pub fn with_child(mut self, child: RouteDescriptor) -> Self {
        self.children.push(child);
        self
    }

    #[frb(ignore)]
    pub fn with_children(mut self, children: impl IntoIterator<Item = RouteDescriptor>) -> Self {
        self.children.extend(children);
        self
    }

    #[frb(sync, getter)]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    #[frb(ignore)]
    pub fn into_children(self) -> Vec<RouteDescriptor> {
        self.children
    }
}

/// Matches routes with the given name.
pub fn by_name(name: &str) -> impl Fn(&RouteDescriptor) -> bool + Clone + Send + Sync + '_ {
    move |route| route.name == name
}

/// Matches routes whose path contains `fragment`.
///
/// Used for parameterized singleton destinations, e.g. a chat screen that
/// must exist once per chat id.
pub fn by_path_fragment(
    fragment: &str,
) -> impl Fn(&RouteDescriptor) -> bool + Clone + Send + Sync + '_ {
    move |route| {
        route
            .path
            .as_deref()
            .is_some_and(|path| path.contains(fragment))
    }
}

/// Returns the first route in `stack` accepted by `matcher`.
///
/// A singleton route is expected to be mounted at most once. If it is
/// mounted more than once, this is logged and the bottom-most instance wins.
pub(crate) fn find_match<'a>(
    stack: &'a [RouteDescriptor],
    matcher: impl Fn(&RouteDescriptor) -> bool,
) -> Option<&'a RouteDescriptor> {
    let mut matches = stack.iter().filter(|&route| matcher(route));
    let first = matches.next()?;
    let duplicates = matches.count();
    if duplicates > 0 {
        warn!(
            route = %first.name,
            instances = duplicates + 1,
            "singleton route is mounted more than once; using the first instance"
        );
    }
    Some(first)
}
