// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid navigation config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("singleton route name must not be empty")]
    EmptyRouteName,
    #[error("singleton route {0} is listed more than once")]
    DuplicateRoute(String),
}

/// Which routes are guarded as singletons
///
/// An empty list guards every route the guard is attached to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub singleton_routes: Vec<String>,
}

impl NavigationConfig {
    pub fn new(singleton_routes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            singleton_routes: singleton_routes.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses and validates the config shipped with the app.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for name in &self.singleton_routes {
            if name.is_empty() {
                return Err(ConfigError::EmptyRouteName);
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateRoute(name.clone()));
            }
        }
        Ok(())
    }

    pub fn is_singleton(&self, route_name: &str) -> bool {
        self.singleton_routes.is_empty()
            || self.singleton_routes.iter().any(|name| name == route_name)
    }
}
