//! Route configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use tollgate_core::{RouteGuard, RoutePath, RouteTable};

/// Contents of `config.json`.
///
/// Every field is optional; missing ones fall back to the built-in route
/// table and redirect targets.
///
/// ```json
/// {
///   "landing_route": "/dashboard",
///   "login_route": "/login",
///   "routes": [
///     { "path": "/login", "class": "public-unauthenticated-only" },
///     { "path": "/admin*", "class": "protected" }
///   ]
/// }
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub landing_route: Option<RoutePath>,
    pub login_route: Option<RoutePath>,
    pub routes: Option<RouteTable>,
}

impl Config {
    /// Load from `path`, or from the default location if it exists.
    ///
    /// An explicit path must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let json = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Build the route guard this configuration describes.
    pub fn guard(&self) -> RouteGuard {
        let mut guard = RouteGuard::new(self.routes.clone().unwrap_or_default());
        if let Some(landing) = &self.landing_route {
            guard = guard.with_landing(landing.clone());
        }
        if let Some(login) = &self.login_route {
            guard = guard.with_login(login.clone());
        }
        guard
    }
}

fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tollgate").map(|dirs| dirs.config_dir().join("config.json"))
}
