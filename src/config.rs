//! # Router Configuration
//!
//! The router reads a handful of settings from its host application:
//!
//! - `default_controller` / `default_method`: the controller action answering
//!   GET `/`. Both must be set for the default route to exist.
//! - `controller_namespace`: prefix used to turn a bare controller identifier
//!   (`Home`) into a fully qualified name (`App::Controllers::Home`).
//! - `mount_prefix`: sub-directory the application is mounted under. It is
//!   stripped from request paths before matching and prepended to redirect
//!   locations.
//!
//! ## Sources
//!
//! Settings come from a TOML or YAML file (picked by extension) and can be
//! overridden with environment variables:
//!
//! | variable                      | field                  |
//! |-------------------------------|------------------------|
//! | `COMET_DEFAULT_CONTROLLER`    | `default_controller`   |
//! | `COMET_DEFAULT_METHOD`        | `default_method`       |
//! | `COMET_CONTROLLER_NAMESPACE`  | `controller_namespace` |
//! | `COMET_MOUNT_PREFIX`          | `mount_prefix`         |
//!
//! ```toml
//! default_controller = "Home"
//! default_method = "index"
//! mount_prefix = "/blog"
//! ```

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Namespace controllers are resolved under when none is configured.
pub const DEFAULT_CONTROLLER_NAMESPACE: &str = "App::Controllers";

/// Settings consumed read-only by the router and dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Controller answering GET `/`
    pub default_controller: Option<String>,
    /// Action answering GET `/`
    pub default_method: Option<String>,
    /// Namespace prepended to controller identifiers
    pub controller_namespace: String,
    /// Sub-directory the application is mounted under, e.g. `/blog`
    pub mount_prefix: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_controller: None,
            default_method: None,
            controller_namespace: DEFAULT_CONTROLLER_NAMESPACE.to_string(),
            mount_prefix: String::new(),
        }
    }
}

impl RouterConfig {
    /// Configuration with a default route and nothing else.
    #[must_use]
    pub fn with_default(controller: &str, action: &str) -> Self {
        Self {
            default_controller: Some(controller.to_string()),
            default_method: Some(action.to_string()),
            ..Self::default()
        }
    }

    /// Set the mount prefix, normalized to a leading slash and no trailing one.
    #[must_use]
    pub fn mounted_at(mut self, prefix: &str) -> Self {
        self.mount_prefix = normalize_mount_prefix(prefix);
        self
    }

    /// Load configuration from a `.toml`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config: RouterConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&raw)
                .with_context(|| format!("invalid TOML in {}", path.display()))?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&raw)
                .with_context(|| format!("invalid YAML in {}", path.display()))?,
            other => bail!(
                "unsupported config format {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ),
        };
        config.mount_prefix = normalize_mount_prefix(&config.mount_prefix);
        Ok(config)
    }

    /// Defaults overlaid with environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `COMET_*` environment overrides on top of `self`.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(controller) = lookup("COMET_DEFAULT_CONTROLLER") {
            self.default_controller = Some(controller);
        }
        if let Some(method) = lookup("COMET_DEFAULT_METHOD") {
            self.default_method = Some(method);
        }
        if let Some(namespace) = lookup("COMET_CONTROLLER_NAMESPACE") {
            self.controller_namespace = namespace;
        }
        if let Some(prefix) = lookup("COMET_MOUNT_PREFIX") {
            self.mount_prefix = normalize_mount_prefix(&prefix);
        }
        self
    }
}

fn normalize_mount_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
