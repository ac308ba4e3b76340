//! # Route Manifests
//!
//! A manifest declares a routing table in TOML or YAML so it can be inspected
//! with the `cometroute` binary without compiling an application. Entries are
//! registered in file order, so the order in the file is the matching order.
//!
//! ```toml
//! [config]
//! default_controller = "Home"
//! default_method = "index"
//!
//! [[placeholders]]
//! key = "slug"
//! pattern = "[a-z0-9-]+"
//!
//! [[routes]]
//! path = "/user/:num"
//! controller = "User::show"
//! name = "profile"
//!
//! [[routes]]
//! group = "/admin"
//! routes = [
//!     { path = "/list", controller = "Admin::list" },
//!     { method = "POST", path = "/save", controller = "Admin::save" },
//! ]
//!
//! [[routes]]
//! group = "/api"
//!
//! [[routes.routes]]
//! path = "/status"
//! controller = "Api::status"
//!
//! [[routes]]
//! from = "/old"
//! to = "/new"
//! status = 302
//! ```
//!
//! Manifests only carry controller callbacks; inline handlers exist in code only.

use anyhow::{bail, Context};
use http::Method;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::config::RouterConfig;
use crate::error::{Result, RouterError};
use crate::registry::{Callback, RouterBuilder, Scope, DEFAULT_REDIRECT_STATUS};

/// A declarative routing table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Router configuration
    pub config: RouterConfig,
    /// Extra placeholder tokens, in registration order
    pub placeholders: Vec<PlaceholderEntry>,
    /// Routes, groups and redirects, in registration order
    pub routes: Vec<Entry>,
}

/// `:key` -> `(pattern)`
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceholderEntry {
    /// Token name without the leading colon
    pub key: String,
    /// Regular expression the token captures
    pub pattern: String,
}

/// One manifest entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    /// Routes registered under a common prefix
    Group {
        /// Prefix applied to every nested entry
        group: String,
        /// Nested entries
        #[serde(default)]
        routes: Vec<Entry>,
    },
    /// A GET redirect
    Redirect {
        /// Path to redirect from
        from: String,
        /// Path or absolute URL to redirect to
        to: String,
        /// 3xx status; 301 when omitted
        #[serde(default = "default_status")]
        status: u16,
    },
    /// A route bound to a controller action
    Route {
        /// `GET` (default) or `POST`
        #[serde(default = "default_method")]
        method: String,
        /// Path template
        path: String,
        /// `Controller::action`
        controller: String,
        /// Optional label for reverse generation; GET routes only
        #[serde(default)]
        name: Option<String>,
    },
}

fn default_status() -> u16 {
    DEFAULT_REDIRECT_STATUS
}

fn default_method() -> String {
    Method::GET.to_string()
}

/// Load a manifest from a `.toml`, `.yaml` or `.yml` file.
pub fn load_manifest(path: &Path) -> anyhow::Result<Manifest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    let manifest = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => Manifest::from_toml(&raw)
            .with_context(|| format!("invalid TOML manifest {}", path.display()))?,
        Some("yaml") | Some("yml") => Manifest::from_yaml(&raw)
            .with_context(|| format!("invalid YAML manifest {}", path.display()))?,
        other => bail!(
            "unsupported manifest format {:?} for {}",
            other.unwrap_or(""),
            path.display()
        ),
    };
    debug!(
        path = %path.display(),
        entries = manifest.routes.len(),
        placeholders = manifest.placeholders.len(),
        "Manifest loaded"
    );
    Ok(manifest)
}

impl Manifest {
    /// Parse a TOML manifest.
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Parse a YAML manifest.
    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Register placeholders and routes on a fresh builder.
    pub fn into_builder(self) -> Result<RouterBuilder> {
        self.into_builder_with(|config| config)
    }

    /// Like [`into_builder`](Self::into_builder), adjusting the configuration first.
    pub fn into_builder_with<F>(self, adjust: F) -> Result<RouterBuilder>
    where
        F: FnOnce(RouterConfig) -> RouterConfig,
    {
        let config = adjust(self.config);
        let prefix = config.mount_prefix.clone();
        let mut builder = RouterBuilder::new(config.mounted_at(&prefix));
        for placeholder in &self.placeholders {
            builder.where_(&placeholder.key, &placeholder.pattern)?;
        }
        register_entries(&mut builder.scope(), &self.routes)?;
        Ok(builder)
    }
}

fn register_entries(scope: &mut Scope<'_>, entries: &[Entry]) -> Result<()> {
    for entry in entries {
        match entry {
            Entry::Group { group, routes } => {
                scope.group(group, |inner| register_entries(inner, routes))?;
            }
            Entry::Redirect { from, to, status } => {
                scope.redirect_with_status(from, to, *status)?;
            }
            Entry::Route {
                method,
                path,
                controller,
                name,
            } => {
                let callback = Callback::action(controller)?;
                let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                    .map_err(|_| RouterError::UnsupportedMethod(method.clone()))?;
                if let Some(label) = name.as_ref().filter(|_| method != Method::GET) {
                    return Err(RouterError::NameOnNonGet {
                        label: label.clone(),
                        method,
                    });
                }
                scope.add_route(method, path, callback)?;
                if let Some(name) = name {
                    scope.name(name)?;
                }
            }
        }
    }
    Ok(())
}
