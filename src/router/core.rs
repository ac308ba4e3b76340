use http::Method;
use regex::Regex;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::RouterConfig;
use crate::error::{Result, RouterError};
use crate::placeholder::PlaceholderTable;
use crate::registry::{Captures, RouteDef, RouteRegistry, Target};

/// A route whose template has been compiled against the frozen placeholder table.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    /// HTTP method
    pub method: Method,
    /// Raw template, group prefix included
    pub template: String,
    /// Dispatch target
    pub target: Target,
    /// Optional label for reverse generation
    pub name: Option<String>,
    /// Anchored pattern produced by [`PlaceholderTable::resolve`]
    pub pattern: Regex,
}

impl CompiledRoute {
    fn compile(def: RouteDef, placeholders: &PlaceholderTable) -> Result<Self> {
        let pattern = placeholders.compile(&def.template)?;
        Ok(Self {
            method: def.method,
            template: def.template,
            target: def.target,
            name: def.name,
            pattern,
        })
    }

    /// Captured segments if `path` matches this route, full match excluded.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<Captures> {
        let caps = self.pattern.captures(path)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }
}

/// Result of matching a request path against the routing table.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The route that matched first
    pub route: Arc<CompiledRoute>,
    /// Captured segments in pattern order
    pub captures: Captures,
}

/// Immutable routing table produced by [`RouterBuilder::build`](crate::RouterBuilder::build).
///
/// Routes are tried in insertion order and the first match wins. The router
/// is `Send + Sync`; share it behind an `Arc` between workers.
#[derive(Debug, Clone)]
pub struct Router {
    config: RouterConfig,
    placeholders: PlaceholderTable,
    tables: Vec<(Method, Vec<Arc<CompiledRoute>>)>,
}

impl Router {
    pub(crate) fn compile(
        config: RouterConfig,
        placeholders: PlaceholderTable,
        registry: RouteRegistry,
    ) -> Result<Self> {
        let mut tables = Vec::new();
        for (method, defs) in registry.into_tables() {
            let routes = defs
                .into_iter()
                .map(|def| CompiledRoute::compile(def, &placeholders).map(Arc::new))
                .collect::<Result<Vec<_>>>()?;
            tables.push((method, routes));
        }
        Ok(Self {
            config,
            placeholders,
            tables,
        })
    }

    /// Configuration the router was built with.
    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// The frozen placeholder table.
    #[must_use]
    pub fn placeholders(&self) -> &PlaceholderTable {
        &self.placeholders
    }

    /// Routes for `method`, in matching order.
    #[must_use]
    pub fn routes(&self, method: &Method) -> &[Arc<CompiledRoute>] {
        self.tables
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, routes)| routes.as_slice())
            .unwrap_or(&[])
    }

    /// Every route, grouped by method.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CompiledRoute>> {
        self.tables.iter().flat_map(|(_, routes)| routes.iter())
    }

    /// Total number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.iter().map(|(_, routes)| routes.len()).sum()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the routing table to `out`, one route per line in matching order.
    pub fn dump_routes(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "{} routes (mount prefix {:?})",
            self.len(),
            self.config.mount_prefix
        )?;
        for route in self.iter() {
            write!(
                out,
                "{:<5} {:<30} {}",
                route.method.as_str(),
                route.template,
                route.target
            )?;
            if let Some(name) = &route.name {
                write!(out, "  [{name}]")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Reduce a request URI to the application path routes are matched against.
    ///
    /// Drops the query string and fragment, strips the mount prefix and maps an
    /// empty path to `/`.
    #[must_use]
    pub fn normalize_path(&self, uri: &str) -> String {
        let path = uri.split(['?', '#']).next().unwrap_or_default();
        let prefix = self.config.mount_prefix.as_str();
        let path = match path.strip_prefix(prefix) {
            Some(rest) if !prefix.is_empty() && (rest.is_empty() || rest.starts_with('/')) => rest,
            _ => path,
        };
        if path.is_empty() {
            "/".to_string()
        } else {
            path.to_string()
        }
    }

    /// Find the first route for `method` whose pattern matches `path`.
    ///
    /// `path` is expected to be normalized already; see
    /// [`normalize_path`](Self::normalize_path).
    #[must_use]
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        debug!(method = %method, path = %path, "Route match attempt");
        let start = Instant::now();

        let found = self
            .routes(method)
            .iter()
            .find_map(|route| route.captures(path).map(|caps| (route, caps)));
        let elapsed = start.elapsed();

        match found {
            Some((route, captures)) => {
                if elapsed > Duration::from_millis(1) {
                    warn!(
                        method = %method,
                        path = %path,
                        template = %route.template,
                        duration_us = elapsed.as_micros(),
                        "Slow route matching detected"
                    );
                }
                debug!(
                    method = %method,
                    path = %path,
                    template = %route.template,
                    captures = ?captures,
                    duration_us = elapsed.as_micros(),
                    "Route matched"
                );
                Some(RouteMatch {
                    route: Arc::clone(route),
                    captures,
                })
            }
            None => {
                debug!(
                    method = %method,
                    path = %path,
                    duration_us = elapsed.as_micros(),
                    "No route matched"
                );
                None
            }
        }
    }

    /// Like [`match_route`](Self::match_route), but a miss is a [`RouterError::NoRouteMatched`].
    pub fn try_match(&self, method: &Method, path: &str) -> Result<RouteMatch> {
        self.match_route(method, path)
            .ok_or_else(|| RouterError::NoRouteMatched {
                method: method.clone(),
                path: path.to_string(),
            })
    }
}
