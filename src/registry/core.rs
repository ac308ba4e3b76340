use http::Method;
use tracing::{debug, warn};

use super::route::{Callback, RouteDef, Target, DEFAULT_REDIRECT_STATUS};
use crate::error::{Result, RouterError};

/// All registered routes, keyed by method and then by raw template.
///
/// Routes keep their insertion order, which is the order they are tried in.
/// Registering a template twice for the same method replaces the earlier
/// route in place.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    tables: Vec<(Method, Vec<RouteDef>)>,
    last_get: Option<usize>,
}

impl RouteRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route and return its position within its method table.
    pub fn insert(&mut self, method: Method, template: String, target: Target) -> usize {
        let is_get = method == Method::GET;
        let table = match self.tables.iter().position(|(m, _)| *m == method) {
            Some(idx) => &mut self.tables[idx].1,
            None => {
                self.tables.push((method.clone(), Vec::new()));
                let last = self.tables.len() - 1;
                &mut self.tables[last].1
            }
        };

        let route = RouteDef {
            method,
            template,
            target,
            name: None,
        };

        let index = match table.iter().position(|r| r.template == route.template) {
            Some(existing) => {
                warn!(
                    method = %route.method,
                    template = %route.template,
                    "Route registered twice; replacing the earlier definition"
                );
                table[existing] = route;
                existing
            }
            None => {
                debug!(
                    method = %route.method,
                    template = %route.template,
                    target = %route.target,
                    "Route registered"
                );
                table.push(route);
                table.len() - 1
            }
        };

        if is_get {
            self.last_get = Some(index);
        }
        index
    }

    /// Attach `label` to the most recently registered GET route.
    pub fn name(&mut self, label: &str) -> Result<()> {
        let route = self
            .last_get
            .and_then(|idx| {
                self.tables
                    .iter_mut()
                    .find(|(m, _)| *m == Method::GET)
                    .and_then(|(_, routes)| routes.get_mut(idx))
            })
            .ok_or_else(|| RouterError::NothingToName {
                label: label.to_string(),
            })?;
        debug!(template = %route.template, name = %label, "Route named");
        route.name = Some(label.to_string());
        Ok(())
    }

    /// Routes registered for `method`, in insertion order.
    #[must_use]
    pub fn routes(&self, method: &Method) -> &[RouteDef] {
        self.tables
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, routes)| routes.as_slice())
            .unwrap_or(&[])
    }

    /// Every route, grouped by method in the order methods were first seen.
    pub fn iter(&self) -> impl Iterator<Item = &RouteDef> {
        self.tables.iter().flat_map(|(_, routes)| routes.iter())
    }

    /// Consume the registry, yielding each method table.
    pub fn into_tables(self) -> impl Iterator<Item = (Method, Vec<RouteDef>)> {
        self.tables.into_iter()
    }

    /// Total number of routes across all methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.iter().map(|(_, routes)| routes.len()).sum()
    }

    /// Whether no route is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Registration handle carrying the prefix of the enclosing groups.
///
/// Nested [`group`](Scope::group) calls hand the body a fresh `Scope` whose
/// prefix is the parent's prefix followed by the group's own, so no prefix
/// state outlives the body that uses it.
pub struct Scope<'a> {
    registry: &'a mut RouteRegistry,
    prefix: String,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(registry: &'a mut RouteRegistry, prefix: String) -> Self {
        Self { registry, prefix }
    }

    /// The prefix applied to every path registered through this scope.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn path(&self, path: &str) -> String {
        join_path(&self.prefix, path)
    }

    /// Register a route for `method`. Only GET and POST are accepted.
    pub fn add_route(&mut self, method: Method, path: &str, callback: Callback) -> Result<&mut Self> {
        if method != Method::GET && method != Method::POST {
            return Err(RouterError::UnsupportedMethod(method.to_string()));
        }
        let template = self.path(path);
        self.registry
            .insert(method, template, Target::Callback(callback));
        Ok(self)
    }

    /// Register a GET route.
    pub fn get(&mut self, path: &str, callback: Callback) -> &mut Self {
        let template = self.path(path);
        self.registry
            .insert(Method::GET, template, Target::Callback(callback));
        self
    }

    /// Register a POST route.
    pub fn post(&mut self, path: &str, callback: Callback) -> &mut Self {
        let template = self.path(path);
        self.registry
            .insert(Method::POST, template, Target::Callback(callback));
        self
    }

    /// Name the most recently registered GET route.
    pub fn name(&mut self, label: &str) -> Result<&mut Self> {
        self.registry.name(label)?;
        Ok(self)
    }

    /// Redirect GET `from` to `to` with a 301.
    pub fn redirect(&mut self, from: &str, to: &str) -> Result<&mut Self> {
        self.redirect_with_status(from, to, DEFAULT_REDIRECT_STATUS)
    }

    /// Redirect GET `from` to `to` with an explicit 3xx status.
    ///
    /// The group prefix applies to `from` only; `to` is an application path.
    pub fn redirect_with_status(&mut self, from: &str, to: &str, status: u16) -> Result<&mut Self> {
        if !(300..400).contains(&status) {
            return Err(RouterError::InvalidRedirectStatus(status));
        }
        let template = self.path(from);
        self.registry.insert(
            Method::GET,
            template,
            Target::Redirect {
                to: to.to_string(),
                status,
            },
        );
        Ok(self)
    }

    /// Register the routes in `body` under `prefix`.
    pub fn group<F>(&mut self, prefix: &str, body: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Scope<'_>) -> Result<()>,
    {
        let nested = join_path(&self.prefix, prefix);
        debug!(prefix = %nested, "Entering route group");
        let mut inner = Scope::new(&mut *self.registry, nested);
        body(&mut inner)?;
        Ok(self)
    }
}

/// Prepend a group prefix. `/` inside a group maps to the bare prefix.
pub(crate) fn join_path(prefix: &str, path: &str) -> String {
    if prefix.is_empty() {
        path.to_string()
    } else if path.is_empty() || path == "/" {
        prefix.to_string()
    } else {
        format!("{prefix}{path}")
    }
}
