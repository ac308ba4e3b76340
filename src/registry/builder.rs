use http::Method;
use tracing::info;

use super::core::{RouteRegistry, Scope};
use super::route::{Callback, Target};
use crate::config::RouterConfig;
use crate::error::Result;
use crate::placeholder::PlaceholderTable;
use crate::router::Router;

/// Collects placeholders and routes during configuration.
///
/// Nothing is compiled until [`build`](RouterBuilder::build), which freezes the
/// placeholder table, synthesizes the default route and compiles every
/// template. A template that does not compile aborts the build.
///
/// ```rust
/// use cometroute::{Callback, RouterBuilder, RouterConfig};
///
/// # fn main() -> Result<(), cometroute::RouterError> {
/// let mut builder = RouterBuilder::new(RouterConfig::with_default("Home", "index"));
/// builder
///     .get("/user/:num", Callback::action("User::show")?)
///     .name("profile")?;
/// builder.group("/admin", |admin| {
///     admin.get("/list", Callback::inline(|_| "admin list".to_string()));
///     Ok(())
/// })?;
/// builder.redirect("/old", "/new")?;
///
/// let router = builder.build()?;
/// assert_eq!(router.url("profile", &[(":num", "42")])?, "/user/42");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouterBuilder {
    config: RouterConfig,
    placeholders: PlaceholderTable,
    registry: RouteRegistry,
}

impl RouterBuilder {
    /// Start with the built-in placeholders and no routes.
    #[must_use]
    pub fn new(config: RouterConfig) -> Self {
        Self {
            config,
            placeholders: PlaceholderTable::default(),
            registry: RouteRegistry::new(),
        }
    }

    /// Configuration the router will be built with.
    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Placeholders registered so far.
    #[must_use]
    pub fn placeholders(&self) -> &PlaceholderTable {
        &self.placeholders
    }

    /// Routes registered so far.
    #[must_use]
    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    /// Set the controller and action answering GET `/`.
    pub fn set_default(&mut self, controller: &str, action: &str) -> &mut Self {
        self.config.default_controller = Some(controller.to_string());
        self.config.default_method = Some(action.to_string());
        self
    }

    /// Register `:key` as a capture of `pattern`.
    pub fn where_(&mut self, key: &str, pattern: &str) -> Result<&mut Self> {
        self.placeholders.where_(key, pattern)?;
        Ok(self)
    }

    /// Register a raw token -> fragment mapping.
    pub fn placeholder(&mut self, token: &str, fragment: &str) -> Result<&mut Self> {
        self.placeholders.register(token, fragment)?;
        Ok(self)
    }

    /// Top-level registration scope (empty prefix).
    pub fn scope(&mut self) -> Scope<'_> {
        Scope::new(&mut self.registry, String::new())
    }

    /// Register a route for `method`. Only GET and POST are accepted.
    pub fn add_route(&mut self, method: Method, path: &str, callback: Callback) -> Result<&mut Self> {
        self.scope().add_route(method, path, callback)?;
        Ok(self)
    }

    /// Register a GET route.
    pub fn get(&mut self, path: &str, callback: Callback) -> &mut Self {
        self.scope().get(path, callback);
        self
    }

    /// Register a POST route.
    pub fn post(&mut self, path: &str, callback: Callback) -> &mut Self {
        self.scope().post(path, callback);
        self
    }

    /// Name the most recently registered GET route.
    pub fn name(&mut self, label: &str) -> Result<&mut Self> {
        self.registry.name(label)?;
        Ok(self)
    }

    /// Redirect GET `from` to `to` with a 301.
    pub fn redirect(&mut self, from: &str, to: &str) -> Result<&mut Self> {
        self.scope().redirect(from, to)?;
        Ok(self)
    }

    /// Redirect GET `from` to `to` with an explicit 3xx status.
    pub fn redirect_with_status(&mut self, from: &str, to: &str, status: u16) -> Result<&mut Self> {
        self.scope().redirect_with_status(from, to, status)?;
        Ok(self)
    }

    /// Register the routes in `body` under `prefix`.
    pub fn group<F>(&mut self, prefix: &str, body: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Scope<'_>) -> Result<()>,
    {
        self.scope().group(prefix, body)?;
        Ok(self)
    }

    /// Freeze the configuration and compile every route.
    pub fn build(mut self) -> Result<Router> {
        if let (Some(controller), Some(action)) = (
            self.config.default_controller.clone(),
            self.config.default_method.clone(),
        ) {
            self.registry.insert(
                Method::GET,
                "/".to_string(),
                Target::Callback(Callback::Controller { controller, action }),
            );
        }

        let router = Router::compile(self.config, self.placeholders, self.registry)?;
        info!(
            routes_count = router.len(),
            placeholders = router.placeholders().len(),
            mount_prefix = %router.config().mount_prefix,
            "Routing table loaded"
        );
        Ok(router)
    }
}
