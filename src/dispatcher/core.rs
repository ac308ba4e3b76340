use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{error, info, info_span, warn};
use url::Url;

use super::request::Request;
use super::response::Response;
use crate::controller::ControllerRegistry;
use crate::error::{Result, RouterError};
use crate::registry::{Callback, Captures, Target};
use crate::router::{CompiledRoute, Router};

/// What a successfully dispatched request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A handler ran and returned `body`
    Rendered {
        /// Template of the route that handled the request
        template: String,
        /// Handler output
        body: String,
    },
    /// The route redirects; no handler ran
    Redirect {
        /// Absolute redirect location
        location: String,
        /// 3xx status code
        status: u16,
    },
}

impl From<Outcome> for Response {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Rendered { body, .. } => Response::html(body),
            Outcome::Redirect { location, status } => Response::redirect(location, status),
        }
    }
}

/// Matches requests against a [`Router`] and runs the bound target.
///
/// Immutable after construction; share it behind an `Arc` between workers.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    router: Arc<Router>,
    controllers: ControllerRegistry,
}

impl Dispatcher {
    /// Dispatcher over `router`, resolving controller callbacks through `controllers`.
    #[must_use]
    pub fn new(router: Router, controllers: ControllerRegistry) -> Self {
        Self::with_shared_router(Arc::new(router), controllers)
    }

    /// Like [`new`](Self::new) for a router that is already shared.
    #[must_use]
    pub fn with_shared_router(router: Arc<Router>, controllers: ControllerRegistry) -> Self {
        Self {
            router,
            controllers,
        }
    }

    /// The routing table.
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// The controller table.
    #[must_use]
    pub fn controllers(&self) -> &ControllerRegistry {
        &self.controllers
    }

    /// Dispatch `req`, containing every failure in the returned response.
    ///
    /// A miss answers 404; an unresolvable controller or a panicking handler
    /// answers 500. Errors are logged, never propagated.
    #[must_use]
    pub fn dispatch(&self, req: &Request) -> Response {
        match self.try_dispatch(req) {
            Ok(outcome) => outcome.into(),
            Err(err) => {
                match &err {
                    RouterError::NoRouteMatched { method, path } => {
                        warn!(method = %method, path = %path, "No route matched");
                    }
                    other => {
                        error!(method = %req.method, uri = %req.uri, error = %other, "Dispatch failed");
                    }
                }
                Response::from(&err)
            }
        }
    }

    /// Dispatch `req`, returning failures to the caller.
    pub fn try_dispatch(&self, req: &Request) -> Result<Outcome> {
        let path = self.router.normalize_path(&req.uri);
        let span = info_span!("dispatch", method = %req.method, path = %path);
        let _enter = span.enter();

        let matched = self.router.try_match(&req.method, &path)?;
        let route = &matched.route;

        match &route.target {
            Target::Redirect { to, status } => {
                let location = self.redirect_location(req, to);
                info!(
                    template = %route.template,
                    location = %location,
                    status = *status,
                    "Redirect issued"
                );
                Ok(Outcome::Redirect {
                    location,
                    status: *status,
                })
            }
            Target::Callback(callback) => {
                let body = self.invoke(route, callback, &matched.captures)?;
                Ok(Outcome::Rendered {
                    template: route.template.clone(),
                    body,
                })
            }
        }
    }

    fn invoke(&self, route: &CompiledRoute, callback: &Callback, captures: &Captures) -> Result<String> {
        let args = captures.as_slice();
        let result = catch_unwind(AssertUnwindSafe(|| match callback {
            Callback::Inline(handler) => Ok(handler(args)),
            Callback::Controller { controller, action } => {
                self.controllers.invoke(controller, action, args)
            }
        }));

        match result {
            Ok(body) => body,
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Err(RouterError::HandlerPanicked {
                    template: route.template.clone(),
                    message,
                })
            }
        }
    }

    /// Absolute location for a redirect to the application path `to`.
    ///
    /// Targets that are already absolute `http(s)` URLs are used as they are.
    /// Anything else stays on the request's origin: leading slashes are
    /// collapsed so `//host/x` cannot be read as a scheme-relative URL.
    fn redirect_location(&self, req: &Request, to: &str) -> String {
        if let Ok(absolute) = Url::parse(to) {
            if matches!(absolute.scheme(), "http" | "https") {
                return absolute.into();
            }
        }

        let mount = self.router.config().mount_prefix.as_str();
        let origin = format!("{}://{}", req.scheme, req.host);
        let location = format!("{origin}{mount}/{}", to.trim_start_matches('/'));
        match Url::parse(&location) {
            Ok(url) => url.into(),
            Err(err) => {
                warn!(location = %location, error = %err, "Cannot normalize redirect URL; using it unparsed");
                location
            }
        }
    }
}
