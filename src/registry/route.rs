use http::Method;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::RouterError;

/// Maximum number of captured segments kept inline before spilling to the heap.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Captured path segments, in pattern order.
pub type Captures = SmallVec<[String; MAX_INLINE_PARAMS]>;

/// Separator between controller identifier and action in a string callback.
pub const CONTROLLER_SEPARATOR: &str = "::";

/// Status used by [`redirect`](crate::registry::Scope::redirect) when none is given.
pub const DEFAULT_REDIRECT_STATUS: u16 = 301;

/// An inline handler: receives the captured segments, returns the response body.
pub type InlineHandler = Arc<dyn Fn(&[String]) -> String + Send + Sync>;

/// What a dispatchable route invokes.
#[derive(Clone)]
pub enum Callback {
    /// A closure called directly with the captures
    Inline(InlineHandler),
    /// A controller action resolved through the
    /// [`ControllerRegistry`](crate::controller::ControllerRegistry)
    Controller {
        /// Bare controller identifier, e.g. `Home`
        controller: String,
        /// Action name, e.g. `index`
        action: String,
    },
}

impl Callback {
    /// Wrap a closure as an inline handler.
    pub fn inline<F>(handler: F) -> Self
    where
        F: Fn(&[String]) -> String + Send + Sync + 'static,
    {
        Callback::Inline(Arc::new(handler))
    }

    /// Parse a `Controller::action` reference. The controller may itself be
    /// qualified, as in `Admin::Users::index`.
    pub fn action(reference: &str) -> Result<Self, RouterError> {
        reference.parse()
    }
}

impl FromStr for Callback {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The action is the last segment; anything before it may be a
        // namespace-qualified controller such as `Admin::Users`.
        match s.rsplit_once(CONTROLLER_SEPARATOR) {
            Some((controller, action))
                if !action.is_empty()
                    && !controller.split(CONTROLLER_SEPARATOR).any(str::is_empty) =>
            {
                Ok(Callback::Controller {
                    controller: controller.to_string(),
                    action: action.to_string(),
                })
            }
            _ => Err(RouterError::InvalidCallback(s.to_string())),
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Inline(_) => f.write_str("Inline(<fn>)"),
            Callback::Controller { controller, action } => {
                write!(f, "Controller({controller}{CONTROLLER_SEPARATOR}{action})")
            }
        }
    }
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Inline(_) => f.write_str("<inline>"),
            Callback::Controller { controller, action } => {
                write!(f, "{controller}{CONTROLLER_SEPARATOR}{action}")
            }
        }
    }
}

/// A route either dispatches to a callback or redirects.
#[derive(Debug, Clone)]
pub enum Target {
    /// Invoke a handler
    Callback(Callback),
    /// Answer with `Location: <to>` and `status`
    Redirect {
        /// Application path to redirect to
        to: String,
        /// 3xx status code
        status: u16,
    },
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Callback(callback) => fmt::Display::fmt(callback, f),
            Target::Redirect { to, status } => write!(f, "redirect {status} -> {to}"),
        }
    }
}

/// A registered, not yet compiled, route.
#[derive(Debug, Clone)]
pub struct RouteDef {
    /// HTTP method
    pub method: Method,
    /// Raw path template with the group prefix applied
    pub template: String,
    /// Dispatch target
    pub target: Target,
    /// Optional label for reverse generation
    pub name: Option<String>,
}
