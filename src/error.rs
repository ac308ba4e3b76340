//! Error types shared by registration, matching and dispatch.
//!
//! Registration and build errors are meant to abort start-up. Dispatch errors
//! are scoped to a single request: [`RouterError::status_code`] maps them onto
//! the HTTP status the [`Dispatcher`](crate::dispatcher::Dispatcher) answers with.

use http::Method;
use thiserror::Error;

/// Everything that can go wrong while building a router or dispatching a request.
#[derive(Debug, Error)]
pub enum RouterError {
    /// No route registered for the request method matched the normalized path.
    #[error("no route matched {method} {path}")]
    NoRouteMatched {
        /// Request method
        method: Method,
        /// Normalized request path
        path: String,
    },

    /// A `Controller::action` callback names a controller or action that is not registered.
    #[error("cannot resolve controller action {controller}::{action}")]
    UnresolvableController {
        /// Fully qualified controller name (namespace applied)
        controller: String,
        /// Action (method) name
        action: String,
    },

    /// A placeholder fragment is not a valid regular expression.
    #[error("placeholder `{token}` has an invalid pattern: {source}")]
    InvalidPlaceholder {
        /// The token as registered (e.g. `:slug`)
        token: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// A route template did not compile after placeholder substitution.
    #[error("route template `{template}` compiles to an invalid pattern: {source}")]
    InvalidPattern {
        /// Raw route template
        template: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// Reverse lookup found zero or several routes carrying the name.
    #[error("route name `{name}` is ambiguous: {matches} routes carry it")]
    AmbiguousName {
        /// Requested route name
        name: String,
        /// Number of GET routes carrying the name
        matches: usize,
    },

    /// `name()` was called before any GET route was registered.
    #[error("cannot name route `{label}`: no GET route has been registered yet")]
    NothingToName {
        /// The label that could not be attached
        label: String,
    },

    /// A name was given to a route that is not a GET route.
    #[error("cannot name {method} route `{label}`: only GET routes can be named")]
    NameOnNonGet {
        /// The label that could not be attached
        label: String,
        /// Method of the route it was given to
        method: Method,
    },

    /// A string callback is not of the form `Controller::action`.
    #[error("invalid callback `{0}`: expected `Controller::action`")]
    InvalidCallback(String),

    /// Only GET and POST routes can be registered.
    #[error("unsupported method `{0}`: only GET and POST routes are supported")]
    UnsupportedMethod(String),

    /// Redirect routes only accept 3xx status codes.
    #[error("invalid redirect status {0}: expected a 3xx code")]
    InvalidRedirectStatus(u16),

    /// Reverse generation is missing a value for a placeholder in the template.
    #[error("route `{name}` needs a value for placeholder `{placeholder}`")]
    MissingParameter {
        /// Route name
        name: String,
        /// Placeholder token as it appears in the template
        placeholder: String,
    },

    /// The generated path does not satisfy the route's own pattern.
    #[error("generated path `{path}` does not match route `{name}`")]
    ParameterMismatch {
        /// Route name
        name: String,
        /// The generated path
        path: String,
    },

    /// A handler panicked while producing its response.
    #[error("handler for {template} panicked: {message}")]
    HandlerPanicked {
        /// Template of the route whose handler panicked
        template: String,
        /// Panic payload, when it was a string
        message: String,
    },
}

impl RouterError {
    /// HTTP status code used when this error terminates a request.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            RouterError::NoRouteMatched { .. } => 404,
            _ => 500,
        }
    }
}

/// Convenience alias for results carrying a [`RouterError`].
pub type Result<T, E = RouterError> = std::result::Result<T, E>;
