use http::header::HOST;
use http::Method;

/// Scheme assumed when the request does not carry one.
pub const DEFAULT_SCHEME: &str = "http";

/// Host assumed when the request carries neither a `Host` header nor an authority.
pub const DEFAULT_HOST: &str = "localhost";

/// The parts of an incoming request the dispatcher needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP method
    pub method: Method,
    /// Request target: path plus optional query string
    pub uri: String,
    /// `http` or `https`; used to build redirect locations
    pub scheme: String,
    /// `Host` header value; used to build redirect locations
    pub host: String,
}

impl Request {
    /// A request with the default scheme and host.
    #[must_use]
    pub fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_string(),
            scheme: DEFAULT_SCHEME.to_string(),
            host: DEFAULT_HOST.to_string(),
        }
    }

    /// Shorthand for a GET request.
    #[must_use]
    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    /// Shorthand for a POST request.
    #[must_use]
    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    /// Override the host.
    #[must_use]
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    /// Override the scheme.
    #[must_use]
    pub fn with_scheme(mut self, scheme: &str) -> Self {
        self.scheme = scheme.to_string();
        self
    }
}

impl<B> From<&http::Request<B>> for Request {
    fn from(req: &http::Request<B>) -> Self {
        let uri = req.uri();
        let target = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());
        let host = req
            .headers()
            .get(HOST)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
            .or_else(|| uri.authority().map(|a| a.as_str().to_string()))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        Self {
            method: req.method().clone(),
            uri: target,
            scheme: uri.scheme_str().unwrap_or(DEFAULT_SCHEME).to_string(),
            host,
        }
    }
}
