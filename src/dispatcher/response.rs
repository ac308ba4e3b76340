use http::header::{CONTENT_TYPE, LOCATION};
use http::StatusCode;
use smallvec::SmallVec;
use std::sync::Arc;

use crate::error::RouterError;

/// Maximum inline headers before heap allocation.
pub const MAX_INLINE_HEADERS: usize = 4;

/// Response header storage; names are shared, values are per response.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// What the dispatcher hands back to the transport.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderVec,
    /// Response body
    pub body: String,
}

impl Response {
    /// A response with the given status, headers and body.
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec, body: String) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// 200 with a rendered HTML body.
    #[must_use]
    pub fn html(body: String) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((
            Arc::from(CONTENT_TYPE.as_str()),
            "text/html; charset=utf-8".to_string(),
        ));
        Self::new(200, headers, body)
    }

    /// A redirect to `location` with `status`.
    #[must_use]
    pub fn redirect(location: String, status: u16) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from(LOCATION.as_str()), location));
        Self::new(status, headers, String::new())
    }

    /// A JSON error body for `status`.
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((
            Arc::from(CONTENT_TYPE.as_str()),
            "application/json".to_string(),
        ));
        let body = serde_json::json!({ "error": message, "status": status }).to_string();
        Self::new(status, headers, body)
    }

    /// Get a header by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or replace a header.
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }

    /// Whether this is a 3xx response.
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// Convert into an `http::Response` for the hosting server.
    pub fn into_http(self) -> Result<http::Response<String>, http::Error> {
        let mut builder = http::Response::builder().status(StatusCode::from_u16(self.status)?);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_ref(), value.as_str());
        }
        builder.body(self.body)
    }
}

impl From<&RouterError> for Response {
    fn from(err: &RouterError) -> Self {
        let status = err.status_code();
        let message = match err {
            RouterError::NoRouteMatched { .. } => "Not Found",
            _ => "Internal Server Error",
        };
        Response::error(status, message)
    }
}
