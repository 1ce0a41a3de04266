//! The request value object.

use hermes_router::Params;
use http::Method;

/// A request as seen by middleware and handlers.
///
/// This is deliberately thin: the method and path are supplied by the
/// transport adapter, and the parameter map is filled in by dispatch once a
/// template has matched. Wire-level concerns (headers, body, raw URI
/// parsing) stay with the transport.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    params: Params,
}

impl Request {
    /// Creates a request with no extracted parameters.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Params::new(),
        }
    }

    /// Creates a request carrying extracted parameters.
    #[must_use]
    pub fn with_params(method: Method, path: impl Into<String>, params: Params) -> Self {
        Self {
            method,
            path: path.into(),
            params,
        }
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the normalized request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the extracted path parameters.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Returns one extracted parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }
}
