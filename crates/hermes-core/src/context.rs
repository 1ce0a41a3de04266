//! Per-dispatch request context.

use std::fmt;

use hermes_router::Params;
use http::Method;

use crate::handler::SharedHandler;

/// Introspection context handed to middleware during the preroute phase.
///
/// For a matched dispatch it carries the raw pattern string of the matched
/// template, the method, the extracted parameters, and the handler about to
/// run. On the capability-discovery path no route was selected, so the
/// pattern and handler are absent. Created per dispatch attempt and never
/// persisted beyond it.
#[derive(Clone)]
pub struct RequestContext {
    pattern: Option<String>,
    method: Method,
    params: Params,
    handler: Option<SharedHandler>,
}

impl RequestContext {
    /// Builds the context for a matched dispatch.
    #[must_use]
    pub fn matched(
        pattern: impl Into<String>,
        method: Method,
        params: Params,
        handler: SharedHandler,
    ) -> Self {
        Self {
            pattern: Some(pattern.into()),
            method,
            params,
            handler: Some(handler),
        }
    }

    /// Builds the empty context used on the capability-discovery path.
    #[must_use]
    pub fn discovery(method: Method) -> Self {
        Self {
            pattern: None,
            method,
            params: Params::new(),
            handler: None,
        }
    }

    /// Returns the raw pattern string of the matched template, if a route
    /// was selected.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Returns the HTTP method of the dispatch.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the extracted path parameters (empty when no route matched).
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Returns the handler selected for invocation, if a route was
    /// selected.
    #[must_use]
    pub fn handler(&self) -> Option<&SharedHandler> {
        self.handler.as_ref()
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("pattern", &self.pattern)
            .field("method", &self.method)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
