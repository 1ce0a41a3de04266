//! Route records and the registration builder.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use http::Method;

use crate::template::{ParamOverrides, PathTemplate};

/// A single (method, template, handler) binding.
///
/// Routes are created by [`RouteTable::add_route`](crate::RouteTable::add_route),
/// replaced wholesale when the same (method, path) is registered again, and
/// never mutated in place. The handler payload `H` is opaque to this crate;
/// the dispatch layer stores its shared handler references here.
#[derive(Debug, Clone)]
pub struct Route<H> {
    method: Method,
    template: Arc<PathTemplate>,
    handler: H,
    source: Option<PathBuf>,
}

impl<H> Route<H> {
    pub(crate) fn new(
        method: Method,
        template: Arc<PathTemplate>,
        handler: H,
        source: Option<PathBuf>,
    ) -> Self {
        Self {
            method,
            template,
            handler,
            source,
        }
    }

    /// Returns the HTTP method this route is registered under.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the compiled template.
    #[must_use]
    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// Returns the handler payload.
    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Returns the optional handler-source locator.
    ///
    /// When present, the dispatch layer hands it to its handler resolver so
    /// the callable can be loaded lazily from an external source.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Builder describing one registration: a path, its token overrides, and a
/// handler per method.
///
/// One compiled template is shared by every method registered through the
/// same spec.
///
/// # Example
///
/// ```rust
/// use hermes_router::{RouteSpec, RouteTable};
///
/// let mut table: RouteTable<&str> = RouteTable::new();
/// table
///     .add_route(
///         RouteSpec::new("/users/{id}")
///             .pattern("id", "[0-9]+")
///             .get("show_user")
///             .delete("remove_user"),
///     )
///     .unwrap();
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RouteSpec<H> {
    pub(crate) path: String,
    pub(crate) overrides: ParamOverrides,
    pub(crate) handlers: Vec<(Method, H)>,
    pub(crate) source: Option<PathBuf>,
}

impl<H> RouteSpec<H> {
    /// Starts a spec for the given path pattern.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            overrides: ParamOverrides::new(),
            handlers: Vec::new(),
            source: None,
        }
    }

    /// Binds a custom matching expression to a token name.
    #[must_use]
    pub fn pattern(mut self, token: impl Into<String>, expr: impl Into<String>) -> Self {
        self.overrides.insert(token.into(), expr.into());
        self
    }

    /// Attaches a handler-source locator shared by every method of this spec.
    #[must_use]
    pub fn source(mut self, locator: impl Into<PathBuf>) -> Self {
        self.source = Some(locator.into());
        self
    }

    /// Registers a handler for an arbitrary method.
    #[must_use]
    pub fn method(mut self, method: Method, handler: H) -> Self {
        self.handlers.push((method, handler));
        self
    }

    /// Registers a GET handler.
    #[must_use]
    pub fn get(self, handler: H) -> Self {
        self.method(Method::GET, handler)
    }

    /// Registers a POST handler.
    #[must_use]
    pub fn post(self, handler: H) -> Self {
        self.method(Method::POST, handler)
    }

    /// Registers a PUT handler.
    #[must_use]
    pub fn put(self, handler: H) -> Self {
        self.method(Method::PUT, handler)
    }

    /// Registers a PATCH handler.
    #[must_use]
    pub fn patch(self, handler: H) -> Self {
        self.method(Method::PATCH, handler)
    }

    /// Registers a DELETE handler.
    #[must_use]
    pub fn delete(self, handler: H) -> Self {
        self.method(Method::DELETE, handler)
    }

    /// Registers a HEAD handler.
    #[must_use]
    pub fn head(self, handler: H) -> Self {
        self.method(Method::HEAD, handler)
    }

    /// Registers an OPTIONS handler.
    #[must_use]
    pub fn options(self, handler: H) -> Self {
        self.method(Method::OPTIONS, handler)
    }
}
