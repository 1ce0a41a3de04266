//! The bootstrap registry.
//!
//! The registry gathers the two pieces of shared dispatch state, the route
//! table and the middleware chain, into one explicit object. It is built
//! mutably during bootstrap, then frozen (typically behind an `Arc`) for
//! the serving phase. Whether a process has one registry or several is the
//! embedder's choice; nothing here is global.

use std::fmt;
use std::sync::Arc;

use hermes_core::SharedHandler;
use hermes_router::{PatternError, Route, RouteSpec, RouteTable};

use crate::chain::{MiddlewareChain, SharedMiddleware};
use crate::error::ChainError;
use crate::middleware::Middleware;

/// Routes and middleware for one dispatcher, built once at bootstrap.
///
/// Registration must complete before serving begins; the registry performs
/// no synchronization of its own, so mutating it while dispatches are in
/// flight is undefined behavior at the application level. After bootstrap
/// it is read-only and safe to share across threads.
///
/// # Example
///
/// ```rust
/// use hermes_core::{Request, Response, SharedHandler};
/// use hermes_middleware::Registry;
/// use hermes_router::RouteSpec;
/// use std::sync::Arc;
///
/// let mut registry = Registry::new();
/// let handler: SharedHandler = Arc::new(|_: &Request, _: &mut Response| None);
/// registry
///     .add_route(RouteSpec::new("/ping").get(handler))
///     .unwrap();
///
/// let registry = Arc::new(registry); // frozen for serving
/// assert_eq!(registry.routes().len(), 1);
/// ```
#[derive(Default)]
pub struct Registry {
    routes: RouteTable<SharedHandler>,
    middleware: MiddlewareChain,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers routes from a spec; see
    /// [`RouteTable::add_route`](hermes_router::RouteTable::add_route) for
    /// the overwrite and ordering semantics.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] when the spec's pattern does not compile;
    /// bootstrap should treat this as fatal.
    pub fn add_route(
        &mut self,
        spec: RouteSpec<SharedHandler>,
    ) -> Result<Vec<Route<SharedHandler>>, PatternError> {
        self.routes.add_route(spec)
    }

    /// Attaches a statically known middleware; see
    /// [`MiddlewareChain::attach`].
    pub fn attach<M: Middleware>(&mut self, middleware: M) -> Arc<M> {
        self.middleware.attach(middleware)
    }

    /// Registers a named middleware factory; see
    /// [`MiddlewareChain::register_factory`].
    pub fn register_factory<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&serde_json::Value) -> Result<SharedMiddleware, ChainError> + Send + Sync + 'static,
    {
        self.middleware.register_factory(name, factory);
    }

    /// Constructs and attaches a middleware through its registered factory;
    /// see [`MiddlewareChain::attach_named`].
    ///
    /// # Errors
    ///
    /// Propagates the chain's [`ChainError`]; the chain is unchanged on
    /// failure.
    pub fn attach_named(
        &mut self,
        name: &str,
        params: &serde_json::Value,
    ) -> Result<SharedMiddleware, ChainError> {
        self.middleware.attach_named(name, params)
    }

    /// Enables or disables the duplicate-registration warning on the route
    /// table.
    pub fn set_duplicate_warning(&mut self, warn: bool) {
        self.routes.set_duplicate_warning(warn);
    }

    /// Returns the route table, for lookup and introspection.
    #[must_use]
    pub fn routes(&self) -> &RouteTable<SharedHandler> {
        &self.routes
    }

    /// Returns the middleware chain, for iteration and introspection.
    #[must_use]
    pub fn middleware(&self) -> &MiddlewareChain {
        &self.middleware
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("routes", &self.routes.len())
            .field("middleware", &self.middleware.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_core::{Request, Response};
    use http::Method;

    struct Probe;

    impl Middleware for Probe {
        fn name(&self) -> &'static str {
            "probe"
        }
    }

    fn noop_handler() -> SharedHandler {
        Arc::new(|_: &Request, _: &mut Response| None)
    }

    #[test]
    fn test_registry_collects_routes_and_middleware() {
        let mut registry = Registry::new();
        registry
            .add_route(RouteSpec::new("/a").get(noop_handler()))
            .unwrap();
        registry
            .add_route(RouteSpec::new("/b").post(noop_handler()))
            .unwrap();
        registry.attach(Probe);

        assert_eq!(registry.routes().len(), 2);
        assert_eq!(registry.middleware().names(), vec!["probe"]);
        assert!(registry
            .routes()
            .find_match(&Method::GET, "/a")
            .is_some());
    }

    #[test]
    fn test_registry_pattern_error_propagates() {
        let mut registry = Registry::new();
        let result = registry.add_route(RouteSpec::new("/broken/{").get(noop_handler()));
        assert!(result.is_err());
        assert!(registry.routes().is_empty());
    }
}
