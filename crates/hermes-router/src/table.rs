//! Method-indexed route storage with insertion-order lookup.

use std::sync::Arc;

use http::Method;
use indexmap::IndexMap;
use tracing::warn;

use crate::error::PatternError;
use crate::params::Params;
use crate::route::{Route, RouteSpec};
use crate::template::PathTemplate;

/// The fixed, compiled-in set of supported HTTP verbs.
///
/// Restricted to the common verbs; registrations for anything else are
/// skipped. Capability discovery announces exactly this set.
pub const SUPPORTED_METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::HEAD,
    Method::OPTIONS,
];

/// A mapping from HTTP method to an insertion-ordered map of raw path
/// pattern string to [`Route`].
///
/// The table is built during bootstrap and read-only while serving; this
/// phase separation is a caller-enforced invariant, and it is what makes
/// lock-free concurrent lookups sound.
///
/// Lookup yields routes in registration order, and the **first** template
/// that matches wins. Overlapping patterns must therefore be registered
/// most-specific-first by the caller; the table never resolves ambiguity
/// itself.
///
/// # Example
///
/// ```rust
/// use hermes_router::{RouteSpec, RouteTable};
/// use http::Method;
///
/// let mut table: RouteTable<&str> = RouteTable::new();
/// table
///     .add_route(RouteSpec::new("/users/{id}").pattern("id", "[0-9]+").get("show"))
///     .unwrap();
///
/// let (route, params) = table.find_match(&Method::GET, "/users/7").unwrap();
/// assert_eq!(*route.handler(), "show");
/// assert_eq!(params.get("id"), Some("7"));
/// ```
#[derive(Debug)]
pub struct RouteTable<H> {
    routes: IndexMap<Method, IndexMap<String, Route<H>>>,
    warn_on_duplicate: bool,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RouteTable<H> {
    /// Creates an empty table with duplicate-registration warnings enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: IndexMap::new(),
            warn_on_duplicate: true,
        }
    }

    /// Returns the fixed set of supported verbs.
    ///
    /// Independent of which verbs actually have registered routes.
    #[must_use]
    pub fn supported_methods() -> &'static [Method] {
        &SUPPORTED_METHODS
    }

    /// Returns true if the method is in the compiled-in verb set.
    #[must_use]
    pub fn is_supported(method: &Method) -> bool {
        SUPPORTED_METHODS.contains(method)
    }

    /// Enables or disables the duplicate-registration warning.
    pub fn set_duplicate_warning(&mut self, warn: bool) {
        self.warn_on_duplicate = warn;
    }

    /// Compiles the spec's template once and registers one route per
    /// supplied method.
    ///
    /// Re-registering an identical (method, path) pair silently replaces
    /// the stored route — last write wins, keeping the original insertion
    /// position. Replaced routes are returned so bootstrap code can treat
    /// an overwrite as fatal if it wants to; a `warn!` diagnostic is also
    /// emitted unless disabled. Methods outside the supported set are
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if the path pattern or one of its token
    /// overrides does not compile; nothing is registered in that case.
    pub fn add_route(&mut self, spec: RouteSpec<H>) -> Result<Vec<Route<H>>, PatternError> {
        let RouteSpec {
            path,
            overrides,
            handlers,
            source,
        } = spec;

        let template = Arc::new(PathTemplate::compile(&path, &overrides)?);
        let mut replaced = Vec::new();

        for (method, handler) in handlers {
            if !Self::is_supported(&method) {
                warn!(method = %method, path = %path, "skipping route for unsupported method");
                continue;
            }

            let route = Route::new(
                method.clone(),
                Arc::clone(&template),
                handler,
                source.clone(),
            );
            let per_method = self.routes.entry(method.clone()).or_default();
            if let Some(previous) = per_method.insert(path.clone(), route) {
                if self.warn_on_duplicate {
                    warn!(method = %method, path = %path, "route overwritten, last registration wins");
                }
                replaced.push(previous);
            }
        }

        Ok(replaced)
    }

    /// Iterates the routes registered for a method, in registration order.
    pub fn lookup(&self, method: &Method) -> impl Iterator<Item = &Route<H>> {
        self.routes
            .get(method)
            .into_iter()
            .flat_map(IndexMap::values)
    }

    /// Finds the first route for `method` whose template matches `uri`.
    #[must_use]
    pub fn find_match(&self, method: &Method, uri: &str) -> Option<(&Route<H>, Params)> {
        self.lookup(method)
            .find_map(|route| route.template().match_uri(uri).map(|params| (route, params)))
    }

    /// Iterates the registered path patterns for a method, in registration
    /// order. Introspection only.
    pub fn patterns(&self, method: &Method) -> impl Iterator<Item = &str> {
        self.routes
            .get(method)
            .into_iter()
            .flat_map(IndexMap::keys)
            .map(String::as_str)
    }

    /// Iterates every registered route, grouped by method.
    pub fn iter(&self) -> impl Iterator<Item = &Route<H>> {
        self.routes.values().flat_map(IndexMap::values)
    }

    /// Returns the total number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.values().map(IndexMap::len).sum()
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
