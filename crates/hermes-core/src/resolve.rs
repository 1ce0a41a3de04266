//! Lazy handler resolution.
//!
//! A route may carry a source locator alongside its handler reference. The
//! dispatcher funnels every invocation through a [`HandlerResolver`], so an
//! embedder can load or swap the callable at the last moment (for example
//! by locating it in an external handler bundle). The default resolver
//! returns the stored reference unchanged.

use std::path::Path;
use std::sync::Arc;

use crate::error::ResolveError;
use crate::handler::SharedHandler;

/// Resolves a route's handler reference into the callable to invoke.
pub trait HandlerResolver: Send + Sync {
    /// Resolves the callable for one dispatch.
    ///
    /// `source` is the route's optional handler-source locator; resolvers
    /// that do not load from external sources may ignore it.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] when the callable cannot be produced;
    /// dispatch surfaces it to the caller and invokes nothing.
    fn resolve(
        &self,
        handler: &SharedHandler,
        source: Option<&Path>,
    ) -> Result<SharedHandler, ResolveError>;
}

/// The default resolver: hands back the registered reference as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectResolver;

impl HandlerResolver for DirectResolver {
    fn resolve(
        &self,
        handler: &SharedHandler,
        _source: Option<&Path>,
    ) -> Result<SharedHandler, ResolveError> {
        Ok(Arc::clone(handler))
    }
}
