//! The ordered middleware collection.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::ChainError;
use crate::middleware::Middleware;

/// A shared, type-erased middleware instance.
pub type SharedMiddleware = Arc<dyn Middleware>;

/// A typed constructor registered under a name.
///
/// Factories take a parameter payload (usually deserialized into the
/// middleware's own config struct) and either produce an instance or fail
/// with a [`ChainError`]. This is the dynamic construction path; statically
/// known middleware attaches directly via
/// [`MiddlewareChain::attach`].
pub type MiddlewareFactory =
    Box<dyn Fn(&serde_json::Value) -> Result<SharedMiddleware, ChainError> + Send + Sync>;

/// An ordered collection of middleware instances.
///
/// Attachment order is iteration order, and iteration order is the de facto
/// priority for preroute short-circuiting. The chain stores instances and
/// factories; it never invokes hooks itself — that is the dispatcher's job.
///
/// # Example
///
/// ```rust
/// use hermes_middleware::{Middleware, MiddlewareChain};
///
/// struct Audit;
/// impl Middleware for Audit {
///     fn name(&self) -> &'static str {
///         "audit"
///     }
/// }
///
/// let mut chain = MiddlewareChain::new();
/// let handle = chain.attach(Audit);
/// assert_eq!(handle.name(), "audit");
/// assert_eq!(chain.names(), vec!["audit"]);
/// ```
#[derive(Default)]
pub struct MiddlewareChain {
    entries: Vec<SharedMiddleware>,
    factories: HashMap<String, MiddlewareFactory>,
}

impl MiddlewareChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a statically known middleware and returns a typed handle to
    /// the attached instance.
    pub fn attach<M: Middleware>(&mut self, middleware: M) -> Arc<M> {
        let handle = Arc::new(middleware);
        debug!(middleware = handle.name(), "middleware attached");
        self.entries.push(Arc::clone(&handle) as SharedMiddleware);
        handle
    }

    /// Registers a named factory for the dynamic construction path.
    ///
    /// Re-registering a name replaces the previous factory.
    pub fn register_factory<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&serde_json::Value) -> Result<SharedMiddleware, ChainError> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Constructs and appends a middleware through its registered factory.
    ///
    /// Returns the attached instance so the caller can retain a handle.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::UnknownMiddleware`] when no factory is
    /// registered under `name`, or the factory's own
    /// [`ChainError::Construction`] when it cannot build an instance from
    /// `params`. In either case nothing is appended to the chain.
    pub fn attach_named(
        &mut self,
        name: &str,
        params: &serde_json::Value,
    ) -> Result<SharedMiddleware, ChainError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ChainError::unknown(name))?;
        let instance = factory(params)?;
        debug!(middleware = instance.name(), factory = name, "middleware attached");
        self.entries.push(Arc::clone(&instance));
        Ok(instance)
    }

    /// Iterates instances in attachment order.
    pub fn iter(&self) -> impl Iterator<Item = &SharedMiddleware> {
        self.entries.iter()
    }

    /// Returns the attached middleware names, in order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|m| m.name()).collect()
    }

    /// Returns the number of attached instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for MiddlewareChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareChain")
            .field("entries", &self.names())
            .field("factories", &self.factories.len())
            .finish()
    }
}
