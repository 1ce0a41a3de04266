//! Error types for the handler boundary.

use thiserror::Error;

/// A handler reference could not be resolved into a callable.
///
/// Raised by [`HandlerResolver`](crate::HandlerResolver) implementations;
/// dispatch propagates it without retrying.
#[derive(Error, Debug)]
#[error("failed to resolve handler: {message}")]
pub struct ResolveError {
    /// Human-readable description of the failure.
    message: String,
    /// The underlying error, when one exists.
    #[source]
    source: Option<anyhow::Error>,
}

impl ResolveError {
    /// Creates a resolution error with a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a resolution error with an underlying cause.
    pub fn with_source(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the failure description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
