//! Dispatch-time error types.

use hermes_core::ResolveError;
use thiserror::Error;

/// Errors surfaced by [`Dispatcher::dispatch`](crate::Dispatcher::dispatch).
///
/// A middleware abort is **not** an error; it is reported through the
/// success variant [`DispatchOutcome::Aborted`](crate::DispatchOutcome::Aborted)
/// so callers can tell a deliberate short-circuit from a routing failure.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No registered route matched and the method was not OPTIONS.
    ///
    /// The transport layer is expected to map this to its not-found class
    /// of response.
    #[error("no route matches {method} {path}")]
    InvalidPath {
        /// The request method as supplied by the transport.
        method: String,
        /// The normalized request path.
        path: String,
    },

    /// The matched route's handler could not be resolved.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl DispatchError {
    /// Creates an invalid-path error.
    #[must_use]
    pub fn invalid_path(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self::InvalidPath {
            method: method.into(),
            path: path.into(),
        }
    }
}
