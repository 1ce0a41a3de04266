//! Attach-time middleware errors.

use thiserror::Error;

/// A middleware could not be attached through the named-factory path.
///
/// Both variants are attach-time validation failures: the chain is left
/// exactly as it was, and only the failing `attach` call is aborted.
#[derive(Error, Debug)]
pub enum ChainError {
    /// No factory is registered under the requested name.
    #[error("no middleware factory registered under '{name}'")]
    UnknownMiddleware {
        /// The unrecognized factory name.
        name: String,
    },

    /// The factory ran but could not construct a conforming instance.
    #[error("middleware '{name}' could not be constructed: {reason}")]
    Construction {
        /// The factory name.
        name: String,
        /// Why construction failed (typically a parameter payload problem).
        reason: String,
    },
}

impl ChainError {
    /// Creates an unknown-middleware error.
    #[must_use]
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownMiddleware { name: name.into() }
    }

    /// Creates a construction-failure error.
    #[must_use]
    pub fn construction(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Construction {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
