//! Error types raised while compiling path templates.

use thiserror::Error;

/// Errors produced when a path pattern cannot be compiled.
///
/// All variants are registration-time failures: a pattern that does not
/// compile never reaches the route table, and bootstrap is expected to
/// abort on the first one.
#[derive(Error, Debug)]
pub enum PatternError {
    /// The pattern contains an unmatched `{` or a stray `}`.
    #[error("unbalanced token delimiters in pattern '{pattern}'")]
    UnbalancedDelimiters {
        /// The offending pattern.
        pattern: String,
    },

    /// A token name is empty or contains characters outside `[A-Za-z0-9_]`.
    #[error("invalid token name '{name}' in pattern '{pattern}'")]
    InvalidTokenName {
        /// The offending pattern.
        pattern: String,
        /// The rejected token name.
        name: String,
    },

    /// The same token name appears more than once in one pattern.
    #[error("duplicate token '{name}' in pattern '{pattern}'")]
    DuplicateToken {
        /// The offending pattern.
        pattern: String,
        /// The repeated token name.
        name: String,
    },

    /// A matching override was supplied for a token the pattern does not define.
    #[error("override for unknown token '{name}' in pattern '{pattern}'")]
    UnknownOverride {
        /// The pattern the override was registered against.
        pattern: String,
        /// The token name that does not occur in the pattern.
        name: String,
    },

    /// A matching override is not a valid regular expression.
    #[error("invalid matching expression for token '{name}'")]
    InvalidExpression {
        /// The token whose override failed to compile.
        name: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// The assembled matcher failed to compile.
    ///
    /// This is the residual case: every override compiled on its own, but
    /// the combined expression did not (for example an override that
    /// declares a capture group colliding with a token name).
    #[error("failed to compile matcher for pattern '{pattern}'")]
    Compile {
        /// The offending pattern.
        pattern: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },
}

impl PatternError {
    /// Creates an unbalanced-delimiters error.
    #[must_use]
    pub fn unbalanced(pattern: impl Into<String>) -> Self {
        Self::UnbalancedDelimiters {
            pattern: pattern.into(),
        }
    }

    /// Creates an invalid-token-name error.
    #[must_use]
    pub fn invalid_token(pattern: impl Into<String>, name: impl Into<String>) -> Self {
        Self::InvalidTokenName {
            pattern: pattern.into(),
            name: name.into(),
        }
    }

    /// Creates a duplicate-token error.
    #[must_use]
    pub fn duplicate_token(pattern: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateToken {
            pattern: pattern.into(),
            name: name.into(),
        }
    }

    /// Creates an unknown-override error.
    #[must_use]
    pub fn unknown_override(pattern: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownOverride {
            pattern: pattern.into(),
            name: name.into(),
        }
    }
}
