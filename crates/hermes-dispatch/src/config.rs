//! Dispatcher configuration.
//!
//! Configuration is loaded once at bootstrap, before the registry is
//! frozen. There is deliberately little of it: the dispatch core's behavior
//! is fixed, and only its diagnostics and URI handling are tunable.

use std::path::{Path, PathBuf};

use hermes_middleware::Registry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunable dispatcher behavior.
///
/// # Example
///
/// ```rust
/// use hermes_dispatch::DispatchConfig;
///
/// let config = DispatchConfig::from_toml_str(
///     "warn_on_duplicate_route = false\n",
/// )
/// .unwrap();
/// assert!(!config.warn_on_duplicate_route);
/// assert!(config.decode_uri);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DispatchConfig {
    /// Emit a warning when a (method, path) registration overwrites an
    /// earlier one. The overwrite itself always happens; last write wins.
    pub warn_on_duplicate_route: bool,

    /// Strip query/fragment and percent-decode the raw URI before
    /// matching. Disable only if the transport already hands over decoded
    /// paths.
    pub decode_uri: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            warn_on_duplicate_route: true,
            decode_uri: true,
        }
    }
}

impl DispatchConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed or unknown fields.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, or
    /// [`ConfigError::Parse`] when its contents do not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Applies the registration-time settings to a registry being built.
    pub fn apply(&self, registry: &mut Registry) {
        registry.set_duplicate_warning(self.warn_on_duplicate_route);
    }
}

/// Errors raised while loading dispatcher configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    Read {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text did not parse.
    #[error("failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
