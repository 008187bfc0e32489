//! Core error types for Presskit.
//!
//! Subsystem crates define their own error enums; this module holds the
//! errors raised by the shared model and the configuration layer.

use thiserror::Error;

/// Errors from the shared model.
#[derive(Error, Debug)]
pub enum PresskitError {
    /// Configuration could not be loaded or is invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A value does not satisfy a model invariant (e.g. a malformed listing id)
    #[error("validation error: {0}")]
    Validation(String),
}

/// Errors from loading, overriding and validating [`crate::AppConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No home directory to derive the XDG paths from
    #[error("could not determine config directory (no home directory)")]
    NoConfigDir,

    /// `--config` pointed at a file that does not exist
    #[error("config file not found at {path}")]
    NotFound {
        /// Requested path
        path: String,
    },

    /// The file is not valid TOML for [`crate::AppConfig`]
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Rendering the effective configuration failed
    #[error("failed to render config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Reading the file failed
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// A value (from the file, the environment or a flag) is unusable
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Dotted field name, e.g. `discovery.offsets`
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Result type for shared-model operations.
pub type Result<T> = std::result::Result<T, PresskitError>;

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
