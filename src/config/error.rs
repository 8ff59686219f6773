//! Configuration-specific error types.

use std::path::PathBuf;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File path was not set
    #[error("Configuration file path not set")]
    FilePathNotSet,

    /// Access token was not set
    #[error("Access token not set")]
    AccessTokenNotSet,

    /// API key was not set
    #[error("API key not set")]
    ApiKeyNotSet,

    /// A URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to find home directory
    #[error("Failed to find home directory")]
    HomeDirectoryNotFound,

    /// Failed to load configuration file
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration file
    #[error("Failed to save configuration to {path}: {source}")]
    SaveFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create configuration directory
    #[error("Failed to create configuration directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize configuration
    #[error("Failed to serialize configuration: {0}")]
    SerializationFailed(String),

    /// Failed to deserialize configuration
    #[error("Failed to deserialize configuration: {0}")]
    DeserializationFailed(String),
}
