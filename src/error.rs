//! Application-wide error types.
//!
//! This module defines the main error type hierarchy for the application,
//! allowing for type-safe error handling throughout the codebase.

pub use crate::config::ConfigError;
pub use crate::nav::NavError;
pub use crate::state::StateError;
pub use crate::trello::FetchError;

/// Main application error type.
///
/// This is the top-level error type that encompasses all error types
/// in the application. It uses `thiserror` for automatic error derivation
/// and conversion.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Trello API-related errors
    #[error("Trello API error: {0}")]
    Trello(#[from] FetchError),

    /// Navigation errors
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavError),

    /// State management errors
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Logger initialization errors
    #[error("Logger error: {0}")]
    Logger(String),
}
