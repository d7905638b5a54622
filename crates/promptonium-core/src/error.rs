//! Core error types for promptonium-core.
//!
//! Most of the practice flow cannot fail: ignored submissions are reported as
//! outcomes, not errors. What remains is configuration, catalog lookups, the
//! session stub and the background attempt task.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for promptonium-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Challenge catalog errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Session errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Authentication outcome errors
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The background attempt task stopped without reporting an outcome
    #[error("Attempt task failed: {0}")]
    AttemptTask(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Config directory could not be determined or created
    #[error("Configuration directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Challenge catalog errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown challenge: {0}")]
    UnknownChallenge(String),

    #[error("Unknown difficulty '{0}' (expected beginner, intermediate or advanced)")]
    UnknownDifficulty(String),
}

/// Session errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No user is logged in")]
    NotLoggedIn,
}

/// Login and registration failures.
///
/// The demo identity stub never produces these, but callers still handle
/// them so a real backend can be slotted in without changing signatures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Registration failed: {0}")]
    RegistrationRejected(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Unknown enum name
    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

impl From<tokio::task::JoinError> for CoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        CoreError::AttemptTask(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
