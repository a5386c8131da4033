//! Core error types for pawpal-core.
//!
//! This module defines the error hierarchy using thiserror. Planning itself
//! never fails: an empty plan is a result, not an error. Errors come from
//! rejected task updates, malformed time strings and configuration I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pawpal-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML decoding errors
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML encoding errors
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not determine where the config lives
    #[error("Cannot resolve configuration directory: {0}")]
    NoConfigDir(String),

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
}

/// Validation errors raised by task constructors and mutators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Duration must be strictly positive
    #[error("duration must be a positive integer (got {0})")]
    NonPositiveDuration(i64),

    /// Priority must not be negative
    #[error("priority must be a non-negative integer (got {0})")]
    NegativePriority(i64),

    /// Minute-of-day outside 0..=1439
    #[error("due time must be within 0..=1439 minutes after midnight (got {0})")]
    DueTimeOutOfRange(u32),

    /// Could not parse an `HH:MM` string
    #[error("invalid time of day '{0}': expected HH:MM")]
    InvalidTimeOfDay(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
