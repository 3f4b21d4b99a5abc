//! Core error types for jar-core.
//!
//! Capacity calculations are pure, so most failures here are validation
//! failures raised at the ingestion boundary. Configuration and snapshot
//! loading add the usual I/O and parse errors on top.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for jar-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Capacity validation errors
    #[error("Capacity error: {0}")]
    Capacity(#[from] CapacityError),

    /// Date or bucket parsing errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot file could not be read
    #[error("Failed to read snapshot at {path}: {source}")]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation failures of the capacity engine inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapacityError {
    /// Nominal hours not positive/finite, or overhead factor outside (0, 1)
    #[error("Invalid capacity profile: {message}")]
    InvalidCapacityProfile { message: String },

    /// Unknown bucket, bad hours value or malformed date
    #[error("Invalid commitment '{id}': {reason}")]
    InvalidCommitment { id: String, reason: String },

    /// Real capacity is zero or negative, so no fill level can be derived
    #[error("Degenerate capacity: real capacity is {real_capacity}")]
    DegenerateCapacity { real_capacity: f64 },
}

impl CapacityError {
    pub(crate) fn profile(message: impl Into<String>) -> Self {
        CapacityError::InvalidCapacityProfile {
            message: message.into(),
        }
    }

    pub(crate) fn commitment(id: impl Into<String>, reason: impl Into<String>) -> Self {
        CapacityError::InvalidCommitment {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Failures parsing the string fields of persisted records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Date not in `YYYY-MM-DD` form or not a calendar day
    #[error("invalid date '{value}' (expected YYYY-MM-DD): {reason}")]
    InvalidDate { value: String, reason: String },

    /// Bucket name other than rock, pebble or sand
    #[error("unknown bucket '{0}'")]
    UnknownBucket(String),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
