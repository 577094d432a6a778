//! Core error types for deskline-core.
//!
//! Errors exist only at the ingestion boundary (catalog JSON, policy TOML,
//! time-of-day strings). Availability evaluation itself never errors: bad
//! schedule data resolves to "closed" / "unavailable" instead.

use thiserror::Error;

/// Core error type for deskline-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Catalog ingestion errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Policy configuration errors
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    /// Time-of-day parsing errors
    #[error("Time parse error: {0}")]
    TimeParse(#[from] TimeParseError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Catalog ingestion errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Two resources share the same identifier
    #[error("Duplicate resource id: {0}")]
    DuplicateId(String),
}

/// Policy configuration errors.
#[derive(Error, Debug)]
pub enum PolicyError {
    /// Failed to parse the policy document
    #[error("Failed to parse policy: {0}")]
    ParseFailed(String),

    /// A policy value is out of range
    #[error("Invalid policy value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Time-of-day parsing errors.
#[derive(Error, Debug)]
pub enum TimeParseError {
    /// Input was not a minute-resolution 24-hour wall-clock time
    #[error("Invalid time of day '{0}': expected HH:MM")]
    InvalidTimeOfDay(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
