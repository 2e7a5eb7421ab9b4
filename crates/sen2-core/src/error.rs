// Rust guideline compliant 2026-10-14

//! Error types for the sen2cli core library.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Caller input failed validation before any remote call was made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Status text that does not name a known inference status.
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Invalid configuration file or override.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
