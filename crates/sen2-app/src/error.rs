// Rust guideline compliant 2026-10-15

//! Error handling for sen2cli application services.

use crate::client::TransportError;
use sen2_core::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for application-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Stable error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Input validation failed before any remote call.
    ValidationError,
    /// Configuration is invalid or names an ungoverned transition.
    ConfigError,
    /// No usable credential.
    AuthError,
    /// The backend could not be reached or answered with an error.
    TransportError,
    /// IO failure while reading local files.
    IoError,
    /// JSON serialization or parsing failed.
    JsonError,
}

impl ErrorCode {
    /// Code for an error raised by the core library.
    #[must_use]
    pub fn for_core(error: &CoreError) -> Self {
        match error {
            CoreError::Validation(_) | CoreError::InvalidStatus(_) => ErrorCode::ValidationError,
            CoreError::Config(_) => ErrorCode::ConfigError,
            CoreError::Io(_) => ErrorCode::IoError,
            CoreError::Json(_) => ErrorCode::JsonError,
        }
    }

    /// Process exit code for the error class.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCode::ValidationError | ErrorCode::ConfigError => 2,
            ErrorCode::AuthError => 3,
            ErrorCode::TransportError => 4,
            ErrorCode::IoError | ErrorCode::JsonError => 1,
        }
    }
}

/// Application-level errors with stable mapping to error codes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Error from core library operations.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The stored credential is missing, invalid or expired.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A remote call failed; distinct from an empty result.
    #[error("Could not execute request: {0}")]
    Transport(#[from] TransportError),

    /// The requested target has no transition allow-list.
    #[error("No transition rules for target {0}")]
    UnsupportedTransition(String),

    /// IO error not represented by core errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Returns a stable error code for the error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Auth(_) => ErrorCode::AuthError,
            AppError::Transport(_) => ErrorCode::TransportError,
            AppError::UnsupportedTransition(_) => ErrorCode::ConfigError,
            AppError::Io(_) => ErrorCode::IoError,
            AppError::Core(core) => ErrorCode::for_core(core),
        }
    }

    /// Returns structured details for errors that benefit from extra context.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::Transport(TransportError::Status { status, .. }) => {
                Some(serde_json::json!({ "http_status": status }))
            }
            AppError::UnsupportedTransition(target) => {
                Some(serde_json::json!({ "target": target }))
            }
            _ => None,
        }
    }
}
