// Rust guideline compliant 2026-10-17

//! JSON documents printed by `--output_format json`.
//!
//! A command prints `{"status":"ok","action":..,"result":..}` on stdout when
//! it succeeds and `{"status":"error","error":{..}}` on stderr when it fails.

use crate::error::ErrorCode;
use serde::Serialize;

/// Result of one inference or session command.
#[derive(Debug, Serialize)]
pub struct SuccessEnvelope<T> {
    /// Always `ok`.
    pub status: &'static str,
    /// `count`, `rerun`, `abort`, `delete`, `create` or `session_info`.
    pub action: &'static str,
    pub result: T,
}

impl<T> SuccessEnvelope<T> {
    #[must_use]
    pub fn new(action: &'static str, result: T) -> Self {
        Self {
            status: "ok",
            action,
            result,
        }
    }
}

/// Why a command failed.
///
/// `code` is stable and maps to the exit status; `message` is for humans.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub code: ErrorCode,
    pub message: String,
    /// Extra context such as the HTTP status the backend answered with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Borrowed `{"status":"error","error":..}` wrapper.
#[derive(Debug, Serialize)]
pub struct ErrorDocument<'a> {
    status: &'static str,
    error: &'a ErrorEnvelope,
}

impl ErrorEnvelope {
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: Option<serde_json::Value>) -> Self {
        self.details = details;
        self
    }

    /// The document printed for this failure.
    #[must_use]
    pub fn document(&self) -> ErrorDocument<'_> {
        ErrorDocument {
            status: "error",
            error: self,
        }
    }
}
