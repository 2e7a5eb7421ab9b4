// Rust guideline compliant 2026-10-17

//! Command implementations for the sen2cli CLI.
//!
//! Each command returns the rendered text to print; the binary decides
//! where it goes.

pub mod create;
pub mod filters;
pub mod list;
pub mod session;
pub mod update;

use sen2_app::{AppError, JsonApiClient, TokenFile, TokenProvider};
use sen2_core::Config;
use std::path::Path;
use std::time::Duration;

/// Opens a backend session authorized with the token stored in `token_file`.
///
/// # Errors
///
/// Returns `AppError::Auth` if the token is missing, invalid or expired.
pub fn connect(config: &Config, token_file: &Path) -> Result<JsonApiClient, AppError> {
    let bearer = TokenFile::new(token_file).bearer()?;
    tracing::debug!(api = %config.api_base_url, "opening backend session");
    Ok(JsonApiClient::new(
        &config.api_base_url,
        &bearer,
        Duration::from_secs(config.request_timeout_secs),
    ))
}
