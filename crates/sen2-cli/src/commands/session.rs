// Rust guideline compliant 2026-10-17

//! Implementation of the `sen2cli session info` command.

use crate::OutputFormatter;
use anyhow::Result;
use chrono::Utc;
use sen2_app::{session_info, TokenFile};
use sen2_core::Config;
use std::path::Path;

/// Shows who is logged in, when the stored session expires and until when
/// it can be refreshed.
///
/// # Errors
///
/// Returns an error if the token file is missing or invalid.
pub fn execute_info(
    config: &Config,
    token_file: &Path,
    formatter: &dyn OutputFormatter,
) -> Result<String> {
    let session = session_info(config, &TokenFile::new(token_file), Utc::now())?;
    Ok(formatter.format_session(&session, Utc::now()))
}
