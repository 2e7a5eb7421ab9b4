// Rust guideline compliant 2026-10-17

//! Details of the stored session shown by `session info`.

use crate::client::TransportError;
use crate::document;
use crate::error::{AppError, Result};
use crate::http::transport_error;
use crate::token::{BearerToken, TokenFile, TokenProvider, TokenStatus};
use chrono::{DateTime, Utc};
use sen2_core::Config;
use serde::Deserialize;
use std::time::Duration;
use ureq::Agent;

/// Claims returned by the identity provider's userinfo endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Stored token state plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    /// Where the token was read from.
    pub token_file: String,
    pub status: TokenStatus,
    /// Login name, known only while the access token is valid.
    pub username: Option<String>,
}

/// Asks the identity provider who `token` belongs to.
///
/// # Errors
///
/// Returns `AppError::Auth` if the provider rejects the token, and
/// `AppError::Transport` for any other failure.
pub fn fetch_user_info(url: &str, token: &BearerToken, timeout: Duration) -> Result<UserInfo> {
    let config = Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build();
    let agent = Agent::new_with_config(config);

    tracing::debug!(url, "fetching user info");
    let mut response = agent
        .get(url)
        .header("Authorization", token.authorization())
        .header("Accept", "application/json")
        .call()
        .map_err(transport_error)?;
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(transport_error)?;

    match status {
        200..=299 => serde_json::from_str(&body).map_err(|e| {
            TransportError::Document(format!("invalid userinfo response: {}", e)).into()
        }),
        401 | 403 => Err(AppError::Auth(format!(
            "identity provider rejected the session token (HTTP {})",
            status
        ))),
        _ => Err(TransportError::Status {
            status,
            message: document::error_message(&body),
        }
        .into()),
    }
}

/// Reads the token state and, while the token is valid, the logged-in user.
///
/// A failed user lookup is logged and leaves `username` empty; the expiry
/// information is still worth showing.
///
/// # Errors
///
/// Returns `AppError::Auth` if the token file is missing or invalid.
pub fn session_info(
    config: &Config,
    token_file: &TokenFile,
    now: DateTime<Utc>,
) -> Result<SessionInfo> {
    let status = token_file.status()?;

    let username = if status.is_expired(now) {
        None
    } else {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        match token_file
            .bearer()
            .and_then(|bearer| fetch_user_info(&config.user_info_url(), &bearer, timeout))
        {
            Ok(info) => info.preferred_username,
            Err(e) => {
                tracing::warn!(error = %e, "could not look up the logged-in user");
                None
            }
        }
    };

    Ok(SessionInfo {
        token_file: token_file.path().display().to_string(),
        status,
        username,
    })
}
