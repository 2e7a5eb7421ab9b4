// Rust guideline compliant 2026-10-16

//! Stored OAuth2 credentials.
//!
//! The token file is written by the login flow and holds at least
//! `access_token`, `token_type` and `expires_at` (Unix seconds, possibly
//! fractional). This module only reads it; obtaining and refreshing tokens
//! is the identity provider's business.

use crate::error::{AppError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Supplies the credential attached to every backend request.
pub trait TokenProvider {
    /// Returns a usable, non-expired bearer credential.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if no usable credential is available.
    fn bearer(&self) -> Result<BearerToken>;
}

/// Credential type and value for the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
    token_type: String,
    access_token: String,
}

impl BearerToken {
    #[must_use]
    pub fn new(token_type: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            token_type: token_type.into(),
            access_token: access_token.into(),
        }
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("token_type", &self.token_type)
            .field("access_token", &"••••••••")
            .finish()
    }
}

#[derive(Deserialize)]
struct StoredToken {
    access_token: String,
    token_type: String,
    expires_at: f64,
    #[serde(default)]
    expires_in: Option<f64>,
    #[serde(default)]
    refresh_expires_in: Option<f64>,
}

/// Expiry information of a stored token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenStatus {
    /// When the access token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// When the refresh token stops being accepted, if the file says.
    pub refresh_until: Option<DateTime<Utc>>,
}

impl TokenStatus {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// True while the session can still be refreshed.
    #[must_use]
    pub fn can_refresh(&self, now: DateTime<Utc>) -> bool {
        self.refresh_until.is_some_and(|until| now <= until)
    }
}

/// Token stored as JSON on disk.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<StoredToken> {
        if !self.path.is_file() {
            return Err(AppError::Auth(format!(
                "token file does not exist: {}",
                self.path.display()
            )));
        }

        tracing::debug!(path = %self.path.display(), "loading token");
        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| {
            AppError::Auth(format!(
                "token file {} is invalid or empty: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Reads the expiry information of the stored token.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if the file is missing or invalid.
    pub fn status(&self) -> Result<TokenStatus> {
        self.read()?.status()
    }
}

impl StoredToken {
    fn status(&self) -> Result<TokenStatus> {
        let expires_at = timestamp(self.expires_at)?;
        let refresh_until = match (self.expires_in, self.refresh_expires_in) {
            (Some(expires_in), Some(refresh_in)) => {
                let issued = self.expires_at - expires_in;
                Some(timestamp(issued + refresh_in)?)
            }
            _ => None,
        };
        Ok(TokenStatus {
            expires_at,
            refresh_until,
        })
    }
}

fn timestamp(seconds: f64) -> Result<DateTime<Utc>> {
    let whole = seconds.trunc() as i64;
    let nanos = (seconds.fract() * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
    DateTime::from_timestamp(whole, nanos)
        .ok_or_else(|| AppError::Auth(format!("token timestamp out of range: {}", seconds)))
}

impl TokenProvider for TokenFile {
    fn bearer(&self) -> Result<BearerToken> {
        let token = self.read()?;
        let status = token.status()?;
        let now = Utc::now();
        if status.is_expired(now) {
            let hint = if status.can_refresh(now) {
                "refresh the session"
            } else {
                "log in again"
            };
            return Err(AppError::Auth(format!(
                "session token expired at {}; {}",
                status.expires_at, hint
            )));
        }
        if status.expires_at - now < Duration::seconds(30) {
            tracing::warn!(expires_at = %status.expires_at, "session token about to expire");
        }

        Ok(BearerToken::new(token.token_type, token.access_token))
    }
}
