// Rust guideline compliant 2026-10-15

//! Configuration management for sen2cli.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_API_BASE_URL: &str = "https://api.sen2cube.at/v1";
const DEFAULT_AUTH_BASE_URL: &str =
    "https://auth.sen2cube.at/realms/sen2cube-at/protocol/openid-connect";

/// Environment variables read by [`Config::load`].
const ENV_OVERRIDES: &[&str] = &[
    "IQ_API_BASE_URL",
    "IQ_AUTH_BASE_URL",
    "IQ_AUTH_USER_INFO_URL",
    "IQ_CLI_CONFIG_PATH_TOKENFILE",
    "IQ_DEFAULT_CSV_DELIMITER",
    "IQ_REQUEST_TIMEOUT_SECS",
    "IQ_OWNER",
];

/// Runtime configuration, built once per invocation and passed by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the JSON:API backend.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL of the OpenID Connect realm.
    #[serde(default = "default_auth_base_url")]
    pub auth_base_url: String,

    /// OpenID Connect userinfo endpoint; derived from `auth_base_url` when unset.
    #[serde(default)]
    pub auth_user_info_url: Option<String>,

    /// File holding the OAuth2 token.
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,

    /// Field delimiter for CSV output.
    #[serde(default = "default_csv_delimiter")]
    pub csv_delimiter: char,

    /// Whole-request timeout for backend calls.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Owner recorded on newly created inferences.
    #[serde(default)]
    pub owner: Option<String>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_auth_base_url() -> String {
    DEFAULT_AUTH_BASE_URL.to_string()
}

fn default_token_file() -> PathBuf {
    Config::config_dir().join("token.json")
}

fn default_csv_delimiter() -> char {
    ';'
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            auth_base_url: default_auth_base_url(),
            auth_user_info_url: None,
            token_file: default_token_file(),
            csv_delimiter: default_csv_delimiter(),
            request_timeout_secs: default_request_timeout(),
            owner: None,
        }
    }
}

impl Config {
    /// Directory holding the token and config files.
    ///
    /// `IQ_CLI_CONFIG_PATH` wins; otherwise `~/.iq-cli`.
    #[must_use]
    pub fn config_dir() -> PathBuf {
        if let Ok(path) = std::env::var("IQ_CLI_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".iq-cli")
    }

    /// Userinfo endpoint queried by `session info`.
    #[must_use]
    pub fn user_info_url(&self) -> String {
        match &self.auth_user_info_url {
            Some(url) => url.clone(),
            None => format!("{}/userinfo", self.auth_base_url.trim_end_matches('/')),
        }
    }

    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. `config_file`, or `config.toml` in [`Config::config_dir`] when not given
    /// 3. Environment variables with `IQ_` prefix
    ///
    /// # Arguments
    ///
    /// * `config_file` - Explicit configuration file; must exist when given
    ///
    /// # Returns
    ///
    /// A validated Config.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An explicit configuration file does not exist
    /// - The configuration file cannot be read or is invalid TOML
    /// - An environment override cannot be parsed
    /// - Configuration values fail validation
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let path = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                Some(path.to_path_buf())
            }
            None => {
                let path = Self::config_dir().join("config.toml");
                path.exists().then_some(path)
            }
        };

        let mut config = match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config file");
                let content = std::fs::read_to_string(&path)?;
                toml::from_str(&content)
                    .map_err(|e| Error::Config(format!("invalid config file: {}", e)))?
            }
            None => Self::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an override value cannot be parsed.
    fn apply_env_overrides(&mut self) -> Result<()> {
        for name in ENV_OVERRIDES {
            let Ok(value) = std::env::var(name) else {
                continue;
            };
            match *name {
                "IQ_API_BASE_URL" => self.api_base_url = value,
                "IQ_AUTH_BASE_URL" => self.auth_base_url = value,
                "IQ_AUTH_USER_INFO_URL" => self.auth_user_info_url = Some(value),
                "IQ_CLI_CONFIG_PATH_TOKENFILE" => self.token_file = PathBuf::from(value),
                "IQ_DEFAULT_CSV_DELIMITER" => {
                    let mut chars = value.chars();
                    self.csv_delimiter = match (chars.next(), chars.next()) {
                        (Some(c), None) => c,
                        _ => {
                            return Err(Error::Config(
                                "IQ_DEFAULT_CSV_DELIMITER must be a single character".to_string(),
                            ))
                        }
                    };
                }
                "IQ_REQUEST_TIMEOUT_SECS" => {
                    self.request_timeout_secs = value.parse().map_err(|_| {
                        Error::Config(
                            "IQ_REQUEST_TIMEOUT_SECS must be a positive number".to_string(),
                        )
                    })?;
                }
                "IQ_OWNER" => self.owner = Some(value),
                _ => {}
            }
        }
        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a base or endpoint URL is not http(s)
    /// - the CSV delimiter is a quote or line break
    /// - the request timeout is zero
    fn validate(&self) -> Result<()> {
        let user_info_url = self.user_info_url();
        for (name, url) in [
            ("api_base_url", &self.api_base_url),
            ("auth_base_url", &self.auth_base_url),
            ("auth_user_info_url", &user_info_url),
        ] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(Error::Config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }

        if matches!(self.csv_delimiter, '"' | '\n' | '\r') {
            return Err(Error::Config(format!(
                "csv_delimiter cannot be {:?}",
                self.csv_delimiter
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(Error::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
