//! Layered configuration for Latchkey
//!
//! Sources are merged in increasing priority:
//! 1. Built-in defaults
//! 2. A TOML file (`latchkey.toml` in the working directory, or an explicit path)
//! 3. Environment variables prefixed with `LATCHKEY_`, using `__` for nesting
//!    (e.g. `LATCHKEY_OAUTH__CLIENT_ID`)

use crate::error::ConfigurationError;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "latchkey.toml";

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "LATCHKEY_";

const MASKED_SECRET: &str = "********";

/// OAuth client registration and local callback settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthSettings {
    /// Authorization endpoint the browser is sent to
    pub auth_endpoint: String,

    /// Token endpoint used for code exchange and refresh
    pub token_endpoint: String,

    /// Registered client ID
    pub client_id: String,

    /// Registered client secret
    pub client_secret: String,

    /// Redirect URI registered with the authorization server
    pub redirect_uri: String,

    /// Scopes requested, in order
    #[serde(default)]
    pub scopes: Vec<String>,

    /// Local port the callback listener binds to
    pub callback_port: u16,

    /// How long to wait for the browser redirect, in seconds
    pub callback_timeout_secs: u64,

    /// Timeout for token endpoint requests, in seconds
    pub http_timeout_secs: u64,

    /// Extra query parameters appended to the authorization URL
    #[serde(default)]
    pub extra_auth_params: BTreeMap<String, String>,
}

impl Default for OAuthSettings {
    fn default() -> Self {
        Self {
            auth_endpoint: String::new(),
            token_endpoint: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: "http://127.0.0.1:8765/callback".to_string(),
            scopes: Vec::new(),
            callback_port: 8765,
            callback_timeout_secs: 300,
            http_timeout_secs: 30,
            extra_auth_params: BTreeMap::new(),
        }
    }
}

impl OAuthSettings {
    pub fn callback_timeout(&self) -> Duration {
        Duration::from_secs(self.callback_timeout_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Check that the settings describe a usable client registration
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.client_id.trim().is_empty() {
            return Err(ConfigurationError::missing("oauth.client_id"));
        }
        if self.client_secret.is_empty() {
            return Err(ConfigurationError::missing("oauth.client_secret"));
        }

        parse_http_url("oauth.auth_endpoint", &self.auth_endpoint)?;
        parse_http_url("oauth.token_endpoint", &self.token_endpoint)?;
        let redirect = parse_http_url("oauth.redirect_uri", &self.redirect_uri)?;

        // The browser is redirected to this port, so the listener must own it
        if redirect.port_or_known_default() != Some(self.callback_port) {
            return Err(ConfigurationError::invalid(
                "oauth.callback_port",
                format!(
                    "port {} does not match redirect URI {}",
                    self.callback_port, self.redirect_uri
                ),
            ));
        }

        if self.callback_timeout_secs == 0 {
            return Err(ConfigurationError::invalid(
                "oauth.callback_timeout_secs",
                "must be greater than 0",
            ));
        }

        Ok(())
    }
}

fn parse_http_url(key: &str, value: &str) -> Result<Url, ConfigurationError> {
    if value.trim().is_empty() {
        return Err(ConfigurationError::missing(key));
    }
    let url = Url::parse(value).map_err(|e| ConfigurationError::invalid(key, e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigurationError::invalid(
            key,
            format!("unsupported scheme '{other}'"),
        )),
    }
}

/// Top-level Latchkey configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LatchkeyConfig {
    /// OAuth client configuration
    pub oauth: OAuthSettings,
}

impl LatchkeyConfig {
    /// Load configuration from defaults, an optional TOML file and the environment
    ///
    /// An explicit `path` must exist; without one, `latchkey.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigurationError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                debug!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    debug!("Loading configuration from: {}", default_path.display());
                    figment = figment.merge(Toml::file(default_path));
                }
            }
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(|e| ConfigurationError::ParseError {
            details: e.to_string(),
        })
    }

    /// Load and validate in one step
    pub fn load_validated(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        let config = Self::load(path)?;
        config.oauth.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML with the client secret masked
    pub fn to_masked_toml(&self) -> Result<String, ConfigurationError> {
        let mut masked = self.clone();
        if !masked.oauth.client_secret.is_empty() {
            masked.oauth.client_secret = MASKED_SECRET.to_string();
        }
        toml::to_string_pretty(&masked).map_err(|e| ConfigurationError::ParseError {
            details: format!("Failed to serialize config: {e}"),
        })
    }
}
