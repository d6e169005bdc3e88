//! Authentication-related types and data structures
//!
//! This module defines the types used throughout the auth module
//! including configuration, token data, and error types.

use latchkey_common::OAuthSettings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret, sent with HTTP Basic auth to the token endpoint
    pub client_secret: String,
    /// OAuth authorization endpoint URL
    pub auth_endpoint: String,
    /// OAuth token endpoint URL
    pub token_endpoint: String,
    /// Redirect URI for OAuth callback
    pub redirect_uri: String,
    /// OAuth scopes to request
    pub scopes: Vec<String>,
    /// Local port the callback server binds to
    pub callback_port: u16,
    /// Deadline for the browser redirect
    pub callback_timeout: Duration,
    /// Timeout for token endpoint requests
    pub http_timeout: Duration,
    /// Additional authorization request parameters
    pub additional_params: BTreeMap<String, String>,
}

impl AuthConfig {
    /// Default deadline for the browser redirect (5 minutes)
    pub const DEFAULT_CALLBACK_TIMEOUT: Duration = Duration::from_secs(300);

    /// Path component of the redirect URI, served by the callback server
    pub fn redirect_path(&self) -> AuthResult<String> {
        let url = Url::parse(&self.redirect_uri)
            .map_err(|e| AuthError::Config(format!("Invalid redirect URI: {}", e)))?;
        Ok(url.path().to_string())
    }
}

impl From<&OAuthSettings> for AuthConfig {
    fn from(settings: &OAuthSettings) -> Self {
        Self {
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
            auth_endpoint: settings.auth_endpoint.clone(),
            token_endpoint: settings.token_endpoint.clone(),
            redirect_uri: settings.redirect_uri.clone(),
            scopes: settings.scopes.clone(),
            callback_port: settings.callback_port,
            callback_timeout: settings.callback_timeout(),
            http_timeout: settings.http_timeout(),
            additional_params: settings.extra_auth_params.clone(),
        }
    }
}

/// Current local time as Unix epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// OAuth token set minted from a token endpoint response
///
/// The absolute expiry is derived from the local clock when the set is
/// minted and never recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenSet {
    access_token: String,
    refresh_token: Option<String>,
    token_type: String,
    expires_in: u64,
    expires_at_ms: i64,
}

impl TokenSet {
    /// Mint a token set issued now
    pub fn issue(
        access_token: String,
        refresh_token: Option<String>,
        token_type: String,
        expires_in: u64,
    ) -> Self {
        Self::issued_at(access_token, refresh_token, token_type, expires_in, now_millis())
    }

    pub(crate) fn issued_at(
        access_token: String,
        refresh_token: Option<String>,
        token_type: String,
        expires_in: u64,
        issued_at_ms: i64,
    ) -> Self {
        let lifetime_ms = i64::try_from(expires_in)
            .unwrap_or(i64::MAX)
            .saturating_mul(1000);
        Self {
            access_token,
            refresh_token,
            token_type,
            expires_in,
            expires_at_ms: issued_at_ms.saturating_add(lifetime_ms),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Lifetime in seconds as returned by the authorization server
    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    /// Absolute expiry as Unix epoch milliseconds
    pub fn expires_at_ms(&self) -> i64 {
        self.expires_at_ms
    }

    /// Check if the token expires within the specified duration
    pub fn expires_within(&self, duration: Duration) -> bool {
        let margin = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
        self.expires_at_ms <= now_millis().saturating_add(margin)
    }

    /// Check if the access token is expired
    pub fn is_expired(&self) -> bool {
        self.expires_within(Duration::ZERO)
    }

    /// Get time until token expiration, zero once expired
    pub fn time_until_expiry(&self) -> Duration {
        let remaining = self.expires_at_ms.saturating_sub(now_millis());
        Duration::from_millis(u64::try_from(remaining).unwrap_or(0))
    }

    /// Value for an `Authorization` header, e.g. `Bearer abc`
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// Successful token endpoint response body
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    pub expires_in: u64,
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenResponse {
    /// Mint a token set, keeping `previous_refresh` when the server did not rotate it
    pub fn into_token_set(self, previous_refresh: Option<&str>) -> TokenSet {
        let refresh_token = self
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_string));
        TokenSet::issue(
            self.access_token,
            refresh_token,
            self.token_type.unwrap_or_else(|| "Bearer".to_string()),
            self.expires_in,
        )
    }
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Token endpoint answered with a non-success status
    #[error("Token exchange failed with status {status} {status_text}")]
    TokenExchange {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Authorization server redirected back with an `error` parameter
    #[error("Authorization failed: {error}")]
    OAuthCallback {
        error: String,
        description: Option<String>,
    },

    /// No decisive callback arrived before the deadline
    #[error("Authorization timed out after {0:?}")]
    Timeout(Duration),

    /// The browser could not be opened
    #[error("Failed to open browser: {0}")]
    BrowserLaunch(String),

    /// Callback server error
    #[error("Callback server error: {0}")]
    CallbackServerError(String),

    /// Network error talking to the token endpoint
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid OAuth response
    #[error("Invalid OAuth response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_derived_from_issue_time() {
        let tokens = TokenSet::issued_at(
            "a".to_string(),
            None,
            "Bearer".to_string(),
            3600,
            1_000,
        );
        assert_eq!(tokens.expires_at_ms(), 1_000 + 3_600_000);
        assert_eq!(tokens.expires_in(), 3600);
    }

    #[test]
    fn test_issue_uses_current_clock() {
        let before = now_millis();
        let tokens = TokenSet::issue("a".to_string(), None, "Bearer".to_string(), 60);
        let after = now_millis();
        assert!(tokens.expires_at_ms() >= before + 60_000);
        assert!(tokens.expires_at_ms() <= after + 60_000);
    }

    #[test]
    fn test_expires_within_buffer() {
        let tokens = TokenSet::issue("a".to_string(), None, "Bearer".to_string(), 120);
        assert!(!tokens.is_expired());
        assert!(tokens.expires_within(Duration::from_secs(300)));
        assert!(!tokens.expires_within(Duration::from_secs(60)));
    }

    #[test]
    fn test_expired_token() {
        let tokens = TokenSet::issued_at(
            "a".to_string(),
            None,
            "Bearer".to_string(),
            10,
            now_millis() - 60_000,
        );
        assert!(tokens.is_expired());
        assert_eq!(tokens.time_until_expiry(), Duration::ZERO);
    }

    #[test]
    fn test_response_keeps_previous_refresh_token() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"access_token":"A2","expires_in":3600}"#).unwrap();
        let tokens = response.into_token_set(Some("R1"));
        assert_eq!(tokens.refresh_token(), Some("R1"));
        assert_eq!(tokens.token_type(), "Bearer");
        assert_eq!(tokens.authorization_header(), "Bearer A2");
    }

    #[test]
    fn test_response_rotated_refresh_token_wins() {
        let response: TokenResponse = serde_json::from_str(
            r#"{"access_token":"A2","refresh_token":"R2","token_type":"bearer","expires_in":60}"#,
        )
        .unwrap();
        let tokens = response.into_token_set(Some("R1"));
        assert_eq!(tokens.refresh_token(), Some("R2"));
        assert_eq!(tokens.token_type(), "bearer");
    }

    #[test]
    fn test_redirect_path() {
        let config = AuthConfig::from(&OAuthSettings {
            redirect_uri: "http://127.0.0.1:8765/oauth/callback".to_string(),
            ..OAuthSettings::default()
        });
        assert_eq!(config.redirect_path().unwrap(), "/oauth/callback");
        assert_eq!(config.callback_timeout, AuthConfig::DEFAULT_CALLBACK_TIMEOUT);
    }
}
