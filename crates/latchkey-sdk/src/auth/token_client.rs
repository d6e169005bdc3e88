//! Token endpoint client
//!
//! Performs the two grants this crate needs against the token endpoint:
//! exchanging an authorization code and refreshing with a refresh token.
//! Both are form-encoded POSTs authenticated with HTTP Basic client
//! credentials.

use super::types::{AuthConfig, AuthError, AuthResult, TokenResponse, TokenSet};
use tracing::{debug, info, warn};

/// Client for the OAuth token endpoint
#[derive(Debug, Clone)]
pub struct TokenClient {
    http_client: reqwest::Client,
    token_endpoint: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl TokenClient {
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            http_client,
            token_endpoint: config.token_endpoint.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
        })
    }

    /// Refresh an access token without user interaction
    ///
    /// If the server does not rotate the refresh token, the one passed in is
    /// kept on the returned set.
    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<TokenSet> {
        debug!("Refreshing access token");

        let tokens = self
            .request_tokens(
                &[
                    ("grant_type", "refresh_token"),
                    ("refresh_token", refresh_token),
                ],
                Some(refresh_token),
            )
            .await?;

        info!("Token refresh completed successfully");
        Ok(tokens)
    }

    /// Exchange an authorization code for tokens
    pub async fn exchange_code(&self, code: &str) -> AuthResult<TokenSet> {
        debug!("Exchanging authorization code for tokens");

        let tokens = self
            .request_tokens(
                &[
                    ("grant_type", "authorization_code"),
                    ("code", code),
                    ("redirect_uri", self.redirect_uri.as_str()),
                ],
                None,
            )
            .await?;

        info!("Token exchange completed successfully");
        Ok(tokens)
    }

    async fn request_tokens(
        &self,
        form: &[(&str, &str)],
        previous_refresh: Option<&str>,
    ) -> AuthResult<TokenSet> {
        let response = self
            .http_client
            .post(&self.token_endpoint)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(form)
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint = %self.token_endpoint, error = %e, "Token request failed");
                AuthError::Network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                endpoint = %self.token_endpoint,
                status = status.as_u16(),
                body = %body,
                "Token endpoint rejected request"
            );
            return Err(AuthError::TokenExchange {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            AuthError::InvalidResponse(format!("Failed to parse token response: {}", e))
        })?;

        if let Some(scope) = &token_response.scope {
            debug!(scope = %scope, "Token endpoint granted scopes");
        }

        Ok(token_response.into_token_set(previous_refresh))
    }
}
