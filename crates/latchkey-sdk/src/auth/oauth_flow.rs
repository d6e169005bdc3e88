//! OAuth 2.0 authorization code flow
//!
//! Drives one interactive authorization: build the authorization URL, start
//! the local callback server, open the browser, wait for the redirect, then
//! exchange the code at the token endpoint.

use super::browser::BrowserLauncher;
use super::callback_server::CallbackServer;
use super::token_client::TokenClient;
use super::types::{AuthConfig, AuthError, AuthResult, TokenSet};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

/// Authorization code flow runner
pub struct OAuthFlow {
    config: AuthConfig,
    token_client: TokenClient,
    browser: Arc<dyn BrowserLauncher>,
}

impl OAuthFlow {
    pub fn new(
        config: AuthConfig,
        token_client: TokenClient,
        browser: Arc<dyn BrowserLauncher>,
    ) -> Self {
        debug!(
            "Initializing OAuth flow with client_id: {}",
            config.client_id
        );
        Self {
            config,
            token_client,
            browser,
        }
    }

    /// Build the authorization URL for the OAuth provider
    ///
    /// The URL is fully determined by configuration: no `state` or PKCE
    /// challenge is attached.
    pub fn build_auth_url(&self) -> AuthResult<String> {
        let mut params: Vec<(&str, String)> = vec![
            ("response_type", "code".to_string()),
            ("client_id", self.config.client_id.clone()),
            ("redirect_uri", self.config.redirect_uri.clone()),
            ("scope", self.config.scopes.join(" ")),
        ];
        params.extend(
            self.config
                .additional_params
                .iter()
                .map(|(key, value)| (key.as_str(), value.clone())),
        );

        let url = Url::parse_with_params(&self.config.auth_endpoint, &params)
            .map_err(|e| AuthError::Config(format!("Invalid auth endpoint: {}", e)))?;
        Ok(url.to_string())
    }

    /// Run the full interactive flow and return freshly minted tokens
    pub async fn run_full_flow(&self) -> AuthResult<TokenSet> {
        info!("Starting OAuth flow");

        let auth_url = self.build_auth_url()?;
        let server =
            CallbackServer::bind(self.config.callback_port, &self.config.redirect_path()?).await?;

        // Fire and forget: the flow waits for the callback either way
        let browser = Arc::clone(&self.browser);
        let launch_url = auth_url.clone();
        let launch = AbortOnDrop(tokio::spawn(async move {
            if let Err(e) = browser.open(&launch_url).await {
                warn!(error = %e, url = %launch_url, "Could not open browser, open the URL manually");
            }
        }));

        info!(url = %auth_url, "Waiting for authorization callback");
        let outcome = server.wait(self.config.callback_timeout).await;
        drop(launch);

        let code = match outcome {
            Ok(code) => code,
            Err(e) => {
                warn!(error = %e, "Authorization flow failed");
                return Err(e);
            }
        };

        let token_set = self.token_client.exchange_code(&code).await?;

        info!("OAuth flow completed successfully");
        Ok(token_set)
    }
}

/// Aborts the launch task when the flow finishes or is cancelled
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SystemBrowser;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn config() -> AuthConfig {
        AuthConfig {
            client_id: "client-1".to_string(),
            client_secret: "secret".to_string(),
            auth_endpoint: "https://auth.example.com/authorize".to_string(),
            token_endpoint: "https://auth.example.com/oauth/token".to_string(),
            redirect_uri: "http://127.0.0.1:8765/callback".to_string(),
            scopes: vec!["openid".to_string(), "api.read".to_string()],
            callback_port: 8765,
            callback_timeout: Duration::from_secs(300),
            http_timeout: Duration::from_secs(30),
            additional_params: BTreeMap::new(),
        }
    }

    fn flow(config: AuthConfig) -> OAuthFlow {
        let token_client = TokenClient::new(&config).unwrap();
        OAuthFlow::new(config, token_client, Arc::new(SystemBrowser))
    }

    #[test]
    fn test_auth_url_contains_standard_params() {
        let url = Url::parse(&flow(config()).build_auth_url().unwrap()).unwrap();
        let params: BTreeMap<String, String> = url.query_pairs().into_owned().collect();

        assert_eq!(url.path(), "/authorize");
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["client_id"], "client-1");
        assert_eq!(params["redirect_uri"], "http://127.0.0.1:8765/callback");
        assert_eq!(params["scope"], "openid api.read");
        assert!(!params.contains_key("state"));
        assert!(!params.contains_key("code_challenge"));
    }

    #[test]
    fn test_auth_url_is_deterministic() {
        let flow = flow(config());
        assert_eq!(flow.build_auth_url().unwrap(), flow.build_auth_url().unwrap());
    }

    #[test]
    fn test_auth_url_appends_extra_params() {
        let mut config = config();
        config
            .additional_params
            .insert("audience".to_string(), "https://api.example.com".to_string());
        let url = flow(config).build_auth_url().unwrap();
        assert!(url.contains("audience=https%3A%2F%2Fapi.example.com"));
    }

    #[test]
    fn test_invalid_auth_endpoint() {
        let mut config = config();
        config.auth_endpoint = "not a url".to_string();
        assert!(matches!(
            flow(config).build_auth_url(),
            Err(AuthError::Config(_))
        ));
    }
}
