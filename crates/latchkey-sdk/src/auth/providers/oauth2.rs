//! OAuth2 authorization code provider
//!
//! This provider implements the OAuth 2.0 authorization code flow
//! for interactive authentication via browser, and refresh-token renewal.

use crate::auth::{
    browser::{BrowserLauncher, SystemBrowser},
    oauth_flow::OAuthFlow,
    provider::AuthProvider,
    token_client::TokenClient,
    types::{AuthConfig, AuthResult, TokenSet},
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// OAuth2 provider for interactive authentication
pub struct OAuth2Provider {
    flow: OAuthFlow,
    token_client: TokenClient,
}

impl OAuth2Provider {
    /// Create a provider that opens the system browser
    pub fn new(config: AuthConfig) -> AuthResult<Self> {
        Self::with_browser(config, Arc::new(SystemBrowser))
    }

    /// Create a provider with a custom browser launcher
    pub fn with_browser(config: AuthConfig, browser: Arc<dyn BrowserLauncher>) -> AuthResult<Self> {
        let token_client = TokenClient::new(&config)?;
        let flow = OAuthFlow::new(config, token_client.clone(), browser);
        Ok(Self { flow, token_client })
    }

    /// Authorization URL the browser is sent to
    pub fn authorization_url(&self) -> AuthResult<String> {
        self.flow.build_auth_url()
    }
}

#[async_trait]
impl AuthProvider for OAuth2Provider {
    async fn authenticate(&self) -> AuthResult<TokenSet> {
        debug!("Starting OAuth2 authorization code flow");
        self.flow.run_full_flow().await
    }

    async fn refresh(&self, refresh_token: &str) -> AuthResult<TokenSet> {
        debug!("Refreshing OAuth2 token");
        self.token_client.refresh(refresh_token).await
    }

    fn name(&self) -> &str {
        "OAuth2"
    }
}
