//! Token management with automatic refresh and caching
//!
//! The TokenManager is the single entry point for obtaining a usable token.
//! On each call it reuses the cached token, refreshes it, or falls back to a
//! full interactive authentication, in that order.

use super::provider::AuthProvider;
use super::token_store::TokenStore;
use super::types::{AuthResult, TokenSet};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Manages tokens with automatic refresh and caching
pub struct TokenManager {
    provider: Box<dyn AuthProvider>,
    store: Mutex<TokenStore>,
    safety_buffer: Duration,
}

impl TokenManager {
    /// Tokens expiring within this window are treated as already expired
    pub const SAFETY_BUFFER: Duration = Duration::from_secs(5 * 60);

    /// Create a new token manager with an empty cache
    pub fn new(provider: Box<dyn AuthProvider>) -> Self {
        Self {
            provider,
            store: Mutex::new(TokenStore::new()),
            safety_buffer: Self::SAFETY_BUFFER,
        }
    }

    /// Create a token manager seeded with an existing token set
    pub fn with_token_set(provider: Box<dyn AuthProvider>, token_set: TokenSet) -> Self {
        let mut store = TokenStore::new();
        store.set(token_set);
        Self {
            provider,
            store: Mutex::new(store),
            safety_buffer: Self::SAFETY_BUFFER,
        }
    }

    /// Override the pre-expiry safety buffer
    pub fn with_safety_buffer(mut self, safety_buffer: Duration) -> Self {
        self.safety_buffer = safety_buffer;
        self
    }

    /// Return a currently valid token set, refreshing or re-authenticating as needed
    ///
    /// The cache stays locked for the whole call, so concurrent callers
    /// share a single refresh or authorization attempt.
    pub async fn authenticate(&self) -> AuthResult<TokenSet> {
        let mut store = self.store.lock().await;

        // 1. Reuse a cached token that outlives the safety buffer
        if let Some(token_set) = store.get() {
            if !token_set.expires_within(self.safety_buffer) {
                debug!("Using cached token");
                return Ok(token_set.clone());
            }
        }

        // 2. Try to refresh if expired/expiring
        let refresh_token = store
            .get()
            .and_then(|token_set| token_set.refresh_token())
            .map(str::to_string);
        if let Some(refresh_token) = refresh_token {
            debug!("Token expired or expiring soon, refreshing");
            match self.provider.refresh(&refresh_token).await {
                Ok(new_tokens) => {
                    info!(provider = self.provider.name(), "Token refreshed successfully");
                    store.set(new_tokens.clone());
                    return Ok(new_tokens);
                }
                Err(e) => {
                    warn!(
                        provider = self.provider.name(),
                        error = %e,
                        "Token refresh failed, re-authenticating"
                    );
                    store.clear();
                }
            }
        }

        // 3. Re-authenticate if refresh fails or no tokens available
        info!(
            "No valid tokens available, authenticating with {}",
            self.provider.name()
        );
        match self.provider.authenticate().await {
            Ok(tokens) => {
                info!(provider = self.provider.name(), "Authentication succeeded");
                store.set(tokens.clone());
                Ok(tokens)
            }
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "Authentication failed");
                Err(e)
            }
        }
    }

    /// Get a valid access token (handles refresh automatically)
    pub async fn access_token(&self) -> AuthResult<String> {
        Ok(self.authenticate().await?.access_token().to_string())
    }

    /// Drop the cached token set
    pub async fn clear_cache(&self) {
        self.store.lock().await.clear();
        debug!("Token cache cleared");
    }

    /// Get the current cached token set (if any), without validity checks
    pub async fn cached_tokens(&self) -> Option<TokenSet> {
        self.store.lock().await.get().cloned()
    }
}
