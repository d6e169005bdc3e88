//! Authentication provider trait
//!
//! The [`TokenManager`](super::TokenManager) decides *when* to refresh or
//! re-authenticate; an `AuthProvider` knows *how*.

use super::types::{AuthResult, TokenSet};
use async_trait::async_trait;

/// Core trait for authentication providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Run the full interactive authentication and obtain fresh tokens
    async fn authenticate(&self) -> AuthResult<TokenSet>;

    /// Exchange a refresh token for a new token set without user interaction
    async fn refresh(&self, refresh_token: &str) -> AuthResult<TokenSet>;

    /// Get provider name for logging/debugging
    fn name(&self) -> &str;
}
