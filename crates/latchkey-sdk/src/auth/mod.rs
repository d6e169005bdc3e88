//! Authentication module for Latchkey SDK
//!
//! This module provides OAuth 2.0 authentication capabilities including:
//! - Authorization code flow through the user's browser
//! - Local HTTP callback server for the authorization redirect
//! - Token endpoint client for code exchange and refresh
//! - In-memory token caching with automatic refresh

pub mod browser;
pub mod callback_server;
pub mod manager;
pub mod oauth_flow;
pub mod provider;
pub mod providers;
pub mod token_client;
pub mod token_store;
pub mod types;

// Re-export commonly used types
pub use browser::{BrowserLauncher, SystemBrowser};
pub use manager::TokenManager;
pub use oauth_flow::OAuthFlow;
pub use provider::AuthProvider;
pub use providers::OAuth2Provider;
pub use token_client::TokenClient;
pub use token_store::TokenStore;
pub use types::{AuthConfig, AuthError, AuthResult, TokenSet};
