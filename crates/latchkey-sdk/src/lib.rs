//! # Latchkey SDK
//!
//! Client-side OAuth 2.0 authorization-code flow with in-memory,
//! self-refreshing token management.
//!
//! ```rust,no_run
//! use latchkey_sdk::auth::{AuthConfig, OAuth2Provider, TokenManager};
//! use latchkey_common::LatchkeyConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = LatchkeyConfig::load_validated(None)?;
//! let provider = OAuth2Provider::new(AuthConfig::from(&settings.oauth))?;
//! let manager = TokenManager::new(Box::new(provider));
//!
//! // Reuses, refreshes or re-authenticates as needed
//! let tokens = manager.authenticate().await?;
//! println!("{}", tokens.authorization_header());
//! # Ok(())
//! # }
//! ```

pub mod auth;

pub use auth::{AuthConfig, AuthError, AuthResult, TokenManager, TokenSet};
