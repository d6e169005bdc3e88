//! Authentication command handlers

use crate::error::Result;
use crate::output::{print_error, print_field, print_info, print_link, print_success};
use chrono::{DateTime, Utc};
use latchkey_common::LatchkeyConfig;
use latchkey_sdk::auth::{AuthConfig, OAuth2Provider, TokenManager, TokenSet};
use tracing::debug;

fn create_provider(config: &LatchkeyConfig) -> Result<OAuth2Provider> {
    Ok(OAuth2Provider::new(AuthConfig::from(&config.oauth))?)
}

/// Handle `latchkey login`
pub async fn handle_login(config: &LatchkeyConfig, show_token: bool) -> Result<()> {
    let provider = create_provider(config)?;
    let auth_url = provider.authorization_url()?;

    print_info("Opening your browser to complete authentication...");
    print_link("If it does not open, visit", &auth_url);

    let manager = TokenManager::new(Box::new(provider));
    let tokens = match manager.authenticate().await {
        Ok(tokens) => tokens,
        Err(e) => {
            print_error("Login failed");
            return Err(e.into());
        }
    };

    print_success("Login successful!");
    println!();
    print_token_summary(&tokens);
    if show_token {
        print_field("Access token", tokens.access_token());
    }

    Ok(())
}

/// Handle `latchkey token`
///
/// Prints only the access token so the output can be captured by scripts.
pub async fn handle_token(config: &LatchkeyConfig) -> Result<()> {
    let manager = TokenManager::new(Box::new(create_provider(config)?));
    let access_token = manager.access_token().await?;
    println!("{access_token}");
    Ok(())
}

/// Handle `latchkey auth-url`
pub fn handle_auth_url(config: &LatchkeyConfig) -> Result<()> {
    let url = create_provider(config)?.authorization_url()?;
    debug!(url = %url, "Built authorization URL");
    println!("{url}");
    Ok(())
}

fn print_token_summary(tokens: &TokenSet) {
    print_field("Token type", tokens.token_type());
    print_field("Expires", &format_expiry(tokens.expires_at_ms()));
    print_field(
        "Refreshable",
        if tokens.refresh_token().is_some() {
            "yes"
        } else {
            "no"
        },
    );
}

/// Render an absolute expiry instant in UTC
fn format_expiry(expires_at_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(expires_at_ms)
        .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("{expires_at_ms} ms since epoch"))
}
