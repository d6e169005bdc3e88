//! Browser launching for the interactive flow

use super::types::{AuthError, AuthResult};
use async_trait::async_trait;

/// Opens the authorization URL for the user
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn open(&self, url: &str) -> AuthResult<()>;
}

/// Launches the platform default browser
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

#[async_trait]
impl BrowserLauncher for SystemBrowser {
    async fn open(&self, url: &str) -> AuthResult<()> {
        let url = url.to_string();
        // webbrowser may block while spawning the platform launcher
        tokio::task::spawn_blocking(move || webbrowser::open(&url))
            .await
            .map_err(|e| AuthError::BrowserLaunch(e.to_string()))?
            .map_err(|e| AuthError::BrowserLaunch(e.to_string()))
    }
}
