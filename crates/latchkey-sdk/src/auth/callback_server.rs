//! Local HTTP callback server for OAuth authorization code flow
//!
//! This module implements a temporary local HTTP server to receive
//! the authorization callback from the OAuth provider. The first request
//! carrying `code` or `error` settles the pending flow; stray requests
//! (favicon probes, reloads without parameters) are answered and ignored.

use super::types::{AuthError, AuthResult};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// Decisive result delivered by the callback handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Authorization code from a successful redirect
    Code(String),
    /// OAuth error from a failed redirect
    Error {
        error: String,
        description: Option<String>,
    },
}

/// OAuth callback query parameters
#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Shared between the handler and the waiting flow; settles at most once
struct CallbackState {
    sender: Mutex<Option<oneshot::Sender<CallbackOutcome>>>,
}

impl CallbackState {
    fn new(sender: oneshot::Sender<CallbackOutcome>) -> Self {
        Self {
            sender: Mutex::new(Some(sender)),
        }
    }

    /// Deliver the outcome if nothing has been delivered yet
    fn settle(&self, outcome: CallbackOutcome) -> bool {
        let sender = match self.sender.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        match sender {
            Some(sender) => sender.send(outcome).is_ok(),
            None => false,
        }
    }
}

/// A bound callback listener for one authorization attempt
///
/// Connections are only served while [`CallbackServer::wait`] is polled. The
/// listening socket is owned by that future, so the port is released as soon
/// as `wait` returns or is dropped.
pub struct CallbackServer {
    local_addr: SocketAddr,
    listener: TcpListener,
    app: Router,
    receiver: oneshot::Receiver<CallbackOutcome>,
}

impl CallbackServer {
    /// Bind `127.0.0.1:port` for requests on `path`
    pub async fn bind(port: u16, path: &str) -> AuthResult<Self> {
        let (tx, rx) = oneshot::channel();
        let app = router(path, Arc::new(CallbackState::new(tx)));

        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            AuthError::CallbackServerError(format!("Failed to bind to {}: {}", addr, e))
        })?;
        let local_addr = listener.local_addr().map_err(|e| {
            AuthError::CallbackServerError(format!("Failed to read listener address: {}", e))
        })?;

        info!(port = local_addr.port(), path, "OAuth callback server listening");

        Ok(Self {
            local_addr,
            listener,
            app,
            receiver: rx,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until the first decisive callback or the deadline
    ///
    /// Returns the authorization code, or fails with
    /// [`AuthError::OAuthCallback`] or [`AuthError::Timeout`].
    pub async fn wait(self, timeout: Duration) -> AuthResult<String> {
        let Self {
            local_addr,
            listener,
            app,
            receiver,
        } = self;

        let result = tokio::select! {
            outcome = receiver => match outcome {
                Ok(CallbackOutcome::Code(code)) => Ok(code),
                Ok(CallbackOutcome::Error { error, description }) => {
                    Err(AuthError::OAuthCallback { error, description })
                }
                Err(_) => Err(AuthError::CallbackServerError(
                    "Callback handler went away before a callback arrived".to_string(),
                )),
            },
            served = axum::serve(listener, app).into_future() => {
                let reason = match served {
                    Ok(()) => "listener closed".to_string(),
                    Err(e) => e.to_string(),
                };
                warn!(error = %reason, "Callback server stopped");
                Err(AuthError::CallbackServerError(format!(
                    "Callback server stopped: {}",
                    reason
                )))
            }
            _ = tokio::time::sleep(timeout) => Err(AuthError::Timeout(timeout)),
        };

        debug!(port = local_addr.port(), "Callback server shut down");
        result
    }

    /// Generate success HTML page to display to user
    pub fn generate_success_page() -> String {
        render_page(
            "Authorization Successful",
            "#10B981",
            "✓",
            "<p>Authentication successful!</p>",
            "You can now close this window and return to the application.",
        )
    }

    /// Generate error HTML page to display to user
    pub fn generate_error_page(error: &str) -> String {
        render_page(
            "Authorization Failed",
            "#EF4444",
            "✗",
            &format!(r#"<div class="error-details">{}</div>"#, escape_html(error)),
            "Please close this window and try again.",
        )
    }

    /// Generate the page for requests carrying neither `code` nor `error`
    pub fn generate_invalid_request_page() -> String {
        render_page(
            "Invalid Request",
            "#F59E0B",
            "!",
            "<p>This request did not contain an authorization response.</p>",
            "Authorization is still pending in the application.",
        )
    }
}

fn router(path: &str, state: Arc<CallbackState>) -> Router {
    Router::new()
        .route(path, get(handle_callback))
        .with_state(state)
}

/// Axum handler for OAuth callback
async fn handle_callback(
    State(state): State<Arc<CallbackState>>,
    Query(params): Query<CallbackQuery>,
) -> Response {
    // `error` wins when both parameters are present
    if let Some(error) = params.error {
        let message = params.error_description.as_deref().unwrap_or(&error);
        let page = CallbackServer::generate_error_page(message);
        warn!(error = %error, "Authorization server returned an error");
        let settled = state.settle(CallbackOutcome::Error {
            error,
            description: params.error_description,
        });
        if !settled {
            debug!("Ignoring callback error after flow was already settled");
        }
        return page_response(StatusCode::BAD_REQUEST, page);
    }

    if let Some(code) = params.code {
        if state.settle(CallbackOutcome::Code(code)) {
            debug!("Received authorization code");
        } else {
            debug!("Ignoring authorization code after flow was already settled");
        }
        return page_response(StatusCode::OK, CallbackServer::generate_success_page());
    }

    debug!("Callback request without code or error, still waiting");
    page_response(
        StatusCode::BAD_REQUEST,
        CallbackServer::generate_invalid_request_page(),
    )
}

/// Terminal page; the connection is closed once it is sent
fn page_response(status: StatusCode, page: String) -> Response {
    (status, [(header::CONNECTION, "close")], Html(page)).into_response()
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn render_page(title: &str, accent: &str, icon: &str, body: &str, footer: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Latchkey</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
            background: #111827;
            margin: 0;
            display: flex;
            justify-content: center;
            align-items: center;
            min-height: 100vh;
        }}
        .container {{
            background: #ffffff;
            padding: 48px;
            border-radius: 8px;
            max-width: 440px;
            width: 100%;
            text-align: center;
        }}
        .icon {{
            width: 64px;
            height: 64px;
            margin: 0 auto 24px;
            background: {accent};
            border-radius: 50%;
            display: flex;
            align-items: center;
            justify-content: center;
            color: white;
            font-size: 32px;
        }}
        h1 {{ margin: 0 0 16px 0; font-size: 24px; color: #111827; }}
        p {{ margin: 0 0 8px 0; font-size: 16px; color: #6B7280; }}
        .error-details {{
            background: #F9FAFB;
            border: 1px solid #E5E7EB;
            padding: 12px;
            border-radius: 6px;
            font-family: 'SF Mono', Monaco, 'Courier New', monospace;
            font-size: 14px;
            color: #EF4444;
            word-break: break-word;
        }}
        .footer {{ margin-top: 24px; font-size: 14px; color: #9CA3AF; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="icon">{icon}</div>
        <h1>{title}</h1>
        {body}
        <p class="footer">{footer}</p>
    </div>
</body>
</html>
"#
    )
}
