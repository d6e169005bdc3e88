//! # Latchkey Common
//!
//! Ambient pieces shared by every Latchkey crate:
//! - Layered configuration loading (defaults, TOML file, environment)
//! - Configuration error types
//! - Unified `tracing` subscriber initialization

pub mod config;
pub mod error;
pub mod logging;

pub use config::{LatchkeyConfig, OAuthSettings};
pub use error::ConfigurationError;
