//! Command handlers for the Latchkey CLI

pub mod auth;
pub mod config;
