//! Authentication provider implementations

pub mod oauth2;

pub use oauth2::OAuth2Provider;
