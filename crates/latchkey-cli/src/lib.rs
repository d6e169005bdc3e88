//! # Latchkey CLI
//!
//! Command-line front end for the Latchkey SDK: run the interactive login,
//! print a usable access token, inspect the authorization URL, and show the
//! effective configuration.

pub mod cli;
pub mod error;
pub mod output;

pub use cli::*;
pub use error::*;

/// Crates whose events are shown at `warn` when no `-v/-q` or `RUST_LOG` is given
const LOG_TARGETS: &[&str] = &[env!("CARGO_CRATE_NAME"), "latchkey_common", "latchkey_sdk"];

/// Default `EnvFilter` directives for the `latchkey` binary
pub fn default_log_filter(binary_name: &str) -> String {
    std::iter::once(binary_name)
        .chain(LOG_TARGETS.iter().copied())
        .map(|target| format!("{target}=warn"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter_covers_workspace_crates() {
        assert_eq!(
            default_log_filter("latchkey"),
            "latchkey=warn,latchkey_cli=warn,latchkey_common=warn,latchkey_sdk=warn"
        );
    }
}
