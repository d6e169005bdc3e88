use crate::cli::{commands::Commands, handlers};
use crate::error::Result;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use latchkey_common::LatchkeyConfig;
use std::path::PathBuf;
use tracing::debug;

/// Latchkey CLI - OAuth 2.0 access tokens on demand
#[derive(Parser, Debug)]
#[command(
    name = "latchkey",
    version,
    about = "Latchkey CLI - OAuth 2.0 access tokens on demand",
    long_about = "Obtain OAuth 2.0 access tokens through the browser-based authorization code flow.

EXAMPLES:
  latchkey login                    # Authenticate in the browser
  latchkey token                    # Print an access token for scripts
  latchkey auth-url                 # Show the authorization URL
  latchkey config show              # Show effective configuration

Configuration is read from ./latchkey.toml (or --config) and
LATCHKEY_* environment variables, e.g. LATCHKEY_OAUTH__CLIENT_ID."
)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true, env = "LATCHKEY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Args {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        debug!(config = ?self.config, "Loading configuration");
        let config = LatchkeyConfig::load_validated(self.config.as_deref())?;

        match self.command {
            Commands::Login { show_token } => handlers::auth::handle_login(&config, show_token).await,
            Commands::Token => handlers::auth::handle_token(&config).await,
            Commands::AuthUrl => handlers::auth::handle_auth_url(&config),
            Commands::Config { action } => handlers::config::handle_config(action, &config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::ConfigAction;

    #[test]
    fn test_parse_login_with_flags() {
        let args =
            Args::try_parse_from(["latchkey", "--config", "custom.toml", "-vv", "login", "--show-token"])
                .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
        assert!(args.verbosity.is_present());
        assert!(matches!(args.command, Commands::Login { show_token: true }));
    }

    #[test]
    fn test_parse_subcommands() {
        let args = Args::try_parse_from(["latchkey", "token"]).unwrap();
        assert!(matches!(args.command, Commands::Token));
        assert!(!args.verbosity.is_present());

        let args = Args::try_parse_from(["latchkey", "auth-url"]).unwrap();
        assert!(matches!(args.command, Commands::AuthUrl));

        let args = Args::try_parse_from(["latchkey", "config", "show"]).unwrap();
        assert!(matches!(
            args.command,
            Commands::Config {
                action: ConfigAction::Show
            }
        ));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Args::try_parse_from(["latchkey"]).is_err());
    }
}
