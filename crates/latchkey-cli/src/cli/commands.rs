use clap::Subcommand;

/// Main CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate and cache a token set
    Login {
        /// Print the access token after a successful login
        #[arg(long)]
        show_token: bool,
    },

    /// Print a valid access token and nothing else
    Token,

    /// Print the authorization URL without starting a flow
    AuthUrl,

    /// Inspect CLI configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration with secrets masked
    Show,
}
