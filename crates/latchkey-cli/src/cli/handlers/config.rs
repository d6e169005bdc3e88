//! Configuration command handlers

use crate::cli::commands::ConfigAction;
use crate::error::Result;
use latchkey_common::LatchkeyConfig;

/// Handle `latchkey config <action>`
pub fn handle_config(action: ConfigAction, config: &LatchkeyConfig) -> Result<()> {
    match action {
        ConfigAction::Show => {
            print!("{}", config.to_masked_toml()?);
            Ok(())
        }
    }
}
