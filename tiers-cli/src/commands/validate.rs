//! Command to validate a configuration file.

use crate::error::CliError;
use crate::utils::{load_config_with, GlobalOptions};
use clap::Args;
use std::path::PathBuf;

/// Validate a configuration file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate
    #[arg(value_name = "CONFIG_FILE")]
    pub config_file: PathBuf,

    /// Comma-separated dotted keys that must be present
    #[arg(long, value_name = "KEYS", value_delimiter = ',')]
    pub required: Vec<String>,
}

impl ValidateCommand {
    /// Execute the validate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let required: Vec<String> = self
            .required
            .iter()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .collect();

        match load_config_with(&self.config_file, &required, global) {
            Ok(_) => {
                println!("Configuration is valid");
                if !required.is_empty() {
                    global.logger.info(&format!(
                        "All required keys present: {}",
                        required.join(", ")
                    ));
                }
                Ok(())
            }
            Err(e) => {
                eprintln!("Validation error: {e}");
                Err(e)
            }
        }
    }
}
