//! Get command implementation.
//!
//! Prints one value by dotted key, or the whole configuration when no key
//! is given.

use crate::error::CliError;
use crate::utils::{format_output, load_config, print_output, GlobalOptions};
use clap::Args;
use std::path::PathBuf;
use tiers::{coerce, Value};

/// Print a configuration value.
#[derive(Args)]
pub struct GetCommand {
    /// Configuration file to read
    #[arg(value_name = "CONFIG_FILE")]
    pub config_file: PathBuf,

    /// Dotted key to print (e.g. app.debug); omit for everything
    pub key: Option<String>,

    /// Value to print when the key is absent
    #[arg(long, value_name = "VALUE")]
    pub default: Option<String>,
}

impl GetCommand {
    /// Execute the get command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_config(&self.config_file, global)?;

        let value = match &self.key {
            None => Value::Tree(config.tree().clone()),
            Some(key) => match (config.get(key), &self.default) {
                (Some(value), _) => value.clone(),
                (None, Some(default)) => coerce(default),
                (None, None) => {
                    println!("Key '{key}' not found in configuration");
                    return Err(CliError::SemanticFailure(format!("no value for '{key}'")));
                }
            },
        };

        print_output(&format_output(&value, global.format)?);
        Ok(())
    }
}
