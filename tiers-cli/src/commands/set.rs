//! Set command implementation.

use crate::error::CliError;
use crate::utils::{load_config, GlobalOptions};
use clap::Args;
use std::path::PathBuf;
use tiers::{coerce, Config, Tree};

/// Set a configuration value and save the file.
#[derive(Args)]
pub struct SetCommand {
    /// Configuration file to update
    #[arg(value_name = "CONFIG_FILE")]
    pub config_file: PathBuf,

    /// Dotted key to set (e.g. app.debug)
    pub key: String,

    /// New value; booleans and numbers are detected
    pub value: String,

    /// Create the file if it does not exist
    #[arg(long)]
    pub create: bool,
}

impl SetCommand {
    /// Execute the set command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut config = if self.config_file.exists() {
            load_config(&self.config_file, global)?
        } else if self.create {
            Config::from_tree(Tree::new())
        } else {
            return Err(CliError::InvalidArguments(format!(
                "Config file {} does not exist. Use --create to create a new file.",
                self.config_file.display()
            )));
        };

        let value = coerce(&self.value);
        config.set(&self.key, value.clone())?;
        config.save_as(&self.config_file, global.file_format(&self.config_file))?;

        global.logger.info(&format!(
            "Updated {} = {value} in {}",
            self.key,
            self.config_file.display()
        ));
        Ok(())
    }
}
