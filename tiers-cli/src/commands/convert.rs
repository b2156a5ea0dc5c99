//! Convert command implementation.

use crate::error::CliError;
use crate::utils::{load_config, GlobalOptions};
use clap::Args;
use std::path::PathBuf;

/// Convert a configuration file to another format.
///
/// The output format comes from `--format`, else the output extension.
/// Converting to INI drops sequences and sections nested below the first
/// level.
#[derive(Args)]
pub struct ConvertCommand {
    /// File to read
    #[arg(value_name = "INPUT_FILE")]
    pub input_file: PathBuf,

    /// File to write
    #[arg(value_name = "OUTPUT_FILE")]
    pub output_file: PathBuf,
}

impl ConvertCommand {
    /// Execute the convert command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_config(&self.input_file, global)?;
        let format = global.file_format(&self.output_file);
        config.save_as(&self.output_file, format)?;
        global.logger.info(&format!(
            "Converted {} to {}",
            self.input_file.display(),
            self.output_file.display()
        ));
        Ok(())
    }
}
