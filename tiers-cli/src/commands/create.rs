//! Create command implementation.
//!
//! Starts from a template file or nothing, applies `--vars`, and writes the
//! result in the format implied by `--format` or the output extension.

use crate::error::CliError;
use crate::utils::{load_config, GlobalOptions};
use clap::Args;
use std::path::PathBuf;
use tiers::{Config, Tree, Value};

/// Create a new configuration file.
#[derive(Args)]
pub struct CreateCommand {
    /// Where to write the new file
    #[arg(value_name = "OUTPUT_FILE")]
    pub output_file: PathBuf,

    /// Existing configuration file to start from
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// JSON object of dotted keys to set, e.g. '{"app.name": "demo"}'
    #[arg(long, value_name = "JSON")]
    pub vars: Option<String>,
}

impl CreateCommand {
    /// Execute the create command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut config = match &self.template {
            Some(template) => load_config(template, global)?,
            None => Config::from_tree(Tree::new()),
        };

        if let Some(vars) = &self.vars {
            for (key, value) in parse_vars(vars)? {
                config.set(&key, Value::from(value))?;
            }
        }

        let format = global.file_format(&self.output_file);
        config.save_as(&self.output_file, format)?;
        global.logger.info(&format!(
            "Created new {format} configuration file: {}",
            self.output_file.display()
        ));
        Ok(())
    }
}

fn parse_vars(vars: &str) -> Result<serde_json::Map<String, serde_json::Value>, CliError> {
    match serde_json::from_str(vars) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) => Err(CliError::InvalidArguments(
            "--vars must be a JSON object".to_string(),
        )),
        Err(e) => Err(CliError::InvalidArguments(format!(
            "Invalid JSON in --vars parameter: {e}"
        ))),
    }
}
