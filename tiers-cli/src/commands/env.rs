//! Env command implementation.

use crate::error::CliError;
use crate::utils::{format_output, print_output, GlobalOptions};
use clap::Args;
use tiers::{Config, Value};

/// Print the configuration built from environment variables.
///
/// `APP_SERVER__PORT=9000` with prefix `APP_` becomes `server.port: 9000`.
#[derive(Args)]
pub struct EnvCommand {
    /// Variable name prefix, e.g. APP_
    pub prefix: String,
}

impl EnvCommand {
    /// Execute the env command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = Config::from_env(&self.prefix);
        global.logger.debug(&format!(
            "{} top-level keys from {}* variables",
            config.tree().len(),
            self.prefix
        ));
        print_output(&format_output(
            &Value::Tree(config.into_tree()),
            global.format,
        )?);
        Ok(())
    }
}
