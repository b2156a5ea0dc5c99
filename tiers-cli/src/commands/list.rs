//! List command implementation.
//!
//! Prints the whole configuration, or the members of one section.

use crate::error::CliError;
use crate::utils::{format_output, load_config, print_output, GlobalOptions};
use clap::Args;
use std::path::PathBuf;
use tiers::{Tree, Value};

/// List configuration values.
#[derive(Args)]
pub struct ListCommand {
    /// Configuration file to read
    #[arg(value_name = "CONFIG_FILE")]
    pub config_file: PathBuf,

    /// Only list this section (dotted keys allowed)
    #[arg(long, value_name = "SECTION")]
    pub section: Option<String>,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_config(&self.config_file, global)?;

        let Some(section) = &self.section else {
            let all = Value::Tree(config.tree().clone());
            print_output(&format_output(&all, global.format)?);
            return Ok(());
        };

        let items = config.section_items(section);
        if items.is_empty() {
            global
                .logger
                .warn(&format!("Section '{section}' not found or empty"));
            return Err(CliError::SemanticFailure(format!(
                "nothing to list in '{section}'"
            )));
        }

        if global.format.is_some() {
            let members: Tree = items.into_iter().map(|(k, v)| (k, v.clone())).collect();
            let mut wrapped = Tree::new();
            wrapped.insert(section.as_str(), members);
            print_output(&format_output(&Value::Tree(wrapped), global.format)?);
        } else {
            println!("{section}:");
            for (key, value) in items {
                println!("  {key}: {value}");
            }
        }
        Ok(())
    }
}
