//! Utility functions for CLI operations.
//!
//! This module provides helpers shared across commands: loading a
//! configuration file, choosing an output format, and rendering values.

use crate::error::CliError;
use std::path::Path;
use tiers::{Config, ConfigBuilder, Format, Logger, Tree, Value};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Output format override.
    pub format: Option<Format>,

    /// Logger built from the verbosity flags.
    pub logger: Logger,
}

impl GlobalOptions {
    /// The format for writing `path`: `--format` if given, else the
    /// extension.
    pub fn file_format(&self, path: &Path) -> Format {
        Format::resolve(self.format, path)
    }
}

/// Load a single configuration file with no defaults or environment layer.
pub fn load_config(path: &Path, global: &GlobalOptions) -> Result<Config, CliError> {
    load_config_with(path, &[], global)
}

/// Load a single configuration file and check `required` keys.
pub fn load_config_with(
    path: &Path,
    required: &[String],
    global: &GlobalOptions,
) -> Result<Config, CliError> {
    ConfigBuilder::new()
        .with_source(path)
        .with_required(required.iter().cloned())
        .with_logger(global.logger.clone())
        .build()
        .map_err(CliError::from)
}

/// Render a value for printing.
///
/// With a format, sections and values are serialized in it; INI falls back
/// to the plain listing for anything that is not a section. Without one,
/// sections print as an indented `key: value` listing and other values
/// print as-is.
pub fn format_output(value: &Value, format: Option<Format>) -> Result<String, CliError> {
    match (format, value) {
        (Some(Format::Ini), Value::Tree(tree)) => Ok(Format::Ini.render(tree)?),
        (Some(Format::Ini), other) | (None, other) => Ok(plain(other)),
        (Some(format), other) => Ok(format.render_value(other)?),
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::Tree(tree) => format_tree(tree, 0),
        other => other.to_string(),
    }
}

/// Indented `key: value` listing, two spaces per nesting level.
pub fn format_tree(tree: &Tree, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let mut lines = Vec::with_capacity(tree.len());
    for (key, value) in tree.iter() {
        match value {
            Value::Tree(nested) => {
                lines.push(format!("{pad}{key}:"));
                if !nested.is_empty() {
                    lines.push(format_tree(nested, indent + 2));
                }
            }
            other => lines.push(format!("{pad}{key}: {other}")),
        }
    }
    lines.join("\n")
}

/// Strip trailing newlines so `println!` adds exactly one.
pub fn print_output(text: &str) {
    println!("{}", text.trim_end_matches('\n'));
}
