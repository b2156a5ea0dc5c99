//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, ConvertCommand, CreateCommand, EnvCommand, GetCommand, ListCommand,
    SetCommand, ValidateCommand,
};
use clap::{Parser, Subcommand, ValueEnum};
use tiers::Format;

/// Command-line tool for reading and editing layered configuration files.
#[derive(Parser)]
#[command(name = "tiers")]
#[command(version, about = "Read, edit, and convert configuration files", long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Output format for printed values and written files
    #[arg(long, value_enum, global = true, env = "TIERS_FORMAT")]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

/// Formats accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML
    Yaml,
    /// JSON
    Json,
    /// INI
    Ini,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Yaml => Format::Yaml,
            OutputFormat::Json => Format::Json,
            OutputFormat::Ini => Format::Ini,
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print a value, or the whole configuration
    Get(GetCommand),

    /// Set a value and save the file
    Set(SetCommand),

    /// Create a new configuration file
    Create(CreateCommand),

    /// Check that a file loads and has the required keys
    Validate(ValidateCommand),

    /// Convert a configuration file to another format
    Convert(ConvertCommand),

    /// List all values, or one section
    List(ListCommand),

    /// Print the configuration built from environment variables
    Env(EnvCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
