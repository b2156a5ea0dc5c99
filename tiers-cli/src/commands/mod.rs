//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `get`: Print a value or the whole configuration
//! - `set`: Set a value and save the file
//! - `create`: Create a new configuration file
//! - `validate`: Check that a file loads and has required keys
//! - `convert`: Re-save a file in another format
//! - `list`: List all values or one section
//! - `env`: Print the configuration built from environment variables
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod convert;
pub mod create;
pub mod env;
pub mod get;
pub mod list;
pub mod set;
pub mod validate;

pub use completions::CompletionsCommand;
pub use convert::ConvertCommand;
pub use create::CreateCommand;
pub use env::EnvCommand;
pub use get::GetCommand;
pub use list::ListCommand;
pub use set::SetCommand;
pub use validate::ValidateCommand;
