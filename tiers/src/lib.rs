#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # tiers
//!
//! A layered configuration loader.
//!
//! Configuration is assembled from caller defaults, an optional YAML, JSON,
//! or INI file, and prefixed environment variables, merged deeply in that
//! order. The result is a nested tree addressed with dotted keys.
//!
//! ## Core Types
//!
//! - [`Config`] and [`ConfigBuilder`]: Assembly, reload, and save
//! - [`Tree`], [`Value`], and [`DottedPath`]: The nested data model
//! - [`Format`]: File parsing and serialization
//! - [`coerce`]: Typed values from raw strings
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use tiers::{ConfigBuilder, Tree, Value};
//! use tiers::config::EnvSource;
//!
//! let mut defaults = Tree::new();
//! defaults.set_path("app.name", "Def").unwrap();
//! defaults.set_path("app.debug", false).unwrap();
//!
//! let config = ConfigBuilder::new()
//!     .with_defaults(defaults)
//!     .skip_files()
//!     .with_env_prefix("PFX_")
//!     .with_env_vars(EnvSource::fixed([("PFX_SERVER__PORT", "9000")]))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.get("app.name"), Some(&Value::from("Def")));
//! assert_eq!(config.get("server.port"), Some(&Value::Int(9000)));
//! ```

pub mod coerce;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod tree;

// Re-export key types at crate root for convenience
pub use coerce::coerce;
pub use config::{Config, ConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use format::Format;
pub use logging::{init_logger, LogLevel, Logger};
pub use tree::{merge, DottedPath, Tree, Value};
