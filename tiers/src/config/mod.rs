//! Layered configuration assembly.
//!
//! A [`Config`] is assembled from up to three layers, merged in order of
//! increasing precedence:
//!
//! 1. Defaults supplied by the caller
//! 2. A configuration file (explicit, or the first match of a search)
//! 3. Environment variables starting with a prefix
//!
//! After merging, required keys are checked and every missing key is
//! reported in one [`Error::Validation`](crate::Error::Validation).
//!
//! # File search
//!
//! When no file is given but search paths are, each search directory is
//! tried in order with each base name in [`BASE_NAMES`] and each extension
//! in [`EXTENSIONS`]. Finding nothing is not an error; the defaults are used
//! and a warning is logged. Without search paths no file is read.
//!
//! # Examples
//!
//! ```no_run
//! use tiers::config::default_search_paths;
//! use tiers::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .with_search_paths(default_search_paths())
//!     .with_env_prefix("APP_")
//!     .with_required(["database.url"])
//!     .build()
//!     .unwrap();
//!
//! println!("{}", config.get_or("server.port", 8080));
//! ```
//!
//! Loading a specific file:
//!
//! ```no_run
//! use tiers::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .with_source("/etc/app/config.yaml")
//!     .build()
//!     .unwrap();
//! ```

mod assembly;
pub mod builder;
pub mod environment;
pub mod loader;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use assembly::Config;
pub use builder::ConfigBuilder;
pub use environment::{EnvSource, EnvironmentConfig};
pub use loader::{
    default_search_paths, find_config_file, ConfigLoader, ConfigSource, BASE_NAMES, EXTENSIONS,
};
pub use validator::ConfigValidator;
