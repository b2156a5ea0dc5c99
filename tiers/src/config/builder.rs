//! Builder for assembling a [`Config`].

use std::path::PathBuf;

use crate::config::assembly::{Config, LoadPlan};
use crate::config::environment::EnvSource;
use crate::error::Result;
use crate::format::Format;
use crate::logging::Logger;
use crate::tree::Tree;

/// Collects the inputs of a configuration load.
///
/// Layers are merged in a fixed order: defaults, then the file, then
/// environment variables. Nothing is read until [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use tiers::{ConfigBuilder, Tree, Value};
/// use tiers::config::EnvSource;
///
/// let mut defaults = Tree::new();
/// defaults.set_path("server.port", 8080).unwrap();
/// defaults.set_path("server.host", "localhost").unwrap();
///
/// let config = ConfigBuilder::new()
///     .with_defaults(defaults)
///     .skip_files()
///     .with_env_prefix("APP_")
///     .with_env_vars(EnvSource::fixed([("APP_SERVER__PORT", "9000")]))
///     .with_required(["server.host"])
///     .build()
///     .unwrap();
///
/// assert_eq!(config.get("server.port"), Some(&Value::Int(9000)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    plan: LoadPlan,
    logger: Logger,
}

impl ConfigBuilder {
    /// Creates a builder with no defaults, no file, no environment prefix,
    /// and a stderr logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lowest-precedence layer.
    #[must_use]
    pub fn with_defaults(mut self, defaults: Tree) -> Self {
        self.plan.defaults = defaults;
        self
    }

    /// Loads this file instead of searching. It must exist.
    #[must_use]
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.plan.source = Some(path.into());
        self
    }

    /// Directories searched when no source is given. Nothing is searched
    /// unless this is called; pass
    /// [`default_search_paths`](crate::config::default_search_paths) for the
    /// usual locations.
    #[must_use]
    pub fn with_search_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.plan.search_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Clears the search paths. An explicit source is still loaded.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.plan.search_paths.clear();
        self
    }

    /// Enables environment overrides for variables starting with `prefix`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.plan.env_prefix = Some(prefix.into());
        self
    }

    /// Reads environment variables from `env` instead of the process.
    #[must_use]
    pub fn with_env_vars(mut self, env: EnvSource) -> Self {
        self.plan.env = env;
        self
    }

    /// Dotted keys that must be present after merging.
    #[must_use]
    pub fn with_required<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plan.required = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Parses and saves with `format` regardless of file extension.
    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.plan.format = Some(format);
        self
    }

    /// Sets the logger the config reports through.
    #[must_use]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Reads every layer, merges, and validates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileAccess`](crate::Error::FileAccess) if an explicit
    /// source cannot be read, [`Error::Format`](crate::Error::Format) if the
    /// file is malformed, and [`Error::Validation`](crate::Error::Validation)
    /// if required keys are missing.
    pub fn build(self) -> Result<Config> {
        Config::load(self.plan, self.logger)
    }
}
