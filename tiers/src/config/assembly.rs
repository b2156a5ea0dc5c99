//! The assembled configuration and its operations.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::environment::{EnvSource, EnvironmentConfig};
use crate::config::loader::ConfigLoader;
use crate::config::validator::ConfigValidator;
use crate::error::{Error, Result};
use crate::format::Format;
use crate::logging::Logger;
use crate::tree::{merge, Tree, Value};

/// Everything needed to (re)assemble a configuration.
#[derive(Debug, Clone, Default)]
pub(crate) struct LoadPlan {
    pub(crate) defaults: Tree,
    pub(crate) source: Option<PathBuf>,
    /// Empty means no search.
    pub(crate) search_paths: Vec<PathBuf>,
    pub(crate) format: Option<Format>,
    pub(crate) env_prefix: Option<String>,
    pub(crate) env: EnvSource,
    pub(crate) required: Vec<String>,
}

impl LoadPlan {
    fn resolve_source(&self, logger: &Logger) -> Option<PathBuf> {
        if let Some(path) = &self.source {
            return Some(path.clone());
        }
        if self.search_paths.is_empty() {
            return None;
        }
        let found = ConfigLoader::find(&self.search_paths);
        if found.is_none() {
            logger.warn("no configuration file found in search paths; using defaults");
        }
        found
    }

    /// Defaults, then file, then environment; then validation.
    fn assemble(&self, logger: &Logger) -> Result<(Tree, Option<PathBuf>)> {
        let mut tree = self.defaults.clone();

        let source = self.resolve_source(logger);
        if let Some(path) = &source {
            let loaded = ConfigLoader::load_file(path, self.format)?;
            logger.info(&format!(
                "loaded {} configuration from {}",
                loaded.format,
                path.display()
            ));
            merge(&mut tree, loaded.tree);
        }

        if let Some(prefix) = &self.env_prefix {
            let overrides = EnvironmentConfig::collect(prefix, &self.env, logger);
            logger.debug(&format!(
                "{} top-level keys overridden from {prefix}* variables",
                overrides.len()
            ));
            merge(&mut tree, overrides);
        }

        ConfigValidator::validate_required(&tree, &self.required)?;
        Ok((tree, source))
    }
}

/// A merged configuration tree plus what it was loaded from.
///
/// # Examples
///
/// ```
/// use tiers::{Config, Tree, Value};
///
/// let mut config = Config::from_tree(Tree::new());
/// config.set("new.nested.value", 42).unwrap();
/// assert_eq!(config.get("new.nested.value"), Some(&Value::Int(42)));
/// assert_eq!(config.get_or("missing.key", "fallback"), Value::from("fallback"));
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    tree: Tree,
    plan: LoadPlan,
    logger: Logger,
}

impl Config {
    pub(crate) fn load(mut plan: LoadPlan, logger: Logger) -> Result<Self> {
        let (tree, source) = plan.assemble(&logger)?;
        plan.source = source;
        Ok(Self { tree, plan, logger })
    }

    /// A configuration holding only `defaults`, with no file and no
    /// environment layer.
    #[must_use]
    pub fn from_tree(defaults: Tree) -> Self {
        Self {
            tree: defaults.clone(),
            plan: LoadPlan {
                defaults,
                ..LoadPlan::default()
            },
            logger: Logger::default(),
        }
    }

    /// A configuration built only from process variables starting with
    /// `prefix`.
    #[must_use]
    pub fn from_env(prefix: &str) -> Self {
        let logger = Logger::default();
        let plan = LoadPlan {
            env_prefix: Some(prefix.to_string()),
            ..LoadPlan::default()
        };
        let tree = EnvironmentConfig::collect(prefix, &plan.env, &logger);
        Self { tree, plan, logger }
    }

    /// The value at a dotted key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.tree.get_path(key)
    }

    /// The value at a dotted key, or `default` when absent.
    #[must_use]
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        self.get(key).cloned().unwrap_or_else(|| default.into())
    }

    /// Mutable access to the value at a dotted key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.tree.get_path_mut(key)
    }

    /// Set a dotted key, creating sections along the way.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StructuralConflict`] if an intermediate key holds a
    /// non-section value, and [`Error::InvalidPath`] for malformed keys.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        self.tree.set_path(key, value)
    }

    /// Detach and return the value at a dotted key.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.tree.remove_path(key)
    }

    /// Whether a dotted key resolves to a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.tree.contains_path(key)
    }

    /// Set every leaf of `values` under `prefix`.
    ///
    /// Nested sections are walked rather than assigned, so sibling keys
    /// already in the config survive. An empty prefix writes at the top
    /// level.
    ///
    /// # Errors
    ///
    /// Stops at the first key that [`set`](Self::set) rejects. Keys written
    /// before it stay written.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiers::{Config, Tree, Value};
    ///
    /// let mut defaults = Tree::new();
    /// defaults.set_path("db.host", "localhost").unwrap();
    /// let mut config = Config::from_tree(defaults);
    ///
    /// let mut patch = Tree::new();
    /// patch.set_path("port", 5432).unwrap();
    /// config.update(patch, "db").unwrap();
    ///
    /// assert_eq!(config.get("db.host"), Some(&Value::from("localhost")));
    /// assert_eq!(config.get("db.port"), Some(&Value::Int(5432)));
    /// ```
    pub fn update(&mut self, values: Tree, prefix: &str) -> Result<()> {
        for (key, value) in values {
            let full_key = if prefix.is_empty() {
                key
            } else {
                format!("{prefix}.{key}")
            };
            match value {
                Value::Tree(nested) => self.update(nested, &full_key)?,
                other => self.set(&full_key, other)?,
            }
        }
        Ok(())
    }

    /// Top-level key/value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.tree.iter()
    }

    /// Pairs of a top-level section. Empty when absent or not a section.
    #[must_use]
    pub fn items(&self, section: &str) -> Vec<(&str, &Value)> {
        self.tree
            .get(section)
            .and_then(Value::as_tree)
            .map(|t| t.iter().collect())
            .unwrap_or_default()
    }

    /// Pairs of the section at a dotted key. The empty key is the root.
    #[must_use]
    pub fn section_items(&self, key: &str) -> Vec<(&str, &Value)> {
        self.tree
            .subtree(key)
            .map(|t| t.iter().collect())
            .unwrap_or_default()
    }

    /// The live tree.
    #[must_use]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Mutable access to the live tree.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// Deep copy as a plain JSON mapping.
    #[must_use]
    pub fn to_mapping(&self) -> serde_json::Map<String, serde_json::Value> {
        self.tree.to_mapping()
    }

    /// Consume the config and return its tree.
    #[must_use]
    pub fn into_tree(self) -> Tree {
        self.tree
    }

    /// The file that was loaded, if any.
    #[must_use]
    pub fn source_path(&self) -> Option<&Path> {
        self.plan.source.as_deref()
    }

    /// The declared format, if one was set.
    #[must_use]
    pub fn format(&self) -> Option<Format> {
        self.plan.format
    }

    /// The logger this config reports through.
    #[must_use]
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Rebuild from the same inputs, discarding edits made since loading.
    ///
    /// The resolved source file is re-read and, for the process environment,
    /// variables are read again. On failure the current tree is kept.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigBuilder::build`](crate::ConfigBuilder::build).
    pub fn reload(&mut self) -> Result<()> {
        let (tree, source) = self.plan.assemble(&self.logger)?;
        self.tree = tree;
        self.plan.source = source;
        self.logger.info("configuration reloaded");
        Ok(())
    }

    /// Write the live tree to `path`, or back to the source file.
    ///
    /// Uses the declared format if one was set, else the destination's
    /// extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileAccess`] when there is nowhere to save or the
    /// file cannot be written, and [`Error::Format`] if serialization fails.
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let target = self.save_target(path)?;
        let format = Format::resolve(self.plan.format, &target);
        self.write(&target, format)
    }

    /// Write the live tree to `path` in `format`.
    ///
    /// # Errors
    ///
    /// Same as [`save`](Self::save).
    pub fn save_as(&self, path: &Path, format: Format) -> Result<PathBuf> {
        self.write(path, format)
    }

    fn save_target(&self, path: Option<&Path>) -> Result<PathBuf> {
        path.map(Path::to_path_buf)
            .or_else(|| self.plan.source.clone())
            .ok_or_else(|| Error::FileAccess {
                path: None,
                reason: "no path given and no source file to save to".to_string(),
            })
    }

    fn write(&self, path: &Path, format: Format) -> Result<PathBuf> {
        format.save(&self.tree, path)?;
        self.logger
            .info(&format!("saved {format} configuration to {}", path.display()));
        Ok(path.to_path_buf())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tree)
    }
}

impl<'a> IntoIterator for &'a Config {
    type Item = (&'a str, &'a Value);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a Value)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.tree.iter())
    }
}
