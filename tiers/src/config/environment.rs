//! Environment variable overrides.
//!
//! Every variable whose name starts with the configured prefix becomes one
//! entry of an override tree. The prefix is stripped, the rest is
//! lower-cased and split on `__` to form the path, and the value goes
//! through [`coerce`]:
//!
//! ```text
//! APP_SERVER__PORT=9000   ->   server.port = 9000
//! APP_DEBUG=yes           ->   debug = true
//! ```

use std::env;

use crate::coerce::coerce;
use crate::logging::Logger;
use crate::tree::{Tree, Value};

/// Separator between nesting levels in a variable name.
pub const NESTING_SEPARATOR: &str = "__";

/// Where environment variables are read from.
///
/// # Examples
///
/// ```
/// use tiers::config::EnvSource;
///
/// let env = EnvSource::fixed([("APP_DEBUG", "true")]);
/// assert_eq!(env.vars(), vec![("APP_DEBUG".to_string(), "true".to_string())]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EnvSource {
    /// The live process environment, read each time it is needed.
    #[default]
    Process,
    /// A fixed snapshot of variables.
    Fixed(Vec<(String, String)>),
}

impl EnvSource {
    /// A fixed snapshot from any list of name/value pairs.
    pub fn fixed<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Fixed(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// All variables, sorted by name.
    ///
    /// Process variables whose name or value is not valid Unicode are
    /// ignored.
    #[must_use]
    pub fn vars(&self) -> Vec<(String, String)> {
        let mut vars: Vec<(String, String)> = match self {
            Self::Process => env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
            Self::Fixed(vars) => vars.clone(),
        };
        vars.sort();
        vars
    }
}

/// Builds override trees from environment variables.
///
/// # Examples
///
/// ```
/// use tiers::config::{EnvSource, EnvironmentConfig};
/// use tiers::{Logger, Value};
///
/// let env = EnvSource::fixed([("APP_SERVER__PORT", "9000"), ("OTHER", "x")]);
/// let tree = EnvironmentConfig::collect("APP_", &env, &Logger::default());
/// assert_eq!(tree.get_path("server.port"), Some(&Value::Int(9000)));
/// assert_eq!(tree.len(), 1);
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Build the override tree for every variable starting with `prefix`.
    ///
    /// Variables are applied in name order, so `APP_A__B` is applied after
    /// `APP_A` and replaces it with a section. Names that produce an empty
    /// path segment are skipped with a warning.
    #[must_use]
    pub fn collect(prefix: &str, source: &EnvSource, logger: &Logger) -> Tree {
        let mut tree = Tree::new();
        for (name, raw) in source.vars() {
            let Some(stripped) = name.strip_prefix(prefix) else {
                continue;
            };
            let Some(segments) = Self::key_segments(stripped) else {
                logger.warn(&format!(
                    "ignoring environment variable {name}: empty key segment"
                ));
                continue;
            };
            let value = coerce(&raw);
            log::debug!("env {name} -> {} = {value}", segments.join("."));
            Self::insert_forced(&mut tree, &segments, value);
        }
        tree
    }

    /// Split a prefix-stripped variable name into lower-case path segments.
    ///
    /// Returns `None` if any segment would be empty or contain `.`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiers::config::EnvironmentConfig;
    ///
    /// assert_eq!(
    ///     EnvironmentConfig::key_segments("SERVER__TLS__CERT"),
    ///     Some(vec!["server".to_string(), "tls".to_string(), "cert".to_string()])
    /// );
    /// assert_eq!(EnvironmentConfig::key_segments("A____B"), None);
    /// assert_eq!(EnvironmentConfig::key_segments(""), None);
    /// ```
    #[must_use]
    pub fn key_segments(stripped: &str) -> Option<Vec<String>> {
        let segments: Vec<String> = stripped
            .to_lowercase()
            .split(NESTING_SEPARATOR)
            .map(str::to_string)
            .collect();
        if segments.iter().any(|s| s.is_empty() || s.contains('.')) {
            return None;
        }
        Some(segments)
    }

    // Unlike Tree::set_path, scalars in the way are replaced by sections.
    fn insert_forced(tree: &mut Tree, segments: &[String], value: Value) {
        let Some((last, parents)) = segments.split_last() else {
            return;
        };
        let mut node = tree;
        for segment in parents {
            let slot = node.set_default(segment.as_str(), Tree::new());
            if !slot.is_tree() {
                *slot = Value::Tree(Tree::new());
            }
            let Some(next) = slot.as_tree_mut() else {
                return;
            };
            node = next;
        }
        node.insert(last.as_str(), value);
    }
}
