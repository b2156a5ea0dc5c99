//! The ordered mapping behind dotted-path configuration access.

use std::fmt;
use std::ops::Index;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::path::DottedPath;
use super::value::Value;
use crate::error::{Error, Result};

/// A mutable, insertion-ordered configuration section.
///
/// A `Tree` behaves both as a key/value container (single-key `get`,
/// `insert`, `remove`, iteration) and as a dotted-path namespace
/// (`get_path`, `set_path`, `remove_path`). Equality ignores key order.
///
/// # Examples
///
/// ```
/// use tiers::{Tree, Value};
///
/// let mut tree = Tree::new();
/// tree.set_path("server.port", 8080).unwrap();
///
/// assert_eq!(tree.get_path("server.port"), Some(&Value::Int(8080)));
/// assert!(tree["server"].is_tree());
/// assert_eq!(tree.get_path("server.host"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tree {
    entries: IndexMap<String, Value>,
}

impl Tree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree from a plain JSON-shaped mapping.
    ///
    /// Nested mappings become nested trees, sequences are copied with their
    /// mapping elements wrapped, and scalars pass through.
    #[must_use]
    pub fn from_mapping(mapping: &serde_json::Map<String, serde_json::Value>) -> Self {
        Self::from(mapping.clone())
    }

    /// Converts the tree back into a plain mapping.
    ///
    /// This is the structural inverse of [`Tree::from_mapping`].
    #[must_use]
    pub fn to_mapping(&self) -> serde_json::Map<String, serde_json::Value> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
            .collect()
    }

    /// Number of top-level keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the tree has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` when `key` is a top-level key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The value stored under a single top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Mutable access to the value stored under a single top-level key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Inserts a top-level value, returning the previous one.
    ///
    /// A replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes a top-level key, preserving the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Returns the value under `key`, inserting `default` first if absent.
    pub fn set_default(&mut self, key: impl Into<String>, default: impl Into<Value>) -> &mut Value {
        self.entries.entry(key.into()).or_insert_with(|| default.into())
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Top-level keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Top-level values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    /// Top-level `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Top-level `(key, value)` pairs with mutable values.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Value)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Resolves a dotted path to a value.
    ///
    /// Returns `None` when a segment is missing, when an intermediate value
    /// is not a section, or when the key is malformed. The empty key names
    /// the root, which is not a value, so it also yields `None`; use
    /// [`Tree::subtree`] for sections.
    #[must_use]
    pub fn get_path(&self, key: &str) -> Option<&Value> {
        let path = DottedPath::parse(key).ok()?;
        let (last, parents) = path.segments().split_last()?;
        let mut current = self;
        for segment in parents {
            current = current.get(segment)?.as_tree()?;
        }
        current.get(last)
    }

    /// Resolves a dotted path, falling back to `default` when absent.
    #[must_use]
    pub fn get_path_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.get_path(key).unwrap_or(default)
    }

    /// Mutable variant of [`Tree::get_path`].
    pub fn get_path_mut(&mut self, key: &str) -> Option<&mut Value> {
        let path = DottedPath::parse(key).ok()?;
        let (last, parents) = path.segments().split_last()?;
        let mut current = self;
        for segment in parents {
            current = current.get_mut(segment)?.as_tree_mut()?;
        }
        current.get_mut(last)
    }

    /// The section at a dotted path; the empty key is the tree itself.
    #[must_use]
    pub fn subtree(&self, key: &str) -> Option<&Tree> {
        let path = DottedPath::parse(key).ok()?;
        let mut current = self;
        for segment in path.segments() {
            current = current.get(segment)?.as_tree()?;
        }
        Some(current)
    }

    /// Returns `true` when a dotted path resolves to a value.
    #[must_use]
    pub fn contains_path(&self, key: &str) -> bool {
        self.get_path(key).is_some()
    }

    /// Assigns `value` at a dotted path.
    ///
    /// Missing intermediate sections are created empty. Whatever sits at the
    /// final segment is overwritten without type checks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] for a malformed or empty key, and
    /// [`Error::StructuralConflict`] when an intermediate segment holds a
    /// value that is not a section. The tree is unchanged on error.
    pub fn set_path(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let path = DottedPath::parse(key)?;
        let Some((last, parents)) = path.segments().split_last() else {
            return Err(Error::InvalidPath {
                path: key.to_string(),
                reason: "cannot assign to the root".to_string(),
            });
        };

        // Check the whole walk first so a conflict leaves no half-built sections.
        let mut probe = Some(&*self);
        for (depth, segment) in parents.iter().enumerate() {
            let Some(tree) = probe else { break };
            probe = match tree.get(segment) {
                None => None,
                Some(Value::Tree(child)) => Some(child),
                Some(other) => return Err(conflict(key, &path, depth, other)),
            };
        }

        let mut current = self;
        for (depth, segment) in parents.iter().enumerate() {
            let slot = current
                .entries
                .entry(segment.clone())
                .or_insert_with(|| Value::Tree(Tree::new()));
            current = match slot {
                Value::Tree(child) => child,
                other => return Err(conflict(key, &path, depth, other)),
            };
        }
        current.insert(last.clone(), value);
        Ok(())
    }

    /// Detaches the value at a dotted path.
    pub fn remove_path(&mut self, key: &str) -> Option<Value> {
        let path = DottedPath::parse(key).ok()?;
        let (last, parents) = path.segments().split_last()?;
        let mut current = self;
        for segment in parents {
            current = current.get_mut(segment)?.as_tree_mut()?;
        }
        current.remove(last)
    }

    /// Dotted paths of every non-section value, depth first.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiers::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.set_path("a.b", 1).unwrap();
    /// tree.set_path("c", 2).unwrap();
    /// assert_eq!(tree.leaf_paths(), vec!["a.b", "c"]);
    /// ```
    #[must_use]
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_leaf_paths("", &mut out);
        out
    }

    fn collect_leaf_paths(&self, prefix: &str, out: &mut Vec<String>) {
        for (key, value) in &self.entries {
            let full = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            match value {
                Value::Tree(child) if !child.is_empty() => child.collect_leaf_paths(&full, out),
                _ => out.push(full),
            }
        }
    }
}

fn conflict(key: &str, path: &DottedPath, depth: usize, found: &Value) -> Error {
    Error::StructuralConflict {
        path: key.to_string(),
        segment: path.prefix(depth + 1),
        found: found.type_name(),
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Tree {
    fn from(mapping: serde_json::Map<String, serde_json::Value>) -> Self {
        mapping
            .into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Tree {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Tree {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for Tree {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Index<&str> for Tree {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if `key` is not a top-level key.
    fn index(&self, key: &str) -> &Value {
        match self.entries.get(key) {
            Some(value) => value,
            None => panic!("no configuration key '{key}'"),
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match value {
                Value::String(s) => write!(f, "{key}={s:?}")?,
                other => write!(f, "{key}={other}")?,
            }
        }
        write!(f, "}}")
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
