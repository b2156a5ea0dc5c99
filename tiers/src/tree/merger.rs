//! Deep merging of configuration trees.
//!
//! Nested sections merge key by key; every other value is replaced
//! wholesale by the incoming one. Sequences are never merged element-wise.

use super::node::Tree;
use super::value::Value;

/// Merges configuration layers according to precedence rules.
///
/// # Examples
///
/// ```
/// use tiers::tree::{Tree, TreeMerger};
///
/// let mut low = Tree::new();
/// low.set_path("app.name", "low").unwrap();
/// low.set_path("app.debug", false).unwrap();
///
/// let mut high = Tree::new();
/// high.set_path("app.name", "high").unwrap();
///
/// TreeMerger::merge_into(&mut low, high);
/// assert_eq!(low.get_path("app.name").unwrap().as_str(), Some("high"));
/// assert_eq!(low.get_path("app.debug").unwrap().as_bool(), Some(false));
/// ```
pub struct TreeMerger;

impl TreeMerger {
    /// Merge layers into one tree.
    ///
    /// Layers are given from lowest to highest precedence.
    #[must_use]
    pub fn merge<I>(layers: I) -> Tree
    where
        I: IntoIterator<Item = Tree>,
    {
        let mut result = Tree::new();
        for layer in layers {
            Self::merge_into(&mut result, layer);
        }
        result
    }

    /// Merge `source` into `target`, returning `target`.
    ///
    /// # Merging Rules
    ///
    /// - Section meets section: recurse
    /// - Anything else: the source value replaces the target value
    /// - Keys only in the target are left alone
    pub fn merge_into(target: &mut Tree, source: Tree) -> &mut Tree {
        for (key, incoming) in source {
            match incoming {
                Value::Tree(nested) => {
                    if let Some(Value::Tree(existing)) = target.get_mut(&key) {
                        Self::merge_into(existing, nested);
                        continue;
                    }
                    target.insert(key, nested);
                }
                other => {
                    target.insert(key, other);
                }
            }
        }
        target
    }
}

/// Free-function form of [`TreeMerger::merge_into`].
pub fn merge(target: &mut Tree, source: Tree) -> &mut Tree {
    TreeMerger::merge_into(target, source)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(pairs: &[(&str, Value)]) -> Tree {
        let mut t = Tree::new();
        for (path, value) in pairs {
            t.set_path(path, value.clone()).unwrap();
        }
        t
    }

    #[test]
    fn test_nested_sections_merge_key_wise() {
        let mut target = tree(&[("a.x", Value::Int(1)), ("a.y", Value::Int(2))]);
        let source = tree(&[("a.x", Value::Int(3))]);

        merge(&mut target, source);
        assert_eq!(target.get_path("a.x"), Some(&Value::Int(3)));
        assert_eq!(target.get_path("a.y"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_scalar_replaces_section() {
        let mut target = tree(&[("a.x", Value::Int(1))]);
        let source = tree(&[("a", Value::from("flat"))]);

        merge(&mut target, source);
        assert_eq!(target.get_path("a"), Some(&Value::from("flat")));
    }

    #[test]
    fn test_section_replaces_scalar() {
        let mut target = tree(&[("a", Value::Int(1))]);
        let source = tree(&[("a.b", Value::Int(2))]);

        merge(&mut target, source);
        assert_eq!(target.get_path("a.b"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_sequences_replaced_not_concatenated() {
        let mut target = tree(&[(
            "hosts",
            Value::Sequence(vec![Value::from("a"), Value::from("b")]),
        )]);
        let source = tree(&[("hosts", Value::Sequence(vec![Value::from("c")]))]);

        merge(&mut target, source);
        assert_eq!(
            target.get_path("hosts"),
            Some(&Value::Sequence(vec![Value::from("c")]))
        );
    }

    #[test]
    fn test_target_only_keys_untouched() {
        let mut target = tree(&[("keep", Value::Bool(true)), ("a.x", Value::Int(1))]);
        merge(&mut target, tree(&[("a.z", Value::Int(9))]));
        assert_eq!(target.get_path("keep"), Some(&Value::Bool(true)));
        assert_eq!(target.get_path("a.x"), Some(&Value::Int(1)));
        assert_eq!(target.get_path("a.z"), Some(&Value::Int(9)));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let base = tree(&[("a.x", Value::Int(1)), ("b", Value::from("s"))]);
        let source = tree(&[("a.y", Value::Int(2)), ("b", Value::Null)]);

        let mut once = base.clone();
        merge(&mut once, source.clone());
        let mut twice = once.clone();
        merge(&mut twice, source);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_layers_in_precedence_order() {
        let defaults = tree(&[("a.x", Value::Int(1)), ("a.y", Value::Int(2))]);
        let file = tree(&[("a.x", Value::Int(3))]);
        let env = tree(&[("a.x", Value::Int(4))]);

        let merged = TreeMerger::merge(vec![defaults, file, env]);
        assert_eq!(merged.get_path("a.x"), Some(&Value::Int(4)));
        assert_eq!(merged.get_path("a.y"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_merge_returns_target() {
        let mut target = Tree::new();
        let len = merge(&mut target, tree(&[("k", Value::Int(1))])).len();
        assert_eq!(len, 1);
    }
}
