//! Property-based tests for trees, dotted paths, and merging.

use super::{merge, Tree, Value};
use proptest::prelude::*;

// Strategy for generating plain JSON-shaped values
fn json_strategy() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        any::<i64>().prop_map(serde_json::Value::from),
        (-1.0e9f64..1.0e9).prop_map(serde_json::Value::from),
        "[a-z0-9 ]{0,12}".prop_map(serde_json::Value::String),
    ];
    leaf.prop_recursive(4, 64, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..5)
                .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
        ]
    })
}

// Strategy for generating top-level mappings
fn mapping_strategy() -> impl Strategy<Value = serde_json::Map<String, serde_json::Value>> {
    prop::collection::btree_map("[a-z]{1,6}", json_strategy(), 0..6)
        .prop_map(|m| m.into_iter().collect())
}

fn tree_strategy() -> impl Strategy<Value = Tree> {
    mapping_strategy().prop_map(Tree::from)
}

// Strategy for generating dotted keys
fn dotted_key_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,6}", 1..5).prop_map(|parts| parts.join("."))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // to_mapping(from_mapping(d)) == d
    #[test]
    fn mapping_round_trip(mapping in mapping_strategy()) {
        let tree = Tree::from_mapping(&mapping);
        prop_assert_eq!(tree.to_mapping(), mapping);
    }

    // merge(merge(T, S), S) == merge(T, S)
    #[test]
    fn merge_idempotent(target in tree_strategy(), source in tree_strategy()) {
        let mut once = target.clone();
        merge(&mut once, source.clone());
        let mut twice = once.clone();
        merge(&mut twice, source);
        prop_assert_eq!(once, twice);
    }

    // Empty tree is an identity for merge
    #[test]
    fn merge_identity(tree in tree_strategy()) {
        let mut merged = tree.clone();
        merge(&mut merged, Tree::new());
        prop_assert_eq!(&merged, &tree);

        let mut from_empty = Tree::new();
        merge(&mut from_empty, tree.clone());
        prop_assert_eq!(from_empty, tree);
    }

    // Every leaf of the source is visible after merging
    #[test]
    fn merge_source_leaves_win(target in tree_strategy(), source in tree_strategy()) {
        let mut merged = target;
        merge(&mut merged, source.clone());
        for path in source.leaf_paths() {
            let expected = source.get_path(&path);
            // An empty source section merges into whatever the target had
            if expected.is_some_and(Value::is_tree) {
                continue;
            }
            prop_assert_eq!(merged.get_path(&path), expected);
        }
    }

    // Keys absent from the source keep their target values
    #[test]
    fn merge_preserves_target_only_keys(target in tree_strategy(), source in tree_strategy()) {
        let mut merged = target.clone();
        merge(&mut merged, source.clone());
        for (key, value) in target.iter() {
            if !source.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
    }

    // set then get returns the value, with sections created along the way
    #[test]
    fn set_then_get(key in dotted_key_strategy(), n in any::<i64>()) {
        let mut tree = Tree::new();
        tree.set_path(&key, n).unwrap();
        prop_assert_eq!(tree.get_path(&key), Some(&Value::Int(n)));

        let segments: Vec<&str> = key.split('.').collect();
        for depth in 1..segments.len() {
            let prefix = segments[..depth].join(".");
            prop_assert!(tree.get_path(&prefix).is_some_and(Value::is_tree));
        }
    }

    // get never panics and is None on an empty tree
    #[test]
    fn get_missing_is_none(key in "[a-z.]{0,20}") {
        prop_assert_eq!(Tree::new().get_path(&key), None);
    }
}
