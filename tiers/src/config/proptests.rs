//! Property-based tests for configuration assembly.

use super::{Config, ConfigBuilder, ConfigValidator, EnvSource};
use crate::coerce::coerce;
use crate::logging::{LogLevel, Logger};
use crate::tree::{Tree, Value};
use proptest::prelude::*;

// Strategy for generating path segments valid in both keys and env names
fn segments_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9]{0,5}", 1..4)
}

// Integers that do not collide with the boolean words "0" and "1"
fn plain_int_strategy() -> impl Strategy<Value = i64> {
    any::<i64>().prop_filter("0 and 1 coerce to booleans", |n| *n != 0 && *n != 1)
}

fn env_name(prefix: &str, segments: &[String]) -> String {
    format!("{prefix}{}", segments.join("__").to_uppercase())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Integers other than 0/1 coerce to themselves
    #[test]
    fn coerce_integers(n in plain_int_strategy()) {
        prop_assert_eq!(coerce(&n.to_string()), Value::Int(n));
    }

    // Strings with no digits, dots, or boolean words stay strings
    #[test]
    fn coerce_words(word in "[g-mp-x]{2,10}") {
        prop_assert_eq!(coerce(&word), Value::String(word.clone()));
    }

    // An environment variable overrides the same key from the defaults
    #[test]
    fn env_overrides_default(
        segments in segments_strategy(),
        default in plain_int_strategy(),
        n in plain_int_strategy(),
    ) {
        let key = segments.join(".");
        let mut defaults = Tree::new();
        defaults.set_path(&key, default).unwrap();

        let config = ConfigBuilder::new()
            .with_defaults(defaults)
            .skip_files()
            .with_env_prefix("PT_")
            .with_env_vars(EnvSource::fixed([(env_name("PT_", &segments), n.to_string())]))
            .with_logger(Logger::capture(LogLevel::Quiet))
            .build()
            .unwrap();

        prop_assert_eq!(config.get(&key), Some(&Value::Int(n)));
    }

    // Validation reports exactly the required keys that are absent
    #[test]
    fn validation_reports_absent_keys(
        present in prop::collection::vec(segments_strategy(), 0..5),
        required in prop::collection::vec(segments_strategy(), 0..5),
    ) {
        let mut tree = Tree::new();
        for segments in &present {
            // Later keys may conflict with earlier leaves; those are skipped
            let _ = tree.set_path(&segments.join("."), 1);
        }
        let required: Vec<String> = required.iter().map(|s| s.join(".")).collect();

        let expected: Vec<String> = required
            .iter()
            .filter(|key| tree.get_path(key).is_none())
            .cloned()
            .collect();
        prop_assert_eq!(ConfigValidator::missing_keys(&tree, &required), expected);
    }

    // Every leaf passed to update is readable under the prefix
    #[test]
    fn update_leaves_readable(
        entries in prop::collection::btree_map("[a-z]{1,4}", any::<i32>(), 1..6),
        prefix in "[a-z]{1,4}",
    ) {
        let mut config = Config::from_tree(Tree::new());
        let patch: Tree = entries.iter().map(|(k, v)| (k.clone(), *v)).collect();
        config.update(patch, &prefix).unwrap();

        for (key, value) in &entries {
            let full = format!("{prefix}.{key}");
            prop_assert_eq!(config.get(&full), Some(&Value::Int(i64::from(*value))));
        }
    }
}
