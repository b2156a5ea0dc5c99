//! Integration tests for layered configuration assembly.
//!
//! These tests exercise the full workflow: file discovery, parsing in each
//! format, environment overrides, validation, reload, and save.
//!
//! Tests that modify process environment variables are marked `#[serial]`
//! and restore the previous values through [`EnvGuard`].

mod common;

use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;
use tiers::config::EnvSource;
use tiers::{Config, ConfigBuilder, Error, ErrorKind, Format, LogLevel, Logger, Tree, Value};

use common::{create_temp_config, fixture_path, quiet_logger, tree_from_json};

/// RAII guard for setting and restoring environment variables.
struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

impl EnvGuard {
    fn new(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(val) => env::set_var(&self.key, val),
            None => env::remove_var(&self.key),
        }
    }
}

// ============================================================================
// Loading Each Format
// ============================================================================

#[test]
fn test_load_yaml_fixture() {
    let config = ConfigBuilder::new()
        .with_source(fixture_path("app.yaml"))
        .with_logger(quiet_logger())
        .build()
        .unwrap();

    assert_eq!(config.get("app.name"), Some(&Value::from("Fixture App")));
    assert_eq!(config.get("app.version"), Some(&Value::from("2.1.0")));
    assert_eq!(config.get("app.debug"), Some(&Value::Bool(false)));
    assert_eq!(config.get("server.port"), Some(&Value::Int(8080)));
    assert_eq!(config.get("database.pool.timeout"), Some(&Value::Float(30.5)));
    assert_eq!(
        config.get("server.allowed_hosts"),
        Some(&Value::Sequence(vec![
            Value::from("localhost"),
            Value::from("example.com")
        ]))
    );
}

#[test]
fn test_yaml_and_json_fixtures_agree() {
    let yaml = ConfigBuilder::new()
        .with_source(fixture_path("app.yaml"))
        .build()
        .unwrap();
    let json = ConfigBuilder::new()
        .with_source(fixture_path("app.json"))
        .build()
        .unwrap();

    assert_eq!(yaml.items("app"), json.items("app"));
    assert_eq!(yaml.items("server"), json.items("server"));
}

#[test]
fn test_load_ini_fixture() {
    let config = ConfigBuilder::new()
        .with_source(fixture_path("app.ini"))
        .build()
        .unwrap();

    assert_eq!(config.get("log_level"), Some(&Value::from("info")));
    assert_eq!(config.get("app.name"), Some(&Value::from("Fixture App")));
    // INI values are not coerced
    assert_eq!(config.get("app.debug"), Some(&Value::from("false")));
    assert_eq!(config.get("server.port"), Some(&Value::from("8080")));
    // Inherited from [DEFAULT]
    assert_eq!(config.get("server.timeout"), Some(&Value::from("30")));
    assert!(!config.contains("DEFAULT"));
}

#[test]
fn test_empty_yaml_is_empty_layer() {
    let defaults = tree_from_json(serde_json::json!({"a": 1}));
    let config = ConfigBuilder::new()
        .with_defaults(defaults.clone())
        .with_source(fixture_path("empty.yaml"))
        .build()
        .unwrap();
    assert_eq!(config.tree(), &defaults);
}

#[test]
fn test_non_mapping_document_is_format_error() {
    let err = ConfigBuilder::new()
        .with_source(fixture_path("list.yaml"))
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(err.message().contains("mapping"));
}

#[test]
fn test_malformed_json_is_format_error_with_path() {
    let path = fixture_path("invalid.json");
    let err = ConfigBuilder::new().with_source(&path).build().unwrap_err();

    match &err {
        Error::Format {
            format: Format::Json,
            path: Some(p),
            ..
        } => assert_eq!(p, &path),
        other => panic!("unexpected error: {other}"),
    }
    let details = err.details();
    assert_eq!(details.get("format_type"), Some(&Value::from("json")));
}

#[test]
fn test_missing_explicit_file_is_file_access_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = ConfigBuilder::new()
        .with_source(temp_dir.path().join("absent.yaml"))
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileAccess);
    assert!(err.is_not_found());
}

// ============================================================================
// Layering
// ============================================================================

#[test]
fn test_defaults_file_env_precedence() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_temp_config(
        temp_dir.path(),
        "config.yaml",
        "app:\n  name: File\nserver:\n  port: 8080\n",
    );

    let config = ConfigBuilder::new()
        .with_defaults(tree_from_json(
            serde_json::json!({"app": {"name": "Def", "debug": false}}),
        ))
        .with_source(path)
        .with_env_prefix("PFX_")
        .with_env_vars(EnvSource::fixed([("PFX_SERVER__PORT", "9000")]))
        .with_logger(quiet_logger())
        .build()
        .unwrap();

    assert_eq!(config.get("app.name"), Some(&Value::from("File")));
    assert_eq!(config.get("app.debug"), Some(&Value::Bool(false)));
    assert_eq!(config.get("server.port"), Some(&Value::Int(9000)));
}

#[test]
fn test_file_scalar_replaces_default_section() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_temp_config(temp_dir.path(), "config.json", r#"{"db": "sqlite"}"#);

    let config = ConfigBuilder::new()
        .with_defaults(tree_from_json(serde_json::json!({"db": {"host": "h"}})))
        .with_source(path)
        .build()
        .unwrap();
    assert_eq!(config.get("db"), Some(&Value::from("sqlite")));
    assert_eq!(config.get("db.host"), None);
}

#[test]
fn test_search_uses_first_directory_with_a_match() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    create_temp_config(second.path(), "config.yaml", "source: second\n");
    create_temp_config(first.path(), "app_config.json", r#"{"source": "first"}"#);

    let config = ConfigBuilder::new()
        .with_search_paths([first.path(), second.path()])
        .build()
        .unwrap();
    assert_eq!(config.get("source"), Some(&Value::from("first")));
}

#[test]
#[serial]
fn test_process_environment_overrides() {
    let _port = EnvGuard::new("TIERS_IT_SERVER__PORT", "7000");
    let _debug = EnvGuard::new("TIERS_IT_DEBUG", "yes");

    let config = ConfigBuilder::new()
        .with_defaults(tree_from_json(serde_json::json!({"server": {"port": 80}})))
        .skip_files()
        .with_env_prefix("TIERS_IT_")
        .with_logger(quiet_logger())
        .build()
        .unwrap();

    assert_eq!(config.get("server.port"), Some(&Value::Int(7000)));
    assert_eq!(config.get("debug"), Some(&Value::Bool(true)));
}

#[test]
#[serial]
fn test_from_env_reads_process() {
    let _guard = EnvGuard::new("TIERS_FROMENV_A__B", "3.5");
    let config = Config::from_env("TIERS_FROMENV_");
    assert_eq!(config.get("a.b"), Some(&Value::Float(3.5)));
}

#[test]
#[serial]
fn test_reload_rereads_process_environment() {
    let _guard = EnvGuard::new("TIERS_RELOAD_LEVEL", "1.5");
    let mut config = ConfigBuilder::new()
        .skip_files()
        .with_env_prefix("TIERS_RELOAD_")
        .with_logger(quiet_logger())
        .build()
        .unwrap();
    assert_eq!(config.get("level"), Some(&Value::Float(1.5)));

    env::set_var("TIERS_RELOAD_LEVEL", "2.5");
    config.reload().unwrap();
    assert_eq!(config.get("level"), Some(&Value::Float(2.5)));
}

#[test]
fn test_reload_reuses_injected_environment() {
    let mut config = ConfigBuilder::new()
        .skip_files()
        .with_env_prefix("X_")
        .with_env_vars(EnvSource::fixed([("X_K", "v")]))
        .build()
        .unwrap();
    config.set("k", "edited").unwrap();
    config.reload().unwrap();
    assert_eq!(config.get("k"), Some(&Value::from("v")));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_required_keys_all_reported() {
    let err = ConfigBuilder::new()
        .with_defaults(tree_from_json(serde_json::json!({"app": {"version": "1.0.0"}})))
        .skip_files()
        .with_required(["app.name", "server.host"])
        .build()
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.missing_keys(), ["app.name", "server.host"]);
    assert!(err.message().contains("app.name"));
    assert!(err.message().contains("server.host"));
}

#[test]
fn test_required_key_satisfied_by_env() {
    let config = ConfigBuilder::new()
        .skip_files()
        .with_env_prefix("APP_")
        .with_env_vars(EnvSource::fixed([("APP_DATABASE__URL", "postgres://x")]))
        .with_required(["database.url"])
        .build()
        .unwrap();
    assert_eq!(config.get("database.url"), Some(&Value::from("postgres://x")));
}

// ============================================================================
// Save and Convert
// ============================================================================

#[test]
fn test_save_round_trips_through_each_format() {
    let temp_dir = TempDir::new().unwrap();
    let config = ConfigBuilder::new()
        .with_source(fixture_path("app.json"))
        .build()
        .unwrap();

    for name in ["out.yaml", "out.json"] {
        let path = temp_dir.path().join(name);
        config.save(Some(&path)).unwrap();
        let reloaded = ConfigBuilder::new().with_source(&path).build().unwrap();
        assert_eq!(reloaded.tree(), config.tree(), "{name}");
    }
}

#[test]
fn test_save_ini_keeps_scalar_sections() {
    let temp_dir = TempDir::new().unwrap();
    let config = ConfigBuilder::new()
        .with_source(fixture_path("app.yaml"))
        .build()
        .unwrap();

    let path = temp_dir.path().join("out.ini");
    config.save(Some(&path)).unwrap();
    let reloaded = ConfigBuilder::new().with_source(&path).build().unwrap();

    assert_eq!(reloaded.get("server.port"), Some(&Value::from("8080")));
    assert_eq!(reloaded.get("database.url"), Some(&Value::from("postgres://localhost/app")));
    // Sequences and nested sections do not survive INI
    assert!(!reloaded.contains("server.allowed_hosts"));
    assert!(!reloaded.contains("database.pool"));
}

#[test]
fn test_save_to_nested_new_directory() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("a").join("b").join("config.yaml");
    let mut config = Config::from_tree(Tree::new());
    config.set("k", 1).unwrap();

    config.save(Some(&path)).unwrap();
    assert!(path.exists());
}

#[test]
fn test_file_logger_records_loading() {
    let temp_dir = TempDir::new().unwrap();
    let logger = Logger::to_file(temp_dir.path(), "demo", LogLevel::Verbose).unwrap();

    ConfigBuilder::new()
        .with_source(fixture_path("app.yaml"))
        .with_logger(logger.clone())
        .build()
        .unwrap();

    let log_path = logger.file_path().unwrap().to_path_buf();
    let contents = fs::read_to_string(log_path).unwrap();
    assert!(contents.contains("INFO: loaded yaml configuration from"));
}
