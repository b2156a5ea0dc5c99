//! Common test utilities for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use tiers::{LogLevel, Logger, Tree};

/// Path to a file under `tests/fixtures/configs`.
#[allow(dead_code)]
pub fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("configs")
        .join(relative)
}

/// Writes `content` to `dir/filename` and returns the path.
#[allow(dead_code)]
pub fn create_temp_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}

/// Builds a tree from a JSON object literal.
#[allow(dead_code)]
pub fn tree_from_json(value: serde_json::Value) -> Tree {
    match value {
        serde_json::Value::Object(map) => Tree::from(map),
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// A logger that records nothing.
#[allow(dead_code)]
pub fn quiet_logger() -> Logger {
    Logger::capture(LogLevel::Quiet)
}
