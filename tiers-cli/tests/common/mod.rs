//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with a temporary directory
//! - Command builder helpers isolated from the caller's environment
//! - Fixture files in each supported format

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Sample YAML configuration used across tests.
#[allow(dead_code)]
pub const SAMPLE_YAML: &str = "\
app:
  name: Demo
  debug: false
server:
  host: localhost
  port: 8080
";

/// Test environment with an isolated temporary directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a command builder for the tiers binary.
    ///
    /// Variables that change output are removed so the caller's shell
    /// cannot leak into tests.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("tiers").expect("Failed to find tiers binary");
        cmd.current_dir(&self.temp_path)
            .env_remove("TIERS_FORMAT")
            .env_remove("TIERS_LOG_MODE");
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Path of a file in the test environment (not created).
    pub fn file(&self, name: &str) -> PathBuf {
        self.temp_path.join(name)
    }

    /// Write a file in the test environment and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.file(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Read a file from the test environment.
    pub fn read_file(&self, name: &str) -> String {
        fs::read_to_string(self.file(name)).expect("Failed to read test file")
    }

    /// Write [`SAMPLE_YAML`] to `config.yaml` and return its path.
    pub fn sample_config(&self) -> PathBuf {
        self.write_file("config.yaml", SAMPLE_YAML)
    }

    /// Run `tiers get` and return trimmed stdout.
    pub fn get(&self, file: &Path, key: &str) -> String {
        let output = self
            .command()
            .arg("get")
            .arg(file)
            .arg(key)
            .output()
            .expect("Failed to run get command");

        assert!(
            output.status.success(),
            "Get failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .to_string()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
