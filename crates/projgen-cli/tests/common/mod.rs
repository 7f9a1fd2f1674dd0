//! Common test utilities for CLI testing.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};

/// Test context with a temporary project directory
pub struct TestContext {
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Write `.projgen/config.yaml`
    pub fn with_config(self, config: &str) -> Self {
        let dir = self.path().join(".projgen");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        std::fs::write(dir.join("config.yaml"), config).expect("Failed to write config");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Default output directory
    pub fn generated(&self) -> PathBuf {
        self.path().join("generated")
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path().join(relative))
            .unwrap_or_else(|e| panic!("Failed to read {relative}: {e}"))
    }

    /// A command running in this context, isolated from the caller's environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("projgen").expect("Binary not found");
        cmd.current_dir(self.path())
            .env_remove("PROJGEN_CONFIG")
            .env_remove("PROJGEN_PROJECT_DIR")
            .env_remove("PROJGEN_OUTPUT_DIR")
            .env_remove("RUST_LOG")
            .env_remove("PROJGEN_LOG_LEVEL");
        cmd
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Assert helpers for CLI output
pub trait OutputAssertions {
    fn assert_success(&self);
    fn assert_stdout_contains(&self, text: &str);
    fn assert_stderr_contains(&self, text: &str);
    fn assert_exit_code(&self, code: i32);
}

impl OutputAssertions for Output {
    fn assert_success(&self) {
        assert!(
            self.status.success(),
            "Command failed with status: {}\nstderr: {}",
            self.status,
            String::from_utf8_lossy(&self.stderr)
        );
    }

    fn assert_stdout_contains(&self, text: &str) {
        let stdout = String::from_utf8_lossy(&self.stdout);
        assert!(
            stdout.contains(text),
            "stdout did not contain '{text}'\nstdout: {stdout}"
        );
    }

    fn assert_stderr_contains(&self, text: &str) {
        let stderr = String::from_utf8_lossy(&self.stderr);
        assert!(
            stderr.contains(text),
            "stderr did not contain '{text}'\nstderr: {stderr}"
        );
    }

    fn assert_exit_code(&self, code: i32) {
        assert_eq!(
            self.status.code(),
            Some(code),
            "Expected exit code {code}, got {:?}",
            self.status.code()
        );
    }
}
