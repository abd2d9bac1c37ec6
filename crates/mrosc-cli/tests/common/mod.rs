//! Common test utilities for CLI testing.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};

pub const OWNER: &str = "c0ffee00-1234-4abc-9def-0123456789ab";
pub const OTHER_OWNER: &str = "0a1b2c3d-4e5f-4a7b-8c9d-0e1f2a3b4c5d";

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

    /// Write `.mrosc/config.yaml`
    pub fn with_config(self, config: &str) -> Self {
        let dir = self.path().join(".mrosc");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        std::fs::write(dir.join("config.yaml"), config).expect("Failed to write config");
        self
    }

    /// Write a file in the project directory and return its path
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Get path to temp directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a command configured for this context
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("mrosc").expect("Binary not found");
        cmd.current_dir(self.path())
            .env_remove("MROSC_CONFIG")
            .env_remove("MROSC_PROJECT_DIR")
            .env_remove("MROSC_TODAY")
            .env_remove("MROSC_LOG_LEVEL")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// One export row in YAML.
pub fn yaml_row(owner: &str, doc_type: &str, issue: Option<&str>, expiry: Option<&str>) -> String {
    let date = |d: Option<&str>| d.map(|d| format!("\"{d}\"")).unwrap_or_else(|| "null".to_string());
    format!(
        "- id: {}\n  owner_id: {owner}\n  document_type: {doc_type}\n  issue_date: {}\n  expiry_date: {}\n  uploaded_at: \"2024-12-20T09:00:00Z\"\n  uploaded_by: analista\n",
        uuid_for(doc_type, owner),
        date(issue),
        date(expiry)
    )
}

fn uuid_for(doc_type: &str, owner: &str) -> String {
    let seed = doc_type
        .bytes()
        .chain(owner.bytes())
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
    format!("00000000-0000-4000-8000-{:012x}", seed & 0xffff_ffff_ffff)
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
        assert!(stdout.contains(text), "stdout did not contain '{text}'\nstdout: {stdout}");
    }

    fn assert_stderr_contains(&self, text: &str) {
        let stderr = String::from_utf8_lossy(&self.stderr);
        assert!(stderr.contains(text), "stderr did not contain '{text}'\nstderr: {stderr}");
    }

    fn assert_exit_code(&self, code: i32) {
        assert_eq!(
            self.status.code(),
            Some(code),
            "Expected exit code {code}, got {:?}\nstderr: {}",
            self.status.code(),
            String::from_utf8_lossy(&self.stderr)
        );
    }
}

/// JSON output helpers
pub mod json {
    use serde_json::Value;

    pub fn parse_output(output: &[u8]) -> Value {
        serde_json::from_slice(output).expect("Failed to parse JSON output")
    }

    pub fn assert_error(json: &Value, code: &str) {
        assert_eq!(json["success"], false, "Expected success: false in JSON output");
        assert_eq!(json["error"]["code"], code, "Expected error code: {code}");
    }
}
