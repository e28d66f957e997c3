//! TestWorld pattern for declarative integration test setup.
//!
//! Each world owns a temporary directory that serves as both the working
//! directory and the `--data-dir` of every CLI invocation.

use anyhow::{Context, Result};
use assert_cmd::Command;
use rollcall_store::{KeyValueStore, SqliteStore};
use rollcall_types::CLASSES_KEY;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::RosterFixture;

const DEFAULT_STORAGE_FILE: &str = "rollcall.db";

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use rollcall_testing::TestWorld;
///
/// let world = TestWorld::new();
/// world.run(&["class", "add", "Math"]).unwrap();
///
/// let result = world.run_json(&["show"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".rollcall");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self {
            temp_dir,
            data_dir,
            env_vars: HashMap::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Working directory of every invocation; relative export paths land here.
    pub fn cwd(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(DEFAULT_STORAGE_FILE)
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Write `config.toml` into the data directory.
    pub fn with_config(self, toml: &str) -> Self {
        std::fs::write(self.data_dir.join("config.toml"), toml).expect("Failed to write config");
        self
    }

    /// Seed the default store with a roster, as if a previous run had saved it.
    pub fn with_roster(self, roster: RosterFixture) -> Self {
        let value = roster.to_value().expect("Failed to encode roster");
        self.seed_classes(&value).expect("Failed to seed roster");
        self
    }

    pub fn seed_classes(&self, value: &Value) -> Result<()> {
        let mut store = SqliteStore::open(&self.storage_path())?;
        store.set(CLASSES_KEY, value)?;
        Ok(())
    }

    /// Read back the stored roster blob.
    pub fn stored_classes(&self) -> Result<Option<Value>> {
        let store = SqliteStore::open(&self.storage_path())?;
        Ok(store.get(CLASSES_KEY)?)
    }

    /// Configure a CLI command with this world's data-dir, cwd and env vars.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command, format: &str) -> &'a mut Command {
        cmd.arg("--data-dir")
            .arg(self.data_dir())
            .arg("--format")
            .arg(format);

        cmd.current_dir(self.cwd());
        cmd.env_remove("ROLLCALL_PATH");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute the CLI with plain output.
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        self.execute(args, "plain")
    }

    /// Execute the CLI with `--format json`.
    pub fn run_json(&self, args: &[&str]) -> Result<CliResult> {
        self.execute(args, "json")
    }

    #[allow(deprecated)]
    fn execute(&self, args: &[&str], format: &str) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("rollcall")
            .map_err(|e| anyhow::anyhow!("Failed to find rollcall binary: {}", e))?;

        self.configure_command(&mut cmd, format);
        cmd.args(args);

        let output = cmd.output().context("Failed to run rollcall")?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.stdout)
            .with_context(|| format!("stdout is not JSON:\n{}", self.stdout))
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
