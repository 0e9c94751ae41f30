//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating an isolated temp directory per test
//! - Writing export documents and config files into it
//! - Executing the CLI with a config path that never touches the user's own

use anyhow::Result;
use assert_cmd::Command;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::fixtures::SampleFiles;

const CONFIG_ENV: &str = "CHATFORK_CONFIG";

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use chatfork_testing::TestWorld;
/// use chatfork_testing::fixtures::forked_conversation;
///
/// let world = TestWorld::new().with_document("chat.json", &forked_conversation());
///
/// let result = world.run(&["--format", "json", "forks", "chat.json"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    config_path: PathBuf,
    env_vars: HashMap<String, String>,
    samples: SampleFiles,
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
        let config_path = temp_dir.path().join("config.toml");

        Self {
            temp_dir,
            config_path,
            env_vars: HashMap::new(),
            samples: SampleFiles::new(),
        }
    }

    /// Path of a file inside the temp directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Write raw text to a file in the temp directory.
    pub fn with_file(self, name: &str, contents: &str) -> Self {
        std::fs::write(self.path(name), contents).expect("Failed to write file");
        self
    }

    /// Write a JSON document to a file in the temp directory.
    pub fn with_document(self, name: &str, document: &Value) -> Self {
        let text = serde_json::to_string_pretty(document).expect("Failed to encode document");
        self.with_file(name, &text)
    }

    /// Write the config file the CLI will load.
    pub fn with_config(self, toml: &str) -> Self {
        std::fs::write(&self.config_path, toml).expect("Failed to write config");
        self
    }

    /// Copy a checked-in sample into the temp directory.
    pub fn with_sample(self, sample_name: &str) -> Self {
        self.samples
            .copy_to(sample_name, &self.path(sample_name))
            .expect("Failed to copy sample");
        self
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.current_dir(self.temp_dir.path())
            .env(CONFIG_ENV, &self.config_path)
            .env_remove("RUST_LOG");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute the `chatfork` binary and return the result.
    ///
    /// # Note
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built, so call it from the CLI crate's integration tests.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("chatfork")
            .map_err(|e| anyhow::anyhow!("Failed to find chatfork binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    /// Get stdout as a string.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Get stderr as a string.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
