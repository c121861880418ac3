//! Common test utilities shared across integration tests.
//!
//! Note: Clippy cannot track usage across integration test files,
//! hence the `allow(dead_code)` annotation.
#![cfg(test)]
#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestFixture {
    _temp_dir: TempDir,
    data_dir: PathBuf,
    input_dir: PathBuf,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".sincelog");
        let input_dir = temp_dir.path().join("input");

        fs::create_dir_all(&input_dir).expect("Failed to create input dir");

        Self {
            _temp_dir: temp_dir,
            data_dir,
            input_dir,
        }
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    #[allow(deprecated)]
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("sincelog").expect("Failed to find sincelog binary");
        cmd.arg("--data-dir")
            .arg(&self.data_dir)
            .env_remove("SINCELOG_PATH")
            .env_remove("SINCELOG_LOG");
        cmd
    }

    pub fn write_document(&self, name: &str, document: &Value) -> PathBuf {
        let path = self.input_dir.join(name);
        fs::write(&path, serde_json::to_string_pretty(document).unwrap())
            .expect("Failed to write import document");
        path
    }

    pub fn import(&self, document: &Value) -> anyhow::Result<()> {
        let path = self.write_document("import.json", document);
        let output = self.command().arg("import").arg(&path).output()?;

        if !output.status.success() {
            anyhow::bail!(
                "import failed: {}",
                String::from_utf8_lossy(&output.stderr)
            );
        }
        Ok(())
    }

    pub fn write_config(&self, content: &str) {
        fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        fs::write(self.data_dir.join("config.toml"), content).expect("Failed to write config");
    }
}

/// A small release: three introduced entries, one modified, one deprecated.
pub fn release_42() -> Value {
    json!({
        "version": "4.2",
        "entries": [
            {
                "post_type": "function",
                "title": "b_func",
                "packages": ["WordPress"],
                "tags": [{"name": "since", "content": "4.2"}]
            },
            {
                "post_type": "function",
                "title": "a_func",
                "tags": [{"name": "since", "content": "4.2"}]
            },
            {
                "post_type": "class",
                "title": "c_class",
                "source_file": "wp-includes/class-c.php",
                "ticket": "30000",
                "tags": [{"name": "since", "content": "4.2"}]
            },
            {
                "post_type": "function",
                "title": "mod_func",
                "tags": [
                    {"name": "since", "content": "4.0"},
                    {"name": "since", "content": "4.2", "description": "Added the $args parameter."}
                ]
            },
            {
                "post_type": "hook",
                "title": "old_hook",
                "tags": [
                    {"name": "since", "content": "4.0"},
                    {"name": "deprecated", "content": "4.2", "description": "This hook has been deprecated. Use new_hook instead."}
                ]
            }
        ]
    })
}
