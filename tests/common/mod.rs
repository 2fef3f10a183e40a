//! Shared testing utilities for stormjob CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated scratch directory plus a command builder that ignores the caller's environment.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Build a command for the compiled `stormjob` binary.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("stormjob").expect("Failed to locate stormjob binary");
        cmd.current_dir(self.root())
            .env_remove("STORMJOB_CONFIG")
            .env_remove("STORMJOB_LOG")
            .env_remove("SLURM_ARRAY_TASK_ID");
        cmd
    }

    /// Directory for extra job definitions, created on first use.
    pub fn jobs_dir(&self) -> PathBuf {
        let dir = self.root().join("jobs");
        fs::create_dir_all(&dir).expect("Failed to create jobs directory");
        dir
    }

    /// Write a job definition into the jobs directory.
    pub fn write_job(&self, file_name: &str, content: &str) -> PathBuf {
        let path = self.jobs_dir().join(file_name);
        fs::write(&path, content).expect("Failed to write job definition");
        path
    }

    /// Write a configuration file and return its path.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.root().join("stormjob.toml");
        fs::write(&path, content).expect("Failed to write config");
        path
    }
}
