//! Common test utilities for sfmc-build integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A throwaway project root for integration tests
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new, empty project root
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Write a unit: its manifest plus the given files under `<dir>/src/`
    pub fn create_unit(
        &self,
        dir: &str,
        manifest_file: &str,
        manifest: &serde_json::Value,
        sources: &[(&str, &str)],
    ) {
        let json = serde_json::to_string_pretty(manifest).expect("Failed to serialize manifest");
        self.write_file(&format!("{dir}/{manifest_file}"), &json);
        for (name, content) in sources {
            self.write_file(&format!("{dir}/src/{name}"), content);
        }
    }

    /// The sfmc-build binary, rooted at this project
    pub fn cmd(&self) -> Command {
        let mut cmd = sfmc_cmd();
        cmd.arg("--root").arg(&self.path);
        cmd
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// The sfmc-build binary with a clean environment
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated, dead_code)]
pub fn sfmc_cmd() -> Command {
    let mut cmd = Command::cargo_bin("sfmc-build").expect("binary is built");
    cmd.env_remove("SFMC_BUILD_ROOT")
        .env_remove("SFMC_BUILD_DOCS_CONFIG")
        .env("NO_COLOR", "1");
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_file_operations() {
        let workspace = TestWorkspace::new();
        workspace.write_file("test/file.txt", "hello");
        assert!(workspace.file_exists("test/file.txt"));
        assert_eq!(workspace.read_file("test/file.txt"), "hello");
    }
}
