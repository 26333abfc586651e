//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create a project with `apprig.toml` at its root
    pub fn with_config(config: &str) -> Self {
        let project = Self::new();
        project.create_file("apprig.toml", config);
        project
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    #[allow(dead_code)]
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test project
    #[allow(dead_code)]
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Run apprig in the project directory with the given arguments
#[allow(dead_code)]
pub fn run_apprig(project: &TestProject, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_apprig"));
    cmd.current_dir(project.path());
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("APPRIG_CONFIGURATION");
    for arg in args {
        cmd.arg(arg);
    }
    cmd.output().expect("Failed to execute apprig")
}

/// Run `apprig build` in the project directory
#[allow(dead_code)]
pub fn run_build(project: &TestProject, args: &[&str]) -> Output {
    let mut all = vec!["build"];
    all.extend_from_slice(args);
    run_apprig(project, &all)
}

/// Stdout as a string
#[allow(dead_code)]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Stderr as a string
#[allow(dead_code)]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Two apps, one configuration per app plus one for both
#[allow(dead_code)]
pub const SAMPLE_CONFIG: &str = r#"
[apps.ios]
build = "echo building-ios"
binary_path = "ios/build/App.app"

[apps.android]
build = "echo building-android"
binary_path = "android/app-debug.apk"

[configurations."ios.sim"]
app = "ios"

[configurations."android.emu"]
app = "android"

[configurations.all]
apps = ["android", "ios"]
"#;
