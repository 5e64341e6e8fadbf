//! Test environment builder for isolated claude-plugins testing.
//!
//! Provides `TestEnv` - an isolated project directory with its own
//! node_modules tree, plus helpers to run the CLI against it.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Result of running a claude-plugins CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Check if the command succeeded
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated project directory with helpers to stage npm packages and run
/// the CLI against it.
///
/// Commands run with `--root` pointing at the temp directory and with npm's
/// lifecycle environment variables cleared, so the surrounding cargo
/// invocation never leaks into a test.
pub struct TestEnv {
    /// Temporary directory acting as the project root
    pub project_root: TempDir,
    /// Path to the claude-plugins binary
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: TempDir::new().expect("Failed to create temp project"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_claude-plugins")),
        }
    }

    /// Create an environment whose root already carries a package.json.
    pub fn with_package_json() -> Self {
        let env = Self::new();
        env.write_project_file(
            "package.json",
            "{\n  \"name\": \"test-app\",\n  \"version\": \"1.0.0\"\n}\n",
        );
        env
    }

    /// Get a path relative to the project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Stage node_modules/<name> with the given version. Calling again for
    /// the same name rewrites its package.json in place.
    pub fn install_package(&self, name: &str, version: &str) {
        self.write_project_file(
            &format!("node_modules/{name}/package.json"),
            &format!("{{\"name\": \"{name}\", \"version\": \"{version}\"}}"),
        );
    }

    /// Stage an asset file inside an installed package.
    pub fn write_package_asset(&self, name: &str, relative: &str, content: &str) {
        self.write_project_file(&format!("node_modules/{name}/{relative}"), content);
    }

    /// Stage a skill directory inside an installed package.
    pub fn write_package_skill(&self, name: &str, skill: &str) {
        self.write_package_asset(name, &format!("skills/{skill}/SKILL.md"), "# skill\n");
    }

    /// Delete an installed package from node_modules.
    pub fn uninstall_package(&self, name: &str) {
        std::fs::remove_dir_all(self.project_path(&format!("node_modules/{name}")))
            .expect("Failed to remove package");
    }

    /// Write a file to the project directory
    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Read a file from the project directory
    pub fn read_project_file(&self, relative_path: &str) -> String {
        let full_path = self.project_path(relative_path);
        std::fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative_path, e))
    }

    /// Parse the plugins manifest from the project
    pub fn read_manifest(&self) -> serde_json::Value {
        serde_json::from_str(&self.read_project_file(".claude/.plugins-manifest.json"))
            .expect("Manifest is not valid JSON")
    }

    /// Run claude-plugins against this project via --root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run claude-plugins against this project with extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path())
            .arg("--root")
            .arg(self.project_root.path())
            .args(args);
        clear_npm_env(&mut cmd);

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute claude-plugins");
        output_to_result(output)
    }

    /// Run from a specific directory without --root, exercising project
    /// root discovery.
    pub fn run_discovering_root(&self, cwd: &Path, args: &[&str]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd).args(args);
        clear_npm_env(&mut cmd);

        let output = cmd.output().expect("Failed to execute claude-plugins");
        output_to_result(output)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn clear_npm_env(cmd: &mut Command) {
    cmd.env_remove("CI")
        .env_remove("npm_config_global")
        .env_remove("npm_package_name")
        .env_remove("INIT_CWD");
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
