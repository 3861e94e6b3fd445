//! Isolated workspaces for driving the `mint` binary.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use assert_cmd::Command;
use tempfile::TempDir;

/// A temporary project root with an isolated config location.
///
/// `MINT_CONFIG` points at a file inside the temp dir so the user's real
/// config is never read.
pub struct MintWorkspace {
    pub root: TempDir,
}

impl MintWorkspace {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().unwrap(),
        }
    }

    /// A workspace that has already run `mint init`.
    pub fn init() -> Self {
        let workspace = Self::new();
        workspace.mint().arg("init").assert().success();
        workspace
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn document(&self) -> PathBuf {
        self.root.path().join(".mint").join("issues.yaml")
    }

    /// A `mint` command rooted in this workspace with a scrubbed environment.
    pub fn mint(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_mint"));
        cmd.current_dir(self.root.path())
            .env("MINT_CONFIG", self.root.path().join("user-config.yaml"))
            .env("NO_COLOR", "1")
            .env_remove("MINT_FILE")
            .env_remove("MINT_PREFIX")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Create an issue and return its full ID.
    pub fn create(&self, title: &str) -> String {
        let run = run_mint(self, ["create", title, "--json"], "create");
        assert!(run.status.success(), "create failed: {}", run.stderr);
        let json: serde_json::Value = serde_json::from_str(&run.stdout).unwrap();
        json["id"].as_str().unwrap().to_string()
    }
}

impl Default for MintWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Captured result of one `mint` invocation.
pub struct RunResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl RunResult {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("invalid JSON ({e}): {}", self.stdout))
    }
}

/// Run `mint` with `args`; `label` tags failures in test output.
pub fn run_mint<I, S>(workspace: &MintWorkspace, args: I, label: &str) -> RunResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = workspace
        .mint()
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("{label}: failed to spawn mint: {e}"));
    RunResult {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
