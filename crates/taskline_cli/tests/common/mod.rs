#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// A scratch directory holding the task file and config for one test.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    /// Sandbox whose task file already holds `lines`.
    pub fn with_store(lines: &[&str]) -> Self {
        let sandbox = Self::new();
        let mut content = lines.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        std::fs::write(sandbox.store_path(), content).expect("write store");
        sandbox
    }

    pub fn store_path(&self) -> PathBuf {
        self.dir.path().join("tasks.txt")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.json")
    }

    pub fn store_content(&self) -> String {
        std::fs::read_to_string(self.store_path()).expect("read store")
    }

    pub fn command(&self) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_taskline"));
        command
            .env("TASKLINE_STORE_PATH", self.store_path())
            .env("TASKLINE_CONFIG_PATH", self.config_path())
            .env_remove("RUST_LOG");
        command
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command()
            .args(args)
            .output()
            .expect("failed to run taskline")
    }

    pub fn run_interactive(&self, input: &str) -> Output {
        let mut child = self
            .command()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn interactive session");

        {
            let stdin = child.stdin.as_mut().expect("stdin");
            stdin
                .write_all(input.as_bytes())
                .expect("failed to write to stdin");
        }

        child
            .wait_with_output()
            .expect("failed to read interactive output")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
