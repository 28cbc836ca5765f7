//! End-to-end tests for the `tasks` binary.
//!
//! The external tools are replaced with `sh`, which then reads a script named
//! after the tool subcommand (`build` or `run`) from the working directory.

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

const TOOL_VARS: [&str; 4] = [
    "TASKS_BAZEL",
    "TASKS_IBAZEL",
    "TASKS_WASM_TARGET",
    "TASKS_SERVER_TARGET",
];

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        fs::write(dir.path().join("build"), "echo \"built $1\" > build.out\n").unwrap();
        fs::write(dir.path().join("run"), "echo \"served $1\" > run.out\n").unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn script(&self, name: &str, body: &str) {
        fs::write(self.path().join(name), body).unwrap();
    }

    fn output(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.path().join(name)).ok()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tasks").unwrap();
        for var in TOOL_VARS {
            cmd.env_remove(var);
        }
        cmd.env("TASKS_BAZEL", "sh")
            .env("TASKS_IBAZEL", "sh")
            .arg("-C")
            .arg(self.path());
        cmd
    }
}

#[test]
fn build_wasm_runs_only_the_build_tool() {
    let ws = Workspace::new();
    ws.cmd().arg("build-wasm").assert().success();

    assert_eq!(
        ws.output("build.out").as_deref(),
        Some("built //src/engine:engine_lib_wasm_bindgen\n")
    );
    assert_eq!(ws.output("run.out"), None);
}

#[test]
fn serve_runs_only_the_server_tool() {
    let ws = Workspace::new();
    ws.cmd().arg("serve").assert().success();

    assert_eq!(ws.output("run.out").as_deref(), Some("served //src/web:server\n"));
    assert_eq!(ws.output("build.out"), None);
}

#[test]
fn targets_can_be_overridden() {
    let ws = Workspace::new();
    ws.cmd()
        .env("TASKS_WASM_TARGET", "//engine:lib")
        .arg("build-wasm")
        .assert()
        .success();

    assert_eq!(ws.output("build.out").as_deref(), Some("built //engine:lib\n"));
}

#[test]
fn missing_subcommand_prints_usage() {
    let ws = Workspace::new();
    ws.cmd().assert().code(2).stderr(contains("Usage"));

    assert_eq!(ws.output("build.out"), None);
    assert_eq!(ws.output("run.out"), None);
}

#[test]
fn bare_invocation_shows_help() {
    Command::cargo_bin("tasks")
        .unwrap()
        .assert()
        .code(2)
        .stderr(contains("build-wasm"))
        .stderr(contains("Watch source code and run the development HTTP server"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    let ws = Workspace::new();
    ws.cmd().arg("build_wasm").assert().code(2);
    assert_eq!(ws.output("build.out"), None);
}

#[test]
fn build_wasm_failure_exits_non_zero() {
    let ws = Workspace::new();
    ws.script("build", "exit 3\n");
    ws.cmd()
        .arg("build-wasm")
        .assert()
        .code(1)
        .stderr(contains("Task 'build-wasm' failed"))
        .stderr(contains("exited with status 3"));
}

#[test]
fn build_wasm_missing_tool_exits_non_zero() {
    let ws = Workspace::new();
    ws.cmd()
        .env("TASKS_BAZEL", "nonexistent_bazel_12345")
        .arg("build-wasm")
        .assert()
        .failure();
}

#[cfg(unix)]
#[test]
fn serve_interrupted_exits_zero() {
    let ws = Workspace::new();
    ws.script("run", "kill -INT $$\n");
    ws.cmd().arg("serve").assert().success();
}

#[cfg(unix)]
#[test]
fn serve_exits_zero_when_runner_is_interrupted() {
    let ws = Workspace::new();
    // The tool fails on its own after the runner has seen Ctrl-C.
    ws.script("run", "sleep 0.3\nkill -INT $PPID\nsleep 0.3\nexit 7\n");
    ws.cmd()
        .arg("serve")
        .timeout(Duration::from_secs(20))
        .assert()
        .success()
        .stdout(contains("Development server stopped"));
}

#[cfg(unix)]
#[test]
fn serve_kills_tool_on_second_interrupt() {
    let ws = Workspace::new();
    ws.script(
        "run",
        "trap '' INT\nsleep 0.3\nkill -INT $PPID\nsleep 0.3\nkill -INT $PPID\nexec sleep 30\n",
    );
    ws.cmd()
        .arg("serve")
        .timeout(Duration::from_secs(20))
        .assert()
        .success()
        .stdout(contains("Interrupted again"));
}

#[test]
fn serve_failure_exits_non_zero() {
    let ws = Workspace::new();
    ws.script("run", "exit 1\n");
    ws.cmd()
        .arg("serve")
        .assert()
        .code(1)
        .stderr(contains("Task 'serve' failed"));
}

#[test]
fn missing_work_dir_is_an_error() {
    let ws = Workspace::new();
    Command::cargo_bin("tasks")
        .unwrap()
        .arg("-C")
        .arg(ws.path().join("does-not-exist"))
        .arg("build-wasm")
        .assert()
        .failure()
        .stderr(contains("Working directory not found"));
}

#[cfg(unix)]
#[test]
fn build_wasm_launches_a_single_process() {
    use std::os::unix::fs::PermissionsExt;

    let ws = Workspace::new();
    let bin = TempDir::new().unwrap();
    let log = ws.path().join("launches.log");
    let which = bin.path().join("which");
    fs::write(
        &which,
        format!("#!/bin/sh\necho \"which $*\" >> '{}'\n", log.display()),
    )
    .unwrap();
    fs::set_permissions(&which, fs::Permissions::from_mode(0o755)).unwrap();

    let path = format!(
        "{}:{}",
        bin.path().display(),
        std::env::var("PATH").unwrap_or_default()
    );
    ws.cmd()
        .env("PATH", path)
        .arg("build-wasm")
        .assert()
        .success()
        .stdout(contains("not found in PATH").not());

    assert!(!log.exists(), "unexpected helper launch: {:?}", fs::read_to_string(&log));
    assert!(ws.output("build.out").is_some());
}

#[test]
fn debug_flag_dumps_resolved_configuration() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("--debug")
        .arg("build-wasm")
        .assert()
        .success()
        .stdout(contains("Resolved configuration"))
        .stdout(contains(r#""program":"sh""#));
}
