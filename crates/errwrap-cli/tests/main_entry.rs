//! Integration tests for the `errwrap` binary entry point.
//!
//! Verifies informational flags, user-facing error reporting, and a full
//! run with stub tools standing in for the Go toolchain.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::{contains, starts_with};

#[test]
fn version_flag_succeeds() {
    let mut command = cargo_bin_cmd!("errwrap");
    command.arg("--version");
    command.assert().success().stdout(contains("errwrap"));
}

#[test]
fn missing_root_exits_with_failure() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut command = cargo_bin_cmd!("errwrap");
    command.arg(dir.path().join("absent"));
    command
        .assert()
        .failure()
        .stderr(starts_with("ERROR: failed to walk"));
}

#[cfg(unix)]
#[test]
fn rewrites_returns_in_place() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = dir.path().join("main.go");
    std::fs::write(
        &source,
        "package main\n\nfunc run() (int, error) {\n\treturn 0, fmt.Errorf(\"boom\")\n}\n",
    )
    .expect("write source");

    let mut command = cargo_bin_cmd!("errwrap");
    command
        .args(["--gofmt", "true", "--goimports", "true"])
        .arg(dir.path());
    command
        .assert()
        .success()
        .stdout("processing: main.go\n");

    let rewritten = std::fs::read_to_string(&source).expect("read back");
    assert!(
        rewritten.contains("\treturn 0, errors.Wrap(fmt.Errorf(\"boom\"))\n"),
        "unexpected output: {rewritten}"
    );
}
