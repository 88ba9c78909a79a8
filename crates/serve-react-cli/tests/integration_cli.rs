//! Integration tests for the CLI process contract.
//!
//! Runs the real binary: usage handling, exit codes, and the
//! build-failure path that must never start a server.

use assert_cmd::Command;
use predicates::prelude::*;
use std::net::{TcpListener, TcpStream};
use std::time::Duration;

fn serve_react() -> Command {
    let mut cmd = Command::cargo_bin("serve-react").unwrap();
    cmd.timeout(Duration::from_secs(120));
    cmd
}

/// Reserve a port that is free right now.
fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[test]
fn test_no_args_prints_usage_and_exits_zero() {
    serve_react()
        .assert()
        .success()
        .stderr(
            predicate::str::contains("No serving directory specified")
                .and(predicate::str::contains("Serving directory"))
                .and(predicate::str::contains("Entry file")),
        );
}

#[test]
fn test_help_exits_zero() {
    serve_react()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve-react"))
        .stdout(predicate::str::contains("--typescript"));
}

#[test]
fn test_version_exits_zero() {
    serve_react()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve-react"));
}

#[test]
fn test_invalid_port_is_a_hard_parse_error() {
    serve_react()
        .args(["public", "--port", "not-a-number"])
        .assert()
        .failure();
}

#[test]
fn test_build_failure_exits_nonzero_and_never_serves() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::create_dir(temp.path().join("public")).unwrap();
    let port = free_port();

    // --typescript with no index.tsx present: the bundler reports an
    // unresolved entry and the server must never start.
    serve_react()
        .current_dir(temp.path())
        .args(["public", "-t", "-p", &port.to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error["));

    // The process exited without serving; nothing listens on the port.
    assert!(TcpStream::connect(("127.0.0.1", port)).is_err());
}
