//! Binary-level tests for the filakit CLI.
//!
//! Only flows that never reach a prompt or an external command are
//! exercised here; everything else is covered by the core crate's tests.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_the_full_flag_surface() {
    Command::cargo_bin("filakit")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--create-user"))
        .stdout(predicate::str::contains("--filament-url"))
        .stdout(predicate::str::contains("--laravel-version"))
        .stdout(predicate::str::contains("--mysql"))
        .stdout(predicate::str::contains("--serve"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("filakit")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_previous_version_with_mysql_exits_one_before_any_prompt() {
    Command::cargo_bin("filakit")
        .unwrap()
        .args(["x", "--laravel-version", "previous", "--mysql"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--mysql cannot be combined"));
}
