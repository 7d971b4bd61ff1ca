//! Integration tests for the binary's argument handling and config errors.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".kmz-bootstrap.yml"), config).unwrap();
    temp
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("kmz-bootstrap"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("3D Tiles to KMZ"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("kmz-bootstrap"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_rejects_unknown_flag() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("kmz-bootstrap"));
    cmd.arg("--skip-blender");
    cmd.assert().failure().code(2);
    Ok(())
}

#[test]
fn cli_malformed_config_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("blender: [unclosed");
    let mut cmd = Command::new(cargo_bin("kmz-bootstrap"));
    cmd.current_dir(temp.path());
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn cli_unknown_config_key_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("blender:\n  version: 4.2\n");
    let mut cmd = Command::new(cargo_bin("kmz-bootstrap"));
    cmd.current_dir(temp.path());
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("unknown field"));
    Ok(())
}
