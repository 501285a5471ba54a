//! Configuration file and override flag tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const TABLE: &str = "| A | B |\n|---|---|\n| 1 | 2 |";

#[test]
fn test_no_gfm_flag_keeps_table_literal() {
    cargo_bin_cmd!("md2backlog")
        .arg("--no-gfm")
        .write_stdin(TABLE)
        .assert()
        .success()
        .stdout(TABLE);
}

#[test]
fn test_gfm_enabled_by_default() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("md2backlog")
        .current_dir(temp_dir.path())
        .write_stdin(TABLE)
        .assert()
        .success()
        .stdout("|*A|*B|\n|1|2|");
}

#[test]
fn test_explicit_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("custom.toml");
    fs::write(&config, "[convert]\ngfm = false\n").unwrap();

    cargo_bin_cmd!("md2backlog")
        .arg("-c")
        .arg(&config)
        .write_stdin("~~gone~~")
        .assert()
        .success()
        .stdout("~~gone~~");
}

#[test]
fn test_discovered_config_in_parent() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("md2backlog.toml"),
        "[output]\ntrailing_newline = true\n",
    )
    .unwrap();
    let nested = temp_dir.path().join("docs");
    fs::create_dir(&nested).unwrap();

    cargo_bin_cmd!("md2backlog")
        .current_dir(&nested)
        .write_stdin("# Title")
        .assert()
        .success()
        .stdout("* Title\n");
}

#[test]
fn test_trailing_newline_flag() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("md2backlog")
        .current_dir(temp_dir.path())
        .arg("--trailing-newline")
        .write_stdin("plain")
        .assert()
        .success()
        .stdout("plain\n");
}

#[test]
fn test_trailing_newline_skipped_for_empty_output() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("md2backlog")
        .current_dir(temp_dir.path())
        .arg("--trailing-newline")
        .write_stdin("")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_flag_overrides_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("md2backlog.toml");
    fs::write(&config, "[convert]\ngfm = true\n").unwrap();

    cargo_bin_cmd!("md2backlog")
        .current_dir(temp_dir.path())
        .arg("--no-gfm")
        .write_stdin("~~kept~~")
        .assert()
        .success()
        .stdout("~~kept~~");
}

#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("md2backlog")
        .arg("--config")
        .arg(temp_dir.path().join("missing.toml"))
        .write_stdin("text")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_invalid_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("bad.toml");
    fs::write(&config, "[convert]\ngfm = \"maybe\"\n").unwrap();

    cargo_bin_cmd!("md2backlog")
        .arg("-c")
        .arg(&config)
        .write_stdin("text")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("TOML parse error"));
}
