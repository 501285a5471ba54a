//! Cross-cutting CLI tests (help, version, error handling)

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_help() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("md2backlog")
        .current_dir(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backlog notation"))
        .stdout(predicate::str::contains("--input"))
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn test_version() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("md2backlog")
        .current_dir(temp_dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "md2backlog version {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_missing_input_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.md");

    cargo_bin_cmd!("md2backlog")
        .current_dir(temp_dir.path())
        .arg("-i")
        .arg(&missing)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: Failed to read input file"));
}

#[test]
fn test_unwritable_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("no-such-dir").join("out.txt");

    cargo_bin_cmd!("md2backlog")
        .current_dir(temp_dir.path())
        .arg("-o")
        .arg(&output)
        .write_stdin("# Heading")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Failed to write output file"));
}

#[test]
fn test_invalid_utf8_input() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("md2backlog")
        .current_dir(temp_dir.path())
        .write_stdin(vec![0xff, 0xfe, b'a'])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not valid UTF-8"));
}

#[test]
fn test_unknown_flag() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("md2backlog")
        .current_dir(temp_dir.path())
        .arg("--bogus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}
