//! Conversion tests over stdin, stdout and files

use assert_cmd::cargo::cargo_bin_cmd;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_stdin_to_stdout() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("md2backlog")
        .current_dir(temp_dir.path())
        .write_stdin("# Heading\n\n**Bold** text.")
        .assert()
        .success()
        .stdout("* Heading\n''Bold'' text.");
}

#[test]
fn test_empty_stdin() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("md2backlog")
        .current_dir(temp_dir.path())
        .write_stdin("")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_input_file_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.md");
    fs::write(&input, "# Heading\n\n- List item\n- Another item\n\n`inline code`").unwrap();

    cargo_bin_cmd!("md2backlog")
        .current_dir(temp_dir.path())
        .arg("-i")
        .arg(&input)
        .assert()
        .success()
        .stdout("* Heading\n- List item\n- Another item\n{code}inline code{/code}");
}

#[test]
fn test_stdin_to_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("output.txt");

    cargo_bin_cmd!("md2backlog")
        .current_dir(temp_dir.path())
        .arg("--output")
        .arg(&output)
        .write_stdin("`inline` and\n```\nblock code\n```")
        .assert()
        .success()
        .stdout("");

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content, "{code}inline{/code} and\n\n>{code}\nblock code\n{/code}<");
}

#[test]
fn test_input_file_to_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.md");
    let output = temp_dir.path().join("output.txt");
    fs::write(&input, "# Test Output\n\n*italic* text.").unwrap();

    cargo_bin_cmd!("md2backlog")
        .current_dir(temp_dir.path())
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content, "* Test Output\n'''italic''' text.");
}

#[test]
fn test_list_item_with_link() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("md2backlog")
        .current_dir(temp_dir.path())
        .write_stdin("- Item 1\n- [Link](url)")
        .assert()
        .success()
        .stdout("- Item 1\n- \n[[Link:url]]");
}

#[test]
fn test_verbose_reports_written_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("output.txt");

    cargo_bin_cmd!("md2backlog")
        .current_dir(temp_dir.path())
        .arg("-v")
        .arg("-o")
        .arg(&output)
        .write_stdin("text")
        .assert()
        .success()
        .stderr(predicates::str::contains("Wrote"));
}
