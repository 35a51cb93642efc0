//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn project() -> TempDir {
    let tmp = TempDir::new().expect("temp project dir");
    let root = tmp.path();
    fs::write(root.join("a.py"), "x").expect("write a.py");
    fs::write(root.join("b.txt"), "y").expect("write b.txt");
    fs::create_dir(root.join("venv")).expect("mkdir venv");
    fs::write(root.join("venv/c.py"), "z").expect("write c.py");
    tmp
}

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("project-formatter"))
}

#[test]
fn test_cli_version() {
    cmd().arg("--version").assert().success().stdout(predicate::str::contains("project-formatter"));
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Format a project directory"))
        .stdout(predicate::str::contains("format"))
        .stdout(predicate::str::contains("patterns"));
}

#[test]
fn test_format_rejects_invalid_directory() {
    cmd()
        .args(["format", "/definitely/not/here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a valid directory."));
}

#[test]
fn test_format_to_stdout_with_summary() {
    let repo = project();
    let output = cmd()
        .args(["format", repo.path().to_str().expect("utf8 path"), "-i", ".py"])
        .output()
        .expect("run");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    similar_asserts::assert_eq!(
        stdout,
        "=== File: a.py ===\nx\n\n\nSummary Report:\nTotal files processed: 1\n\
         Total files excluded: 1\nTotal files in project: 2\n"
    );
}

#[test]
fn test_format_respects_gitignore_and_exclude_flag() {
    let repo = project();
    fs::write(repo.path().join(".gitignore"), "# logs\n*.log\n").expect("write .gitignore");
    fs::create_dir_all(repo.path().join("deep/er")).expect("mkdir");
    fs::write(repo.path().join("deep/er/run.log"), "noise").expect("write log");
    fs::write(repo.path().join("deep/er/keep.md"), "# keep").expect("write md");

    cmd()
        .args(["format", repo.path().to_str().expect("utf8 path"), "-e", "b.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== File: deep/er/keep.md ==="))
        .stdout(predicate::str::contains("run.log").not())
        .stdout(predicate::str::contains("=== File: b.txt ===").not())
        .stdout(predicate::str::contains("=== File: .gitignore ===").not())
        .stdout(predicate::str::contains("Total files excluded: 3"));
}

#[test]
fn test_format_writes_output_file() {
    let repo = project();
    let out = TempDir::new().expect("temp out dir");
    let out_file = out.path().join("formatted.txt");

    cmd()
        .args([
            "format",
            repo.path().to_str().expect("utf8 path"),
            "--include",
            ".py",
            "--output-file",
            out_file.to_str().expect("utf8 path"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("has been written to"))
        .stdout(predicate::str::contains("Total files processed: 1"))
        .stdout(predicate::str::contains("=== File:").not());

    let written = fs::read_to_string(&out_file).expect("read output");
    assert_eq!(written, "=== File: a.py ===\nx\n");
}

#[test]
fn test_format_is_idempotent() {
    let repo = project();
    let run = || {
        cmd()
            .args(["format", repo.path().to_str().expect("utf8 path"), "--tree"])
            .output()
            .expect("run")
            .stdout
    };
    similar_asserts::assert_eq!(String::from_utf8_lossy(&run()), String::from_utf8_lossy(&run()));
}

#[test]
fn test_format_json_report() {
    let repo = project();
    let out = TempDir::new().expect("temp out dir");
    let report = out.path().join("report.json");

    cmd()
        .args([
            "format",
            repo.path().to_str().expect("utf8 path"),
            "--no-summary",
            "--report-json",
            report.to_str().expect("utf8 path"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary Report").not());

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(report).expect("read report")).expect("json");
    assert_eq!(parsed["stats"]["processed"], serde_json::json!(2));
    assert_eq!(parsed["files"], serde_json::json!(["a.py", "b.txt"]));
}

#[test]
fn test_config_file_supplies_defaults() {
    let repo = project();
    fs::write(repo.path().join("project-formatter.toml"), "include_extensions = \".txt\"\n")
        .expect("write config");

    cmd()
        .args(["format", repo.path().to_str().expect("utf8 path")])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== File: b.txt ==="))
        .stdout(predicate::str::contains("=== File: a.py ===").not());
}

#[test]
fn test_patterns_lists_baseline() {
    let repo = project();
    cmd()
        .args(["patterns", repo.path().to_str().expect("utf8 path")])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. .git/"))
        .stdout(predicate::str::contains("7. .gitignore"));
}

#[test]
fn test_patterns_check_explains_match() {
    let repo = project();
    fs::write(repo.path().join(".gitignore"), "build\n").expect("write .gitignore");

    cmd()
        .args([
            "patterns",
            repo.path().to_str().expect("utf8 path"),
            "--check",
            "pkg/build/out.o",
            "--check",
            "venv/",
            "--check",
            "src/main.rs",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "pkg/build/out.o: excluded by pattern 'build' (segment test on 'build')",
        ))
        .stdout(predicate::str::contains("venv: excluded by pattern 'venv/' (directory-suffix test)"))
        .stdout(predicate::str::contains("src/main.rs: not excluded"));
}
