//! Integration tests for shipzip-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::fs::File;
use std::path::Path;
use tempfile::TempDir;

fn shipzip_cmd() -> Command {
    cargo_bin_cmd!("shipzip")
}

/// Workspace with the sources under `ext/` so archives land beside them.
fn create_workspace() -> TempDir {
    let temp = TempDir::new().expect("failed to create temp dir");
    let ext = temp.path().join("ext");
    fs::create_dir_all(ext.join("popup")).unwrap();
    fs::create_dir_all(ext.join(".git")).unwrap();
    fs::write(ext.join("manifest.json"), r#"{"name": "demo", "version": "1.2.3"}"#).unwrap();
    fs::write(ext.join("popup/popup.html"), "<html></html>").unwrap();
    fs::write(ext.join("README.md"), "# demo").unwrap();
    fs::write(ext.join(".git/HEAD"), "ref: refs/heads/main").unwrap();
    temp
}

fn archive_names(path: &Path) -> Vec<String> {
    let archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

#[test]
fn test_version_flag() {
    shipzip_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("shipzip"));
}

#[test]
fn test_help_flag() {
    shipzip_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ROOT_DIRECTORY"))
        .stdout(predicate::str::contains("--no-check-git"));
}

#[test]
fn test_root_directory_required() {
    shipzip_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("ROOT_DIRECTORY"));
}

#[test]
fn test_package_with_default_template() {
    let temp = create_workspace();

    shipzip_cmd()
        .current_dir(temp.path())
        .args(["--no-check-git", "ext"])
        .assert()
        .success()
        .stdout(predicate::str::contains("writing to package-1.2.3.zip"))
        .stdout(predicate::str::contains("adding manifest.json to the archive"))
        .stdout(predicate::str::contains("adding popup/popup.html to the archive"))
        .stdout(predicate::str::contains("README.md").not());

    let archive = temp.path().join("package-1.2.3.zip");
    assert!(archive.exists());
    assert_eq!(archive_names(&archive), ["manifest.json", "popup/popup.html"]);
}

#[test]
fn test_package_with_custom_template() {
    let temp = create_workspace();

    shipzip_cmd()
        .current_dir(temp.path())
        .args(["--no-check-git", "-o", "demo-v{version}.zip", "ext"])
        .assert()
        .success();

    assert!(temp.path().join("demo-v1.2.3.zip").exists());
    assert!(!temp.path().join("package-1.2.3.zip").exists());
}

#[test]
fn test_legacy_flag_alias() {
    let temp = create_workspace();

    shipzip_cmd()
        .current_dir(temp.path())
        .args(["--no-check-version", "ext"])
        .assert()
        .success();

    assert!(temp.path().join("package-1.2.3.zip").exists());
}

#[test]
fn test_compressed_package() {
    let temp = create_workspace();

    shipzip_cmd()
        .current_dir(temp.path())
        .args(["--no-check-git", "-l", "9", "ext"])
        .assert()
        .success();

    let mut archive =
        zip::ZipArchive::new(File::open(temp.path().join("package-1.2.3.zip")).unwrap()).unwrap();
    let entry = archive.by_name("popup/popup.html").unwrap();
    assert_eq!(entry.compression(), zip::CompressionMethod::Deflated);
}

#[test]
fn test_compression_level_out_of_range() {
    let temp = create_workspace();

    shipzip_cmd()
        .current_dir(temp.path())
        .args(["--no-check-git", "-l", "12", "ext"])
        .assert()
        .failure();

    assert!(!temp.path().join("package-1.2.3.zip").exists());
}

#[test]
fn test_quiet_suppresses_progress() {
    let temp = create_workspace();

    shipzip_cmd()
        .current_dir(temp.path())
        .args(["-q", "--no-check-git", "ext"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(temp.path().join("package-1.2.3.zip").exists());
}

#[test]
fn test_missing_manifest_fails() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("ext")).unwrap();
    fs::write(temp.path().join("ext/index.js"), "x").unwrap();

    shipzip_cmd()
        .current_dir(temp.path())
        .args(["--no-check-git", "ext"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("manifest.json"))
        .stderr(predicate::str::contains("HINT"));
}

#[test]
fn test_malformed_manifest_fails() {
    let temp = create_workspace();
    fs::write(temp.path().join("ext/manifest.json"), r#"{"name": "demo"}"#).unwrap();

    shipzip_cmd()
        .current_dir(temp.path())
        .args(["--no-check-git", "ext"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("version"));

    assert!(!temp.path().join("package-.zip").exists());
}

#[test]
fn test_invalid_template_fails() {
    let temp = create_workspace();

    shipzip_cmd()
        .current_dir(temp.path())
        .args(["--no-check-git", "-o", "{name}.zip", "ext"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid output template"));
}

#[test]
fn test_json_output() {
    let temp = create_workspace();

    let output = shipzip_cmd()
        .current_dir(temp.path())
        .args(["--json", "--no-check-git", "ext"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["operation"], "package");
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["version"], "1.2.3");
    assert_eq!(value["data"]["name"], "demo");
    assert_eq!(value["data"]["output_path"], "package-1.2.3.zip");
    assert_eq!(value["data"]["files_added"], 2);
}

#[test]
fn test_json_error_output() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("ext")).unwrap();

    let output = shipzip_cmd()
        .current_dir(temp.path())
        .args(["--json", "--no-check-git", "ext"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let value: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(value["status"], "error");
    assert!(value["error"].as_str().unwrap().contains("manifest.json"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp = create_workspace();

    shipzip_cmd()
        .current_dir(temp.path())
        .args(["--dry-run", "--no-check-git", "ext"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would write package-1.2.3.zip"))
        .stdout(predicate::str::contains("popup/popup.html"))
        .stdout(predicate::str::contains("Total: 2 files"));

    assert!(!temp.path().join("package-1.2.3.zip").exists());
}

#[test]
fn test_repository_check_without_upstream_fails() {
    let git_available = std::process::Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success());
    if !git_available {
        eprintln!("git not available, skipping");
        return;
    }

    let temp = create_workspace();
    let ext = temp.path().join("ext");
    fs::remove_dir_all(ext.join(".git")).unwrap();
    let init = std::process::Command::new("git")
        .args(["init", "-q"])
        .current_dir(&ext)
        .output()
        .unwrap();
    assert!(init.status.success());

    shipzip_cmd()
        .current_dir(temp.path())
        .arg("ext")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--no-check-git"));

    assert!(!temp.path().join("package-1.2.3.zip").exists());
}
