//! Integration tests for unearth-cli.
//!
//! Fixture archives are built in-memory with the core test utilities, so no
//! binary fixtures are checked in.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;
use unearth_core::test_utils::create_encrypted_test_zip;
use unearth_core::test_utils::create_test_zip;

fn unearth_cmd() -> Command {
    cargo_bin_cmd!("unearth")
}

fn write_zip(dir: &TempDir, archive: &str, file: &str, content: &[u8]) {
    fs::write(
        dir.path().join(archive),
        create_test_zip(vec![(file, content)]),
    )
    .expect("failed to write fixture archive");
}

#[test]
fn test_version_flag() {
    unearth_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("unearth"));
}

#[test]
fn test_help_flag() {
    unearth_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("batch archive extractor"));
}

#[test]
fn test_extract_help() {
    unearth_cmd()
        .arg("extract")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Discover and extract"));
}

#[test]
fn test_scan_lists_only_archives() {
    let temp = TempDir::new().expect("failed to create temp dir");
    write_zip(&temp, "a.zip", "hello.txt", b"hi");
    fs::write(temp.path().join("notes.txt"), b"not an archive").unwrap();

    unearth_cmd()
        .arg("scan")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a.zip"))
        .stdout(predicate::str::contains("notes.txt").not())
        .stdout(predicate::str::contains("Found 1 archives"));
}

#[test]
fn test_scan_missing_root_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");

    unearth_cmd()
        .arg("scan")
        .arg(temp.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Scan root not found"));
}

/// Tests that extraction runs successfully.
/// This test verifies CLI wiring and basic extraction.
#[test]
fn test_extract_creates_files() {
    let temp = TempDir::new().expect("failed to create temp dir");
    write_zip(&temp, "a.zip", "hello.txt", b"hello");

    unearth_cmd()
        .arg("extract")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Extraction complete"));

    assert!(temp.path().join("a").join("hello.txt").exists());
}

/// Tests JSON output format - verifies structure, not extraction counts.
#[test]
fn test_extract_json_output_format() {
    let temp = TempDir::new().expect("failed to create temp dir");
    write_zip(&temp, "a.zip", "hello.txt", b"hello");

    let output = unearth_cmd()
        .arg("extract")
        .arg("--json")
        .arg(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["status"], "success");
    assert_eq!(json["operation"], "extract");
    assert_eq!(json["data"]["summary"]["succeeded"], 1);
    assert_eq!(json["data"]["archives"][0]["status"], "extracted");
}

/// Encrypted archives are skipped without prompting under the skip policy.
#[test]
fn test_extract_skip_policy_skips_encrypted() {
    let temp = TempDir::new().expect("failed to create temp dir");
    fs::write(
        temp.path().join("locked.zip"),
        create_encrypted_test_zip(vec![("secret.txt", b"hush")], "pw"),
    )
    .unwrap();

    let output = unearth_cmd()
        .arg("extract")
        .arg("--json")
        .arg("--passwords")
        .arg("skip")
        .arg(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["data"]["summary"]["skipped"], 1);
    assert_eq!(json["data"]["archives"][0]["status"], "skipped");
}

/// Two archives with the same inner file name consolidate without overwrite.
#[test]
fn test_extract_merge_renames_collisions() {
    let temp = TempDir::new().expect("failed to create temp dir");
    write_zip(&temp, "a.zip", "readme.txt", b"from a");
    write_zip(&temp, "b.zip", "readme.txt", b"from b");
    let merged = temp.path().join("merged");

    unearth_cmd()
        .arg("extract")
        .arg(temp.path())
        .arg("--merge-into")
        .arg(&merged)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(merged.join("readme.txt")).unwrap(), "from a");
    assert_eq!(
        fs::read_to_string(merged.join("readme_b.txt")).unwrap(),
        "from b"
    );
}

#[test]
fn test_extract_selective_merge() {
    let temp = TempDir::new().expect("failed to create temp dir");
    write_zip(&temp, "a.zip", "a.txt", b"a");
    write_zip(&temp, "b.zip", "b.txt", b"b");
    let merged = temp.path().join("merged");

    unearth_cmd()
        .arg("extract")
        .arg(temp.path())
        .arg("--merge-into")
        .arg(&merged)
        .arg("--only")
        .arg("a.zip")
        .assert()
        .success();

    assert!(merged.join("a.txt").exists());
    assert!(!merged.join("b.txt").exists());
}

#[test]
fn test_extract_quiet_suppresses_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    write_zip(&temp, "a.zip", "hello.txt", b"hello");

    unearth_cmd()
        .arg("extract")
        .arg("--quiet")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_extract_missing_root_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");

    unearth_cmd()
        .arg("extract")
        .arg(temp.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Scan root not found"));
}
