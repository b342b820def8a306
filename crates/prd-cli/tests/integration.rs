#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn prd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("prd").unwrap();
    cmd.current_dir(dir.path()).env("PRD_ROOT", dir.path());
    cmd
}

fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

const TRIAGE: &str = "\
# Support Triage Agent

## Description
An **assistant** that triages support tickets.

## Problem Statement
Tickets wait hours for a first response.

## Target Users
- Support engineers
- Team leads

## Requirements
- Classify incoming tickets
- Suggest a reply draft

## Timeline
Start Date: 2024-02-01
Target Completion: 04/30/2024
- Milestone: Kickoff

## Success Metrics
- First response under 5 minutes
";

const PAYMENTS: &str = "\
# Payments Platform

## Description
A backend API for card payments.

## Problem Statement
Merchants need one integration.

## Requirements
- Expose a REST API
- Store ledger entries in a database
";

// ---------------------------------------------------------------------------
// prd parse
// ---------------------------------------------------------------------------

#[test]
fn parse_prints_summary() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "triage.md", TRIAGE.as_bytes());

    prd(&dir)
        .arg("parse")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Support Triage Agent"))
        .stdout(predicate::str::contains("Classify incoming tickets"))
        .stdout(predicate::str::contains("2024-04-30"));
}

#[test]
fn parse_json_has_record_and_validation() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "triage.md", TRIAGE.as_bytes());

    let output = prd(&dir)
        .args(["--json", "parse"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["prd"]["title"], "Support Triage Agent");
    assert_eq!(json["prd"]["prd_type"], "agent");
    assert_eq!(json["prd"]["original_filename"], "triage.md");
    assert_eq!(json["prd"]["requirements"].as_array().unwrap().len(), 2);
    assert_eq!(json["prd"]["timeline"]["start_date"], "2024-02-01");
    assert_eq!(json["validation"]["is_valid"], true);
}

#[test]
fn parse_rejects_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "triage.pdf", TRIAGE.as_bytes());

    prd(&dir)
        .arg("parse")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported file type"));
}

#[test]
fn parse_rejects_non_utf8() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "broken.md", &[0x23, 0x20, 0xff, 0xfe, 0x0a]);

    prd(&dir)
        .arg("parse")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("UTF-8"));
}

#[test]
fn parse_respects_configured_size_limit() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".prd")).unwrap();
    std::fs::write(
        dir.path().join(".prd/config.yaml"),
        "intake:\n  max_content_bytes: 16\n",
    )
    .unwrap();
    let file = write_file(&dir, "triage.md", TRIAGE.as_bytes());

    prd(&dir)
        .arg("parse")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit is 16"));
}

#[test]
fn parse_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    prd(&dir)
        .args(["parse", "nope.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

// ---------------------------------------------------------------------------
// prd validate
// ---------------------------------------------------------------------------

#[test]
fn validate_complete_document_succeeds() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "triage.md", TRIAGE.as_bytes());

    prd(&dir)
        .arg("validate")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn validate_empty_document_fails() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "empty.md", b"");

    prd(&dir)
        .arg("validate")
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Missing required field: description",
        ))
        .stderr(predicate::str::contains("PRD validation found errors"));
}

#[test]
fn validate_json_reports_errors() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "notes.txt", b"just a line of notes\n");

    let output = prd(&dir)
        .args(["validate", "--json"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(!output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["is_valid"], false);
    let errors = json["errors"].as_array().unwrap();
    assert!(errors
        .iter()
        .any(|e| e == "Missing required field: problem_statement"));
}

// ---------------------------------------------------------------------------
// prd classify
// ---------------------------------------------------------------------------

#[test]
fn classify_agent_document() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "triage.md", TRIAGE.as_bytes());

    prd(&dir)
        .arg("classify")
        .arg(&file)
        .assert()
        .success()
        .stdout("agent\n");
}

#[test]
fn classify_platform_document_json() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "payments.md", PAYMENTS.as_bytes());

    let output = prd(&dir)
        .args(["classify", "--json"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["prd_type"], "platform");
    assert_eq!(json["title"], "Payments Platform");
    assert_eq!(json["fallback"], false);
    let platform = json["scores"]["platform"].as_u64().unwrap();
    let agent = json["scores"]["agent"].as_u64().unwrap();
    assert!(platform > agent);
}

#[test]
fn classify_fallback_json_omits_scores() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "garbled.md", b"platform api backend\0docker\n");

    let output = prd(&dir)
        .args(["classify", "--json"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["prd_type"], "agent");
    assert_eq!(json["fallback"], true);
    assert_eq!(json["title"], "Uploaded PRD");
    assert!(json.get("scores").is_none());
}

// ---------------------------------------------------------------------------
// prd render
// ---------------------------------------------------------------------------

#[test]
fn render_emits_normalized_markdown() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "payments.md", PAYMENTS.as_bytes());

    prd(&dir)
        .arg("render")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "## Title\n\nPayments Platform\n",
        ))
        .stdout(predicate::str::contains("_Type: platform_"))
        .stdout(predicate::str::contains("## Requirements\n\n- Expose a REST API\n"));
}

// ---------------------------------------------------------------------------
// prd config
// ---------------------------------------------------------------------------

#[test]
fn config_init_writes_defaults() {
    let dir = TempDir::new().unwrap();

    prd(&dir).args(["config", "init"]).assert().success();
    assert!(dir.path().join(".prd/config.yaml").exists());

    prd(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn config_show_json_uses_defaults() {
    let dir = TempDir::new().unwrap();

    let output = prd(&dir)
        .args(["--json", "config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["intake"]["max_content_bytes"], 1024 * 1024);
    assert_eq!(json["validation"]["max_title_len"], 200);
}

#[test]
fn config_validate_clean_after_init() {
    let dir = TempDir::new().unwrap();
    prd(&dir).args(["config", "init"]).assert().success();

    prd(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn config_validate_rejects_bad_threshold() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".prd")).unwrap();
    std::fs::write(
        dir.path().join(".prd/config.yaml"),
        "validation:\n  low_completeness_threshold: 150\n",
    )
    .unwrap();

    prd(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("low_completeness_threshold"))
        .stderr(predicate::str::contains("config validation found errors"));
}
