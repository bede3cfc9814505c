//! Integration tests for CLI commands.

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const PROOF: &str = "0000000000000000000000000000000000000000000000000000000000000000";

fn run_cli(journal: &Path, args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_ecocert"))
        .arg("--journal")
        .arg(journal)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute CLI");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    (output.status.success(), stdout, stderr)
}

fn journal() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("registry.ecj");
    (temp_dir, path)
}

fn issue_args<'a>(business: &'a str, caller: &'a str, score: &'a str, proof: &'a str) -> Vec<&'a str> {
    vec![
        "issue",
        business,
        "--caller",
        caller,
        "--height",
        "0",
        "--issue-date",
        "0",
        "--expiry-date",
        "100",
        "--score",
        score,
        "--renewal-period",
        "365",
        "--cert-type",
        "eco",
        "--compliance-level",
        "4",
        "--grace-period",
        "30",
        "--location",
        "Costa Rica",
        "--category",
        "Tourism",
        "--review-rate",
        "5",
        "--proof-hash",
        proof,
        "--carbon",
        "100",
        "--waste",
        "50",
        "--energy",
        "200",
    ]
}

fn with_authority(journal: &Path) {
    let (ok, _, stderr) = run_cli(journal, &["set-authority", "A1", "--caller", "A1"]);
    assert!(ok, "set-authority failed: {}", stderr);
}

#[test]
fn test_lifecycle_scenario() {
    let (_dir, journal) = journal();
    with_authority(&journal);

    let (ok, stdout, stderr) = run_cli(&journal, &issue_args("X", "B1", "80", PROOF));
    assert!(ok, "issue failed: {}", stderr);
    assert!(stdout.contains("issued cert 0 for X"));
    assert!(stdout.contains("settlement 500 B1 -> A1"));

    let (_, stdout, _) = run_cli(&journal, &["validity", "X", "--height", "50"]);
    assert_eq!(stdout.trim(), "true");
    let (_, stdout, _) = run_cli(&journal, &["validity", "X", "--height", "150"]);
    assert_eq!(stdout.trim(), "false");

    let (ok, _, stderr) = run_cli(
        &journal,
        &["update", "X", "--score", "90", "--expiry", "200", "--caller", "B1", "--height", "50"],
    );
    assert!(ok, "update failed: {}", stderr);
    let (_, stdout, _) = run_cli(&journal, &["validity", "X", "--height", "150"]);
    assert_eq!(stdout.trim(), "true");

    let (_, stdout, _) = run_cli(&journal, &["count"]);
    assert_eq!(stdout.trim(), "1");
}

#[test]
fn test_rejection_reports_code_and_leaves_journal() {
    let (_dir, journal) = journal();
    with_authority(&journal);
    let before = std::fs::metadata(&journal).unwrap().len();

    let (ok, _, stderr) = run_cli(&journal, &issue_args("X", "B1", "200", PROOF));
    assert!(!ok);
    assert!(stderr.contains("error[110] invalid_score"), "stderr: {}", stderr);

    let short = &PROOF[..62];
    let (ok, _, stderr) = run_cli(&journal, &issue_args("X", "B1", "80", short));
    assert!(!ok);
    assert!(stderr.contains("error[121] invalid_proof_hash"), "stderr: {}", stderr);

    assert_eq!(std::fs::metadata(&journal).unwrap().len(), before);
}

#[test]
fn test_second_set_authority_fails() {
    let (_dir, journal) = journal();
    with_authority(&journal);
    let (ok, _, stderr) = run_cli(&journal, &["set-authority", "A2", "--caller", "A2"]);
    assert!(!ok);
    assert!(stderr.contains("error[125] already_set"), "stderr: {}", stderr);
}

#[test]
fn test_revoke_and_get_json() {
    let (_dir, journal) = journal();
    with_authority(&journal);
    run_cli(&journal, &issue_args("X", "B1", "80", PROOF));

    let (ok, _, stderr) = run_cli(&journal, &["revoke", "X", "--reason", "Fraud", "--caller", "B2"]);
    assert!(!ok);
    assert!(stderr.contains("error[100] not_authorized"));

    let (ok, _, _) = run_cli(&journal, &["revoke", "X", "--reason", "Fraud", "--caller", "B1"]);
    assert!(ok);

    let (ok, stdout, _) = run_cli(&journal, &["get", "X", "--json"]);
    assert!(ok);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["certification"]["status"], false);
    assert_eq!(parsed["certification"]["cert_id"], 0);
    assert_eq!(parsed["last_update"], serde_json::Value::Null);

    let (_, stdout, _) = run_cli(&journal, &["is-certified", "X"]);
    assert_eq!(stdout.trim(), "true");
}

#[test]
fn test_get_missing_business() {
    let (_dir, journal) = journal();
    let (ok, _, stderr) = run_cli(&journal, &["get", "nobody"]);
    assert!(!ok);
    assert!(stderr.contains("no certification"));

    let (_, stdout, _) = run_cli(&journal, &["is-certified", "nobody"]);
    assert_eq!(stdout.trim(), "false");
}

#[test]
fn test_history_and_verify() {
    let (_dir, journal) = journal();
    with_authority(&journal);
    run_cli(&journal, &issue_args("X", "B1", "80", PROOF));

    let (ok, stdout, _) = run_cli(&journal, &["history", "--json"]);
    assert!(ok);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .filter(|l| !l.is_empty())
        .map(|l| serde_json::from_str(l).expect("invalid JSON"))
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["operation"]["op"], "set_authority");
    assert_eq!(lines[1]["operation"]["op"], "issue");
    assert_eq!(lines[1]["prev_entry_id"], lines[0]["entry_id"]);

    let (ok, stdout, _) = run_cli(&journal, &["verify", "--json"]);
    assert!(ok);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["entries"], 2);
    assert_eq!(report["certifications"], 1);
    assert_eq!(report["settlements"], 1);
}

#[test]
fn test_config_controls_capacity_and_fee() {
    let (dir, journal) = journal();
    let config = dir.path().join("config.json");
    std::fs::write(&config, r#"{"max_certs": 1, "issuance_fee": 7}"#).unwrap();
    let config = config.to_str().unwrap();

    let mut args = vec!["--config", config];
    args.extend(["set-authority", "A1", "--caller", "A1"]);
    assert!(run_cli(&journal, &args).0);

    let mut args = vec!["--config", config];
    args.extend(issue_args("X", "B1", "80", PROOF));
    let (ok, stdout, _) = run_cli(&journal, &args);
    assert!(ok);
    assert!(stdout.contains("settlement 7 B1 -> A1"));

    let mut args = vec!["--config", config];
    args.extend(issue_args("Y", "B1", "80", PROOF));
    let (ok, _, stderr) = run_cli(&journal, &args);
    assert!(!ok);
    assert!(stderr.contains("error[114] max_certs_exceeded"));
}

#[test]
fn test_non_hex_proof_is_argument_error() {
    let (_dir, journal) = journal();
    with_authority(&journal);
    let (ok, _, stderr) = run_cli(&journal, &issue_args("X", "B1", "80", "zz"));
    assert!(!ok);
    assert!(stderr.contains("Error: invalid argument"));
}
