//! End-to-end tests against the compiled `oat` binary.

use std::io::Write;
use std::process::{Command, Output};

const BRANCH_TRUE_DIGEST: &str = "6b86b273ff34fce19d6b804eff5a3f5747ada4eaa22f1d49c01e52ddb7875b4b";
const EMPTY_DIGEST: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

fn oat(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_oat"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run oat")
}

fn trace_file(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn verify_match_exits_zero() {
    let file = trace_file(&[0x01, 0x31]);
    let path = file.path().to_str().unwrap();
    let output = oat(&["verify", "--trace", path, "--claimed", BRANCH_TRUE_DIGEST]);

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("[1] Branch: TRUE"));
    assert!(out.contains(&format!("Calculated Hash: {BRANCH_TRUE_DIGEST}")));
    assert!(out.contains("SUCCESS"));
}

#[test]
fn verify_mismatch_exits_one() {
    let file = trace_file(&[0x01, 0x31]);
    let path = file.path().to_str().unwrap();
    let output = oat(&["verify", "-t", path, "-c", EMPTY_DIGEST, "--quiet"]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(!out.contains("Branch:"));
    assert!(out.contains("FAILURE"));
}

#[test]
fn verify_uppercase_claim_mismatches() {
    let file = trace_file(&[0x01, 0x31]);
    let path = file.path().to_str().unwrap();
    let claimed = BRANCH_TRUE_DIGEST.to_uppercase();
    let output = oat(&["verify", "-t", path, "-c", &claimed]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn verify_json_output() {
    let file = trace_file(&[0x03, 5, 0, 0, 0]);
    let path = file.path().to_str().unwrap();
    let output = oat(&["verify", "-t", path, "-c", "bogus", "--json"]);

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["claimed"], "bogus");
    assert_eq!(value["matched"], false);
    assert_eq!(value["events"], 1);
}

#[test]
fn verify_malformed_exits_two() {
    let file = trace_file(&[0x01, 0x31, 0x04]);
    let path = file.path().to_str().unwrap();
    let output = oat(&["verify", "-t", path, "-c", EMPTY_DIGEST, "--quiet"]);

    assert_eq!(output.status.code(), Some(2));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("unrecognized tag 0x04"));
    assert!(!stdout(&output).contains("Calculated Hash"));
}

#[test]
fn verify_missing_file_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.log");
    let output = oat(&["verify", "-t", path.to_str().unwrap(), "-c", EMPTY_DIGEST]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn verify_size_limit() {
    let file = trace_file(&[0x03, 5, 0, 0, 0]);
    let path = file.path().to_str().unwrap();
    let output = oat(&["verify", "-t", path, "-c", EMPTY_DIGEST, "--max-bytes", "4"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn inspect_lists_events() {
    let file = trace_file(&[0x01, 0x30, 0x02, 1, 0, 0, 0, 0, 0, 0, 0, 0x03, 5, 0, 0, 0]);
    let output = oat(&["inspect", "--trace", file.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("[1] Branch: FALSE"));
    assert!(out.contains("[3] Indirect Jump -> 0x1"));
    assert!(out.contains("[12] Function Return ID: 5"));
    assert!(out.contains("3 events, 16 bytes"));
}

#[test]
fn digest_of_empty_trace() {
    let file = trace_file(&[]);
    let output = oat(&["digest", "--trace", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).trim(), EMPTY_DIGEST);
}

#[test]
fn record_then_verify() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mission.log");
    let path_str = path.to_str().unwrap();

    let output = oat(&["record", "--output", path_str, "branch:true", "jump:0x1", "ret:5"]);
    assert_eq!(output.status.code(), Some(0));
    let published = stdout(&output).trim().to_string();
    assert_eq!(published.len(), 64);

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes, vec![0x01, 0x31, 0x02, 1, 0, 0, 0, 0, 0, 0, 0, 0x03, 5, 0, 0, 0]);

    let output = oat(&["verify", "-t", path_str, "-c", &published, "--quiet"]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn record_rejects_bad_event() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.log");
    let output = oat(&["record", "-o", path.to_str().unwrap(), "call:1"]);
    assert!(!output.status.success());
    assert!(!path.exists());
}
