//! End-to-end tests for the benford CLI
//!
//! These run the actual binary against temp-dir fixtures to verify:
//! - Text and directory analysis produce scored reports
//! - JSON output is valid and carries the grade contract
//! - Failed datasets are contained and reflected in the exit code
//! - --fail-on gates the exit code, --output persists the report
//!
//! Each test uses its own isolated temp directory.

use std::path::Path;
use std::process::Command;

fn benford_bin() -> &'static str {
    env!("CARGO_BIN_EXE_benford")
}

/// Run the binary and capture (exit code, stdout, stderr).
fn run_in(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(benford_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run benford");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

/// Write a dataset whose leading digits track the Benford frequencies.
fn write_benford_file(dir: &Path, name: &str) {
    let mut lines = String::new();
    for (digit, n) in [
        (1, 301),
        (2, 176),
        (3, 125),
        (4, 97),
        (5, 79),
        (6, 68),
        (7, 59),
        (8, 52),
        (9, 47),
    ] {
        for i in 0..n {
            lines.push_str(&format!("{digit}{:03}\n", i % 1000));
        }
    }
    std::fs::write(dir.join(name), lines).unwrap();
}

/// Write a dataset with uniform leading digits (wildly non-Benford).
fn write_uniform_file(dir: &Path, name: &str) {
    let mut lines = String::new();
    for digit in 1..=9 {
        for i in 0..112 {
            lines.push_str(&format!("{digit}{:02}\n", i % 100));
        }
    }
    std::fs::write(dir.join(name), lines).unwrap();
}

#[test]
fn analyzes_a_text_dataset() {
    let dir = tempfile::tempdir().unwrap();
    write_benford_file(dir.path(), "votes.txt");

    let (code, stdout, stderr) = run_in(dir.path(), &["analyze", "votes.txt", "--no-color"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("votes.txt"));
    assert!(stdout.contains("Practical fit:"));
    assert!(stdout.contains("Close"), "stdout: {stdout}");
}

#[test]
fn default_command_is_analyze() {
    let dir = tempfile::tempdir().unwrap();
    write_benford_file(dir.path(), "votes.txt");

    let (code, stdout, _) = run_in(dir.path(), &["votes.txt"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Benford Analysis"));
}

#[test]
fn json_output_carries_the_grade_contract() {
    let dir = tempfile::tempdir().unwrap();
    write_benford_file(dir.path(), "votes.txt");

    let (code, stdout, _) = run_in(dir.path(), &["analyze", "votes.txt", "--format", "json"]);
    assert_eq!(code, 0);

    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid JSON");
    assert_eq!(parsed["summary"]["scored"], 1);
    assert_eq!(parsed["summary"]["failed"], 0);
    let metrics = &parsed["datasets"][0]["outcome"]["metrics"];
    assert_eq!(metrics["practical_grade"], "close");
    assert!(metrics["mad"].as_f64().unwrap() < 0.002);
    assert!(metrics["practical_fit"].as_f64().unwrap() >= 85.0);
}

#[test]
fn uniform_dataset_grades_non_conforming() {
    let dir = tempfile::tempdir().unwrap();
    write_uniform_file(dir.path(), "uniform.txt");

    let (code, stdout, _) = run_in(
        dir.path(),
        &["analyze", "uniform.txt", "--format", "json"],
    );
    assert_eq!(code, 0);

    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid JSON");
    let metrics = &parsed["datasets"][0]["outcome"]["metrics"];
    assert_eq!(metrics["practical_grade"], "non-conforming");
    assert!(metrics["mad"].as_f64().unwrap() > 0.015);
}

#[test]
fn empty_dataset_fails_with_exit_code_2() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("zeros.txt"), "0\n0\n0\n").unwrap();

    let (code, stdout, _) = run_in(dir.path(), &["analyze", "zeros.txt", "--no-color"]);
    assert_eq!(code, 2);
    assert!(stdout.contains("FAILED"), "stdout: {stdout}");
    assert!(stdout.contains("no digit observations"));
}

#[test]
fn failed_dataset_does_not_abort_siblings() {
    let dir = tempfile::tempdir().unwrap();
    write_benford_file(dir.path(), "good.txt");
    std::fs::write(dir.path().join("bad.txt"), "0\n").unwrap();

    let (code, stdout, _) = run_in(dir.path(), &["analyze", ".", "--no-color"]);
    assert_eq!(code, 2);
    // The readable sibling and the directory aggregate still report.
    assert!(stdout.contains("good.txt"));
    assert!(stdout.contains("Practical fit:"));
}

#[test]
fn directory_analysis_adds_an_aggregate() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("election");
    std::fs::create_dir(&data).unwrap();
    write_benford_file(&data, "2020-a.txt");
    write_benford_file(&data, "2020-b.txt");

    let (code, stdout, _) = run_in(dir.path(), &["analyze", "election", "--format", "json"]);
    assert_eq!(code, 0);

    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid JSON");
    let datasets = parsed["datasets"].as_array().unwrap();
    assert_eq!(datasets.len(), 3);
    let aggregate = &datasets[2];
    assert_eq!(aggregate["name"], "election (aggregate)");
    assert_eq!(aggregate["kind"], "aggregate");
}

#[test]
fn fail_on_gates_the_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    write_uniform_file(dir.path(), "uniform.txt");

    let (code, _, _) = run_in(
        dir.path(),
        &["analyze", "uniform.txt", "--fail-on", "marginal"],
    );
    assert_eq!(code, 1);

    // A clean dataset passes the same gate.
    write_benford_file(dir.path(), "votes.txt");
    let (code, _, _) = run_in(
        dir.path(),
        &["analyze", "votes.txt", "--fail-on", "marginal"],
    );
    assert_eq!(code, 0);
}

#[test]
fn output_flag_writes_the_report_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    write_benford_file(dir.path(), "votes.txt");

    let (code, _, _) = run_in(
        dir.path(),
        &["analyze", "votes.txt", "-f", "md", "-o", "report.md"],
    );
    assert_eq!(code, 0);

    let written = std::fs::read_to_string(dir.path().join("report.md")).unwrap();
    assert!(written.contains("# Benford Conformity Report"));
    assert!(written.contains("votes.txt"));
}

#[test]
fn init_writes_a_config_template() {
    let dir = tempfile::tempdir().unwrap();

    let (code, stdout, _) = run_in(dir.path(), &["init"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("benford.toml"));

    let config = std::fs::read_to_string(dir.path().join("benford.toml")).unwrap();
    assert!(config.contains("[scoring]"));
    assert!(config.contains("[bands]"));

    // Running init again refuses to clobber the existing file.
    let (code, _, _) = run_in(dir.path(), &["init"]);
    assert_ne!(code, 0);
}

#[test]
fn unsupported_file_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("report.pdf"), "x").unwrap();

    let (code, _, stderr) = run_in(dir.path(), &["analyze", "report.pdf"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unsupported file type"), "stderr: {stderr}");
}

#[test]
fn custom_bands_change_the_verdict() {
    let dir = tempfile::tempdir().unwrap();
    write_benford_file(dir.path(), "votes.txt");
    // Absurdly strict bands push even a near-ideal dataset out of Close.
    std::fs::write(
        dir.path().join("benford.toml"),
        "[bands]\nclose = 0.0000001\nacceptable = 0.0000002\nmarginal = 0.0000003\n",
    )
    .unwrap();

    let (code, stdout, _) = run_in(dir.path(), &["analyze", "votes.txt", "--format", "json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid JSON");
    let metrics = &parsed["datasets"][0]["outcome"]["metrics"];
    assert_eq!(metrics["mad_grade"], "non-conforming");
}
