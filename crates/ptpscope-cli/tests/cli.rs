use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

const OPEN_SESSION_HEX: &str = "0C0000000100021001000000";

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("ptpscope"))
}

#[test]
fn help_supports_analyse_and_analyze() {
    cmd()
        .arg("trace")
        .arg("analyse")
        .arg("--help")
        .assert()
        .success();
    cmd()
        .arg("trace")
        .arg("analyze")
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.bin");
    let report = temp.path().join("report.json");

    cmd()
        .arg("trace")
        .arg("analyze")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn unsupported_extension_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("trace.pcapng");
    std::fs::write(&input, [0u8; 12]).expect("write input");

    cmd()
        .arg("trace")
        .arg("analyse")
        .arg(input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("unsupported input format"));
}

#[test]
fn hex_input_outputs_json_report() {
    let assert = cmd()
        .arg("trace")
        .arg("analyse")
        .arg("--hex")
        .arg(OPEN_SESSION_HEX)
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["summary"]["containers_total"], 1);
    assert_eq!(value["containers"][0]["name"], "PTP::OpenSession");
    assert!(value["input"].get("path").is_none());
}

#[test]
fn invalid_hex_shows_error_and_hint() {
    cmd()
        .arg("trace")
        .arg("analyse")
        .arg("--hex")
        .arg("0C0")
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("invalid hex trace").and(contains("hint:")));
}

#[test]
fn file_input_writes_report() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("capture.bin");
    let report = temp.path().join("report.json");
    std::fs::write(
        &input,
        [
            0x0c, 0x00, 0x00, 0x00, 0x01, 0x00, 0x16, 0x91, 0x01, 0x00, 0x00, 0x00,
        ],
    )
    .expect("write input");

    cmd()
        .arg("trace")
        .arg("analyse")
        .arg(&input)
        .arg("-o")
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let json = std::fs::read_to_string(&report).expect("read report");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["containers"][0]["name"], "Canon::Capture");
    assert_eq!(value["input"]["bytes"], 12);
}

#[test]
fn pretty_and_compact_conflict() {
    cmd()
        .arg("trace")
        .arg("analyse")
        .arg("--hex")
        .arg(OPEN_SESSION_HEX)
        .arg("--stdout")
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("trace")
        .arg("analyse")
        .arg("--hex")
        .arg(OPEN_SESSION_HEX)
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(predicates::str::contains("OK:").not());
}

#[test]
fn gen_code_emits_defines() {
    let assert = cmd()
        .arg("trace")
        .arg("gen-code")
        .arg("--hex")
        .arg(OPEN_SESSION_HEX)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    assert!(stdout.contains("/* Generated PTP operation codes from trace analysis */"));
    assert!(stdout.contains("#define PTP_OP_OPENSESSION\t\t0x1002"));
}
