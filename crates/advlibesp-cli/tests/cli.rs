use std::fs;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::{Value, json};
use tempfile::TempDir;

const PACKET_4BS: &str = "55000a0701eba55602460905174f008001ffffffff4100a9";
const PACKET_1BS: &str = "55000707017ad5090591ee008001ffffffff47003c";
const DEFAULT_URI: &str = "https://sniffypedia.org/Organization/EnOcean_GmbH/";

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("advlibesp"))
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> Value {
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    serde_json::from_str(&stdout).expect("valid json")
}

fn write_capture(temp: &TempDir, lines: &str) -> std::path::PathBuf {
    let path = temp.path().join("capture.txt");
    fs::write(&path, lines).expect("write capture");
    path
}

#[test]
fn help_supports_decode_and_process() {
    cmd()
        .arg("esp")
        .arg("decode")
        .arg("--help")
        .assert()
        .success();
    cmd()
        .arg("esp")
        .arg("process")
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn long_version_reports_build_revision() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")).and(contains("(commit ")));
    cmd()
        .arg("-V")
        .assert()
        .success()
        .stdout(contains("advlibesp"));
}

#[test]
fn stdout_outputs_json_array() {
    let assert = cmd()
        .arg("esp")
        .arg("decode")
        .arg(PACKET_4BS)
        .arg(PACKET_1BS)
        .arg("--stdout")
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert_eq!(value[0]["telegramType"], json!("4BS"));
    assert_eq!(value[0]["uri"], json!(DEFAULT_URI));
    assert_eq!(value[1]["deviceIds"], json!(["0591ee00/7"]));
}

#[test]
fn missing_packets_shows_error_and_hint() {
    cmd()
        .arg("esp")
        .arg("decode")
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn missing_input_file_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.txt");

    cmd()
        .arg("esp")
        .arg("decode")
        .arg("--input")
        .arg(missing)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("input file not found").and(contains("hint:")));
}

#[test]
fn input_file_writes_report() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_capture(&temp, &format!("# gateway capture\n{PACKET_4BS}\n\n{PACKET_1BS}\n"));
    let report = temp.path().join("out").join("packets.json");

    cmd()
        .arg("esp")
        .arg("decode")
        .arg("--input")
        .arg(&input)
        .arg("-o")
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK:"));

    let json = fs::read_to_string(&report).expect("read report");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value.as_array().map(Vec::len), Some(2));
}

#[test]
fn report_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_capture(&temp, PACKET_4BS);

    cmd()
        .arg("esp")
        .arg("decode")
        .arg("--input")
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("report path must differ from input"));
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("packets.json");

    cmd()
        .arg("esp")
        .arg("decode")
        .arg(PACKET_4BS)
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    cmd()
        .arg("esp")
        .arg("decode")
        .arg(PACKET_4BS)
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
    let report = temp.path().join("packets.json");

    cmd()
        .arg("esp")
        .arg("decode")
        .arg(PACKET_4BS)
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn rejected_packets_are_null_and_listed() {
    let assert = cmd()
        .arg("esp")
        .arg("decode")
        .arg("xyz")
        .arg(PACKET_4BS)
        .arg("--stdout")
        .arg("--list-rejected")
        .assert()
        .success()
        .stderr(contains("Rejected packets:").and(contains("argument 1")));
    let value = stdout_json(&assert);
    assert_eq!(value[0], Value::Null);
    assert_eq!(value[1]["telegramType"], json!("4BS"));
}

#[test]
fn strict_fails_when_packets_rejected() {
    cmd()
        .arg("esp")
        .arg("decode")
        .arg("5500")
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("rejected packets detected"));
}

#[test]
fn ignore_protocol_overhead_flag() {
    let assert = cmd()
        .arg("esp")
        .arg("decode")
        .arg(PACKET_4BS)
        .arg("--stdout")
        .arg("--ignore-protocol-overhead")
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert_eq!(
        value[0],
        json!({
            "deviceIds": ["05174f00/7"],
            "telegramPayload": "56024609",
            "uri": DEFAULT_URI
        })
    );
}

#[test]
fn erp1_payload_only_flag() {
    let assert = cmd()
        .arg("esp")
        .arg("decode")
        .arg("d5090591ee0080")
        .arg("--stdout")
        .arg("--erp1-payload-only")
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert_eq!(value[0]["telegramType"], json!("1BS"));
    assert_eq!(value[0]["isContactDetected"], json!([true]));
}

#[test]
fn index_file_resolves_uri() {
    let temp = TempDir::new().expect("tempdir");
    let index = temp.path().join("index.json");
    fs::write(
        &index,
        r#"{ "05174f00/7": "https://example.com/temperature-sensor" }"#,
    )
    .expect("write index");

    let assert = cmd()
        .arg("esp")
        .arg("decode")
        .arg(PACKET_4BS)
        .arg(PACKET_1BS)
        .arg("--index")
        .arg(&index)
        .arg("--stdout")
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert_eq!(
        value[0]["uri"],
        json!("https://example.com/temperature-sensor")
    );
    assert_eq!(value[1]["uri"], json!(DEFAULT_URI));
}

#[test]
fn invalid_profiles_file_shows_hint() {
    let temp = TempDir::new().expect("tempdir");
    let profiles = temp.path().join("profiles.json");
    fs::write(&profiles, "[1, 2, 3]").expect("write profiles");

    cmd()
        .arg("esp")
        .arg("decode")
        .arg(PACKET_4BS)
        .arg("--profiles")
        .arg(&profiles)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("invalid profiles file").and(contains("hint:")));
}

#[test]
fn valid_profiles_file_is_accepted() {
    let temp = TempDir::new().expect("tempdir");
    let profiles = temp.path().join("profiles.json");
    fs::write(&profiles, r#"{ "05174f00/7": { "eepType": "A5-02-05" } }"#)
        .expect("write profiles");

    let assert = cmd()
        .arg("esp")
        .arg("decode")
        .arg(PACKET_4BS)
        .arg("--profiles")
        .arg(&profiles)
        .arg("--stdout")
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert_eq!(value[0]["telegramPayload"], json!("56024609"));
}

#[test]
fn glob_matching_multiple_files_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(temp.path().join("a.txt"), PACKET_4BS).expect("write a");
    fs::write(temp.path().join("b.txt"), PACKET_1BS).expect("write b");
    let pattern = temp.path().join("*.txt");

    cmd()
        .arg("esp")
        .arg("decode")
        .arg("--input")
        .arg(pattern)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("multiple files match pattern"));
}
