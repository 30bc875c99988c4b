#![cfg(feature = "cli")]

use std::io::Write;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

const CAPTURE: &str = r#"# controller traffic before the board reset
{"slot": 3, "payload": "0105020000"}
{"slot": 0, "payload": "0106010000"}
{"slot": 14, "payload": "0105010000"}
{"slot": 12, "payload": "010b64"}
{"slot": 40, "payload": "0105020000"}
{"slot": 0, "payload": "0109000000"}
"#;

fn capture_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file should be creatable");
    file.write_all(contents.as_bytes())
        .expect("capture should be writable");
    file
}

fn chancache(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chancache"))
        .arg("--log-level")
        .arg("error")
        .args(args)
        .output()
        .expect("chancache should run")
}

fn json_stdout(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be json")
}

#[test]
fn inspect_reports_channel_kinds() {
    let capture = capture_file(CAPTURE);
    let path = capture.path().to_str().unwrap();
    let output = chancache(&["--format", "json", "inspect", path]);

    assert!(output.status.success());
    let report = json_stdout(&output);
    assert!(report["schema_id"]
        .as_str()
        .unwrap()
        .contains("channel-report.schema.json"));
    assert_eq!(report["applied"], 5);
    assert_eq!(report["rejected"], 1);

    let channels = report["channels"].as_array().unwrap();
    assert_eq!(channels.len(), 8);
    assert_eq!(channels[0]["kind"], "digital_input");
    assert_eq!(channels[1]["kind"], "current_adc");
    assert_eq!(channels[3]["kind"], "voltage_adc");
    assert_eq!(channels[7]["kind"], "high_impedance");
}

#[test]
fn replay_lists_messages_in_slot_order() {
    let capture = capture_file(CAPTURE);
    let path = capture.path().to_str().unwrap();
    let output = chancache(&["--format", "json", "replay", path]);

    assert!(output.status.success());
    let plan = json_stdout(&output);
    let slots: Vec<u64> = plan["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|message| message["slot"].as_u64().unwrap())
        .collect();
    assert_eq!(slots, vec![0, 3, 12, 14]);
    assert_eq!(plan["messages"][0]["payload"], "0109000000");
    assert_eq!(plan["messages"][2]["region"], "rtd-update-time");
    assert_eq!(plan["messages"][3]["region"], "additional-adc[1]");
}

#[test]
fn snapshot_writes_reloadable_file() {
    let capture = capture_file(CAPTURE);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("snapshot.json");
    let output = chancache(&[
        "snapshot",
        capture.path().to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let text = std::fs::read_to_string(&out).unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(snapshot["layout"]["analog_channels"], 8);
    assert_eq!(snapshot["entries"].as_array().unwrap().len(), 4);
}

#[test]
fn smaller_board_rejects_high_slots() {
    let capture = capture_file(CAPTURE);
    let path = capture.path().to_str().unwrap();
    let output = chancache(&[
        "--format",
        "json",
        "--analog-channels",
        "2",
        "--pwm-channels",
        "0",
        "inspect",
        path,
    ]);

    assert!(output.status.success());
    let report = json_stdout(&output);
    assert_eq!(report["channels"].as_array().unwrap().len(), 2);
    assert_eq!(report["applied"], 3);
    assert_eq!(report["rejected"], 3);
}

#[test]
fn malformed_capture_exits_60() {
    let capture = capture_file("{\"slot\": 1}\n");
    let output = chancache(&["inspect", capture.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn missing_capture_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.jsonl");
    let output = chancache(&["replay", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn zero_analog_channels_exits_64() {
    let output = chancache(&["--analog-channels", "0", "version"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn version_reports_package_version() {
    let output = chancache(&["version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}
