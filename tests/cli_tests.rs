//! CLI Tests: the mina-connect binary against a temporary data directory

use serde_json::Value;
use std::process::{Command, Output};
use tempfile::TempDir;

const ADDR: &str = "B62qjVL9RjmmaD4yh9V3fGFkJ5VDWkjAkqF3W3F7t8FU2jTT6wxPZ9s";

fn cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mina-connect"))
        .args(args)
        .arg("--json")
        .env_remove("MINA_CONNECT_STORAGE_KEY")
        .env_remove("MINA_CONNECT_AUTO_CONNECT")
        .output()
        .expect("run mina-connect")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("json on stdout")
}

#[test]
fn validate_and_format() {
    let out = cli(&["validate", ADDR]);
    assert!(out.status.success());
    assert_eq!(stdout_json(&out)["valid"], true);

    let out = cli(&["validate", "B62qshort"]);
    assert!(out.status.success());
    assert_eq!(stdout_json(&out)["valid"], false);

    let out = cli(&["format", ADDR]);
    assert!(out.status.success());
    assert_eq!(stdout_json(&out)["formatted"], "B62qjV...PZ9s");
}

#[test]
fn format_invalid_fails() {
    let out = cli(&["format", "B62qshort"]);
    assert!(!out.status.success());
    let err: Value = serde_json::from_slice(&out.stderr).expect("json on stderr");
    assert!(err["error"].as_str().unwrap_or_default().contains("invalid address"));
}

#[test]
fn status_and_reset_use_data_dir() {
    let dir = TempDir::new().expect("tempdir");
    let data_dir = dir.path().to_str().expect("utf-8 path");
    std::fs::write(
        dir.path().join("mina-wallet-storage.json"),
        format!(r#"{{"address":"{}","isConnected":true,"networkID":"mina:mainnet"}}"#, ADDR),
    )
    .expect("seed record");

    let out = cli(&["status", "--data-dir", data_dir]);
    assert!(out.status.success());
    let status = stdout_json(&out);
    assert_eq!(status["address"], ADDR);
    assert_eq!(status["isConnected"], true);
    assert_eq!(status["isWalletInstalled"], false);
    assert_eq!(status["availability"], "not_installed");
    assert_eq!(status["network"], "Mainnet");
    assert_eq!(status["formatted"], "B62qjV...PZ9s");

    let out = cli(&["reset", "--data-dir", data_dir]);
    assert!(out.status.success());
    assert_eq!(stdout_json(&out)["success"], true);

    let out = cli(&["status", "--data-dir", data_dir]);
    let status = stdout_json(&out);
    assert!(status["address"].is_null());
    assert_eq!(status["isConnected"], false);
    assert!(status["networkID"].is_null());
}

#[test]
fn networks_lists_known_tags() {
    let out = cli(&["networks"]);
    assert!(out.status.success());
    let list = stdout_json(&out);
    let ids: Vec<&str> = list
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|n| n["id"].as_str())
        .collect();
    assert!(ids.contains(&"mina:mainnet"));
    assert!(ids.contains(&"mina:devnet"));
}
