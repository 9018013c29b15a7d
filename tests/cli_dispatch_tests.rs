use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_chicken_fight")
}

fn unique_temp_path(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("chicken-fight-{name}-{stamp}.yaml"))
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(bin())
        .args(args)
        .env_remove("CHICKEN_FIGHT_CONFIG")
        .output()
        .expect("binary should run")
}

#[test]
fn round_command_settles_and_emits_json() {
    let output = run(&["round", "11", "a", "40", "100"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value = serde_json::from_str(&stdout).expect("round should emit json");
    assert_eq!(payload["phase"], "result");
    assert_eq!(payload["settlement"]["bet"], 40);
    assert_eq!(payload["settlement"]["side"], "A");
    assert_eq!(payload["settlement"]["balance_before"], 100);
    assert!(payload["settlement"]["new_balance"].is_u64());
    assert_eq!(payload["contestant_a"].as_array().map(Vec::len), Some(5));
}

#[test]
fn round_command_is_deterministic_per_seed() {
    let first = run(&["round", "3", "b", "10"]);
    let second = run(&["round", "3", "b", "10"]);
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn round_command_rejects_unknown_side() {
    let output = run(&["round", "3", "c"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage: chicken_fight round"));
}

#[test]
fn round_command_fails_without_balance() {
    let output = run(&["round", "3", "a", "10", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("round failed"));
}

#[test]
fn odds_command_includes_user_stake() {
    let output = run(&["odds", "5", "b", "250"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value = serde_json::from_str(&stdout).expect("odds should emit json");
    let population = payload["population"].as_array().expect("population array");
    let staked_b: u64 = population
        .iter()
        .filter(|entry| entry["side"] == "B")
        .filter_map(|entry| entry["amount"].as_u64())
        .sum();
    assert_eq!(payload["odds"]["bet_b"].as_u64(), Some(staked_b + 250));
    assert!(payload["odds"]["display_b"]
        .as_str()
        .is_some_and(|display| display.starts_with("1:")));
}

#[test]
fn classify_command_prints_tier() {
    let output = run(&["classify", "67"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "HIGH");

    let output = run(&["classify"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn simulate_command_emits_table() {
    let output = run(&["simulate", "50", "3", "underdog", "--table"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert_eq!(
        lines.next(),
        Some("rounds\tseed\ta_win_rate\tplayer_win_rate\treturn_to_player")
    );
    assert!(lines.next().is_some_and(|row| row.starts_with("50\t3\t")));
}

#[test]
fn unknown_command_prints_usage() {
    let output = run(&["serve"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage: chicken_fight"));
}

#[test]
fn invalid_config_file_fails() {
    let path = unique_temp_path("invalid-config");
    fs::write(&path, "odds:\n  max_odds: 0.5\n").expect("fixture should be written");

    let output = Command::new(bin())
        .args(["classify", "10"])
        .env("CHICKEN_FIGHT_CONFIG", &path)
        .output()
        .expect("classify should run");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("config error"));

    let _ = fs::remove_file(path);
}

#[test]
fn config_file_changes_starting_balance() {
    let path = unique_temp_path("balance-config");
    fs::write(&path, "starting_balance: 1000\n").expect("fixture should be written");

    let output = Command::new(bin())
        .args(["round", "9", "a", "500"])
        .env("CHICKEN_FIGHT_CONFIG", &path)
        .output()
        .expect("round should run");

    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("round should emit json");
    assert_eq!(payload["settlement"]["balance_before"], 1000);
    assert_eq!(payload["settlement"]["bet"], 500);

    let _ = fs::remove_file(path);
}
