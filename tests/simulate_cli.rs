use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

fn simulate() -> Command {
    Command::cargo_bin("simulate").expect("binary exists")
}

#[test]
fn plays_requested_games_with_audit() {
    simulate()
        .args(["--games", "3", "--players", "3", "--seed", "7", "--max-turns", "200", "--audit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[simulate] Played 3 games"))
        .stdout(predicate::str::contains("[simulate] player 2:"));
}

#[test]
fn rejects_unsupported_player_count() {
    simulate()
        .args(["--games", "1", "--players", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidPlayerCount(9)"));
}

#[test]
fn reads_config_file() {
    let mut cfg = tempfile::NamedTempFile::new().expect("tempfile");
    write!(cfg, r#"{{ "player_count": 5, "seed": 99 }}"#).expect("write config");

    simulate()
        .args(["--games", "2", "--max-turns", "50"])
        .arg("--config")
        .arg(cfg.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("players=5"))
        .stdout(predicate::str::contains("[simulate] player 4:"));
}

#[test]
fn writes_event_log_for_first_game() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("events.jsonl");

    simulate()
        .args(["--games", "2", "--players", "2", "--seed", "3", "--max-turns", "30"])
        .arg("--events")
        .arg(&path)
        .assert()
        .success();

    let text = std::fs::read_to_string(&path).expect("event log");
    let events: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).expect("one JSON object per line"))
        .collect();
    assert!(!events.is_empty());
    assert_eq!(events[0]["event"], "card_drawn");
    assert_eq!(events[0]["player"], 0);
    assert!(events.iter().any(|e| e["event"] == "turn_ended"));
}
