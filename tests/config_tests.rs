use std::io::Write;

use fasttrack::{load_config_from_json, ConfigError, GameConfig, GameError};

fn write_tmp(contents: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("tempfile");
    f.write_all(contents.as_bytes()).expect("write config");
    f
}

#[test]
fn missing_fields_take_defaults() {
    let f = write_tmp(r#"{ "player_count": 3 }"#);
    let cfg = load_config_from_json(f.path()).expect("load");
    assert_eq!(cfg.player_count, 3);
    assert_eq!(cfg.seed, GameConfig::default().seed);
}

#[test]
fn full_config_loads() {
    let f = write_tmp(r#"{ "player_count": 6, "seed": 42 }"#);
    let cfg = load_config_from_json(f.path()).expect("load");
    assert_eq!(cfg, GameConfig::new(6, 42));
    assert_eq!(cfg.seats().expect("seats").len(), 6);
}

#[test]
fn unsupported_player_count_is_rejected() {
    let f = write_tmp(r#"{ "player_count": 8 }"#);
    match load_config_from_json(f.path()) {
        Err(ConfigError::Invalid(GameError::InvalidPlayerCount(8))) => {}
        other => panic!("expected InvalidPlayerCount, got {other:?}"),
    }
}

#[test]
fn malformed_json_is_a_parse_error() {
    let f = write_tmp("{ player_count: ");
    assert!(matches!(load_config_from_json(f.path()), Err(ConfigError::Parse(_))));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.json");
    assert!(matches!(load_config_from_json(&path), Err(ConfigError::Read { .. })));
}
