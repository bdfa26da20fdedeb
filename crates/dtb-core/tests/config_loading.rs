use std::fs;

use dtb_core::{
    config::{Config, CONFIG_FILE, CONFIG_SAMPLE_FILE},
    errors::{Error, FieldProblem},
    json::read_json,
    outcome::OutcomeKind,
};
use tempfile::tempdir;

const SAMPLE: &str = r#"{"discord_token":"DISCORD_TOKEN","twitch_client_id":"TWITCH_CLIENT_ID","twitch_credentials":"TWITCH_CREDENTIALS"}"#;

fn write(dir: &std::path::Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}

#[test]
fn valid_config_loads() {
    let dir = tempdir().unwrap();
    write(dir.path(), CONFIG_SAMPLE_FILE, SAMPLE);
    write(
        dir.path(),
        CONFIG_FILE,
        r#"{"discord_token":"abc123","twitch_client_id":"xyz","twitch_credentials":"pqr"}"#,
    );

    let cfg = Config::load_from(dir.path()).unwrap();
    assert_eq!(cfg.discord_token(), "abc123");
    assert_eq!(cfg.twitch_client_id(), "xyz");
    assert_eq!(cfg.twitch_credentials(), "pqr");
    assert_eq!(cfg.discord().token, "abc123");
}

#[test]
fn values_are_trimmed() {
    let dir = tempdir().unwrap();
    write(dir.path(), CONFIG_SAMPLE_FILE, SAMPLE);
    write(
        dir.path(),
        CONFIG_FILE,
        r#"{"discord_token":"  abc123\n","twitch_client_id":" xyz","twitch_credentials":"pqr "}"#,
    );

    let cfg = Config::load_from(dir.path()).unwrap();
    assert_eq!(cfg.discord_token(), "abc123");
    assert_eq!(cfg.twitch().client_id, "xyz");
    assert_eq!(cfg.twitch().credentials, "pqr");
}

#[test]
fn placeholder_value_is_fatal_and_names_the_field() {
    let dir = tempdir().unwrap();
    write(dir.path(), CONFIG_SAMPLE_FILE, SAMPLE);
    write(
        dir.path(),
        CONFIG_FILE,
        r#"{"discord_token":"DISCORD_TOKEN","twitch_client_id":"xyz","twitch_credentials":"pqr"}"#,
    );

    match Config::load_from(dir.path()) {
        Err(Error::InvalidConfig { issues }) => {
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].field, "discord_token");
            assert_eq!(issues[0].problem, FieldProblem::Placeholder);
        }
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn every_invalid_field_is_reported() {
    let dir = tempdir().unwrap();
    write(dir.path(), CONFIG_SAMPLE_FILE, SAMPLE);
    write(
        dir.path(),
        CONFIG_FILE,
        r#"{"discord_token":"DISCORD_TOKEN","twitch_credentials":"TWITCH_CREDENTIALS"}"#,
    );

    let Err(Error::InvalidConfig { issues }) = Config::load_from(dir.path()) else {
        panic!("expected InvalidConfig");
    };
    let found = issues
        .iter()
        .map(|i| (i.field, i.problem))
        .collect::<Vec<_>>();
    assert_eq!(
        found,
        vec![
            ("discord_token", FieldProblem::Placeholder),
            ("twitch_client_id", FieldProblem::Missing),
            ("twitch_credentials", FieldProblem::Placeholder),
        ]
    );
}

#[test]
fn empty_values_are_tolerated() {
    let dir = tempdir().unwrap();
    write(dir.path(), CONFIG_SAMPLE_FILE, SAMPLE);
    write(
        dir.path(),
        CONFIG_FILE,
        r#"{"discord_token":"abc123","twitch_client_id":"","twitch_credentials":"pqr"}"#,
    );

    let cfg = Config::load_from(dir.path()).unwrap();
    assert_eq!(cfg.twitch_client_id(), "");
}

#[test]
fn missing_sample_is_generated_before_loading() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        CONFIG_FILE,
        r#"{"discord_token":"abc123","twitch_client_id":"xyz","twitch_credentials":"pqr"}"#,
    );

    Config::load_from(dir.path()).unwrap();

    let sample = read_json(&dir.path().join(CONFIG_SAMPLE_FILE));
    assert!(sample.is_success());
    assert_eq!(sample.into_data(), Config::default_sample());

    let text = fs::read_to_string(dir.path().join(CONFIG_SAMPLE_FILE)).unwrap();
    assert!(text.contains("    \"discord_token\": \"DISCORD_TOKEN\""));
}

#[test]
fn sample_is_generated_even_when_config_is_missing() {
    let dir = tempdir().unwrap();

    match Config::load_from(dir.path()) {
        Err(Error::LoadConfig { outcome, .. }) => assert_eq!(outcome, OutcomeKind::FileNotFound),
        other => panic!("expected LoadConfig, got {other:?}"),
    }
    assert!(dir.path().join(CONFIG_SAMPLE_FILE).is_file());
}

#[test]
fn existing_sample_is_left_alone() {
    let dir = tempdir().unwrap();
    let custom = r#"{"discord_token":"DISCORD_TOKEN","twitch_client_id":"TWITCH_CLIENT_ID","twitch_credentials":"TWITCH_CREDENTIALS","extra":"EXTRA"}"#;
    write(dir.path(), CONFIG_SAMPLE_FILE, custom);
    write(
        dir.path(),
        CONFIG_FILE,
        r#"{"discord_token":"abc123","twitch_client_id":"xyz","twitch_credentials":"pqr"}"#,
    );

    Config::load_from(dir.path()).unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join(CONFIG_SAMPLE_FILE)).unwrap(),
        custom
    );
}

#[test]
fn unwritable_sample_location_is_fatal() {
    let dir = tempdir().unwrap();
    // A directory where the sample file should go cannot be replaced.
    fs::create_dir(dir.path().join(CONFIG_SAMPLE_FILE)).unwrap();

    match Config::load_from(dir.path()) {
        Err(Error::SampleConfig { outcome, .. }) => {
            assert_eq!(outcome, OutcomeKind::IsADirectory)
        }
        other => panic!("expected SampleConfig, got {other:?}"),
    }
}

#[test]
fn malformed_config_is_fatal() {
    let dir = tempdir().unwrap();
    write(dir.path(), CONFIG_SAMPLE_FILE, SAMPLE);
    write(dir.path(), CONFIG_FILE, "{ not json");

    match Config::load_from(dir.path()) {
        Err(err @ Error::LoadConfig { .. }) => {
            assert!(err.to_string().starts_with("failed to load config file"));
            assert!(err.to_string().ends_with("INVALID_ENCODING"));
        }
        other => panic!("expected LoadConfig, got {other:?}"),
    }
}
