//! Integration tests for configuration resolution.

use apns_live::{ApnsConfig, ConfigError};
use std::env;
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;

// Global lock to prevent env var pollution between tests
static ENV_LOCK: Mutex<()> = Mutex::new(());

const ENV_VARS: &[&str] = &[
    "APNS_CONFIG",
    "APNS_HOST",
    "APNS_PORT",
    "APNS_BUNDLE_ID",
    "APNS_KEY_PATH",
    "APNS_KEY_ID",
    "APNS_TEAM_ID",
    "APNS_TIMEOUT_SECS",
];

fn clear_env() -> std::sync::MutexGuard<'static, ()> {
    let guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    for var in ENV_VARS {
        env::remove_var(var);
    }
    guard
}

fn write_config(dir: &TempDir, json: &serde_json::Value) -> std::path::PathBuf {
    let path = dir.path().join("config.json");
    fs::write(&path, serde_json::to_string_pretty(json).unwrap()).unwrap();
    path
}

#[test]
fn test_file_values_are_loaded() {
    let _guard = clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        &serde_json::json!({
            "host": "api.sandbox.push.apple.com",
            "port": 2197,
            "bundle_id": "com.leo.hsannu",
            "key_path": "/secrets/AuthKey_BK88TAV8F8.p8",
            "key_id": "BK88TAV8F8",
            "team_id": "CNSN2FZNRR",
            "timeout_secs": 30
        }),
    );

    let config = ApnsConfig::load(Some(&path)).unwrap();
    assert_eq!(config.host, "api.sandbox.push.apple.com");
    assert_eq!(config.port, 2197);
    assert_eq!(config.bundle_id, "com.leo.hsannu");
    assert_eq!(config.key_id, "BK88TAV8F8");
    assert_eq!(config.team_id, "CNSN2FZNRR");
    assert_eq!(config.timeout_secs, 30);
    assert!(config.validate_signing().is_ok());
    assert!(config.validate_delivery().is_ok());
}

#[test]
fn test_env_overrides_file() {
    let _guard = clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        &serde_json::json!({ "bundle_id": "com.leo.hsannu", "key_id": "FILEKEY" }),
    );

    env::set_var("APNS_KEY_ID", "ENVKEY");
    env::set_var("APNS_PORT", "2197");
    let config = ApnsConfig::load(Some(&path)).unwrap();
    env::remove_var("APNS_KEY_ID");
    env::remove_var("APNS_PORT");

    assert_eq!(config.key_id, "ENVKEY");
    assert_eq!(config.port, 2197);
    assert_eq!(config.bundle_id, "com.leo.hsannu");
}

#[test]
fn test_apns_config_env_names_the_file() {
    let _guard = clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &serde_json::json!({ "team_id": "FROMENVFILE" }));

    env::set_var("APNS_CONFIG", &path);
    let config = ApnsConfig::load(None).unwrap();
    env::remove_var("APNS_CONFIG");

    assert_eq!(config.team_id, "FROMENVFILE");
}

#[test]
fn test_invalid_env_port_is_ignored() {
    let _guard = clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &serde_json::json!({ "port": 2197 }));

    env::set_var("APNS_PORT", "not-a-port");
    let config = ApnsConfig::load(Some(&path)).unwrap();
    env::remove_var("APNS_PORT");

    assert_eq!(config.port, 2197);
}

#[test]
fn test_missing_explicit_file_is_read_error() {
    let _guard = clear_env();
    let dir = TempDir::new().unwrap();
    let err = ApnsConfig::load(Some(&dir.path().join("nope.json"))).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }), "{err:?}");
}

#[test]
fn test_malformed_file_is_parse_error() {
    let _guard = clear_env();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    let err = ApnsConfig::load(Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "{err:?}");
}
