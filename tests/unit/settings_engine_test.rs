//! Integration-level unit tests for the SettingsEngine public API.
//!
//! These tests exercise the SettingsEngine through its public trait interface,
//! validating default loading, value persistence, and reset behavior.

use raindrop_search::services::settings_engine::{SettingsEngine, SettingsEngineTrait, TOKEN_ENV_VAR};
use raindrop_search::types::errors::SettingsError;
use raindrop_search::types::settings::{SearchSettings, DEFAULT_BASE_URL};
use serde_json::json;
use tempfile::TempDir;

/// Helper: create a SettingsEngine backed by a temp directory that lives for the
/// duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

/// Without a config file the client starts with the built-in defaults.
#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(settings, SearchSettings::default());
    assert_eq!(settings.api.base_url, DEFAULT_BASE_URL);
    assert_eq!(settings.search.page_size, 25);
    assert_eq!(settings.search.debounce_ms, 300);
    assert!(settings.shortcuts.is_empty());
}

/// A change made through `set_value` is visible to a fresh engine reading the same file.
#[test]
fn test_set_value_persists_changes() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine.set_value("search.page_size", json!(50)).unwrap();
        engine.set_value("api.token", json!("secret")).unwrap();
    }

    {
        let mut engine2 = engine_in_temp(&dir);
        let loaded = engine2.load().unwrap();
        assert_eq!(loaded.search.page_size, 50);
        assert_eq!(loaded.api.token, "secret");
    }
}

#[test]
fn test_set_value_rejects_unknown_keys_and_bad_values() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    assert!(matches!(
        engine.set_value("search.colour", json!("blue")),
        Err(SettingsError::InvalidKey(_))
    ));
    assert!(matches!(
        engine.set_value("", json!(1)),
        Err(SettingsError::InvalidKey(_))
    ));
    assert!(matches!(
        engine.set_value("search.page_size", json!("many")),
        Err(SettingsError::InvalidValue(_))
    ));
    assert_eq!(*engine.get_settings(), SearchSettings::default());
}

/// Shortcut overrides are a free-form map, so new action keys are accepted.
#[test]
fn test_shortcut_overrides_accept_new_keys() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    engine.set_value("shortcuts.show_help", json!("F1")).unwrap();
    assert_eq!(
        engine.get_settings().shortcuts.get("show_help").map(String::as_str),
        Some("F1")
    );
}

#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine.set_value("logging.debug", json!(true)).unwrap();
        assert!(engine.get_settings().logging.debug);

        engine.reset().unwrap();
        assert_eq!(*engine.get_settings(), SearchSettings::default());
    }

    {
        let mut engine2 = engine_in_temp(&dir);
        assert_eq!(engine2.load().unwrap(), SearchSettings::default());
    }
}

/// Sections missing from an older file fall back to their defaults.
#[test]
fn test_partial_file_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{"api":{"base_url":"http://localhost:9000","timeout_secs":5},"search":{"page_size":10,"debounce_ms":0}}"#,
    )
    .unwrap();

    let mut engine = engine_in_temp(&dir);
    let settings = engine.load().unwrap();
    assert_eq!(settings.api.base_url, "http://localhost:9000");
    assert_eq!(settings.api.token, "");
    assert!(!settings.logging.debug);
    assert!(settings.shortcuts.is_empty());
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();

    let mut engine = engine_in_temp(&dir);
    assert!(matches!(engine.load(), Err(SettingsError::SerializationError(_))));
}

#[test]
fn test_token_comes_from_settings_file() {
    if std::env::var(TOKEN_ENV_VAR).is_ok() {
        return;
    }
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    assert!(matches!(engine.resolve_token(), Err(SettingsError::MissingToken)));

    engine.set_value("api.token", json!("file-token")).unwrap();
    assert_eq!(engine.resolve_token().unwrap(), "file-token");
}
