//! Tests for access token configuration

use std::fs;

use tempfile::TempDir;
use todoist_cli::config::{Config, ConfigError, mask_token, resolve_token_from};

fn config(token: &str) -> Config {
    Config {
        access_token: token.to_string(),
    }
}

// =============================================================================
// LOAD AND SAVE
// =============================================================================

#[test]
fn save_then_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".todoist").join("config");

    config("0123456789abcdef").save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.access_token, "0123456789abcdef");
    assert!(!path.with_extension("tmp").exists());

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("access_token = \"0123456789abcdef\""));
}

#[test]
fn missing_file_is_default() {
    let temp = TempDir::new().unwrap();
    let loaded = Config::load_from(&temp.path().join("absent")).unwrap();
    assert_eq!(loaded, Config::default());
}

#[test]
fn invalid_toml_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config");
    fs::write(&path, "access_token = ").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn unquoted_key_value_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config");
    fs::write(&path, "# Todoist CLI Configuration\naccess_token=abcdef0123456789\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("failed to parse"));
}

#[test]
fn save_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config");

    config("first-token-value").save_to(&path).unwrap();
    config("second-token-value").save_to(&path).unwrap();

    assert_eq!(Config::load_from(&path).unwrap().access_token, "second-token-value");
}

#[cfg(unix)]
#[test]
fn save_restricts_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(".todoist");
    let path = dir.join("config");

    config("0123456789abcdef").save_to(&path).unwrap();

    let file_mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    let dir_mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
    assert_eq!(file_mode, 0o600);
    assert_eq!(dir_mode, 0o700);
}

// =============================================================================
// TOKEN RESOLUTION
// =============================================================================

#[test]
fn config_token_wins_over_env() {
    let file = config("from-file");
    assert_eq!(resolve_token_from(Some(&file), Some("from-env".to_string())), "from-file");
}

#[test]
fn env_token_used_when_config_empty() {
    let file = config("  ");
    assert_eq!(resolve_token_from(Some(&file), Some(" from-env ".to_string())), "from-env");
    assert_eq!(resolve_token_from(None, Some("from-env".to_string())), "from-env");
}

#[test]
fn no_token_anywhere_is_empty() {
    assert_eq!(resolve_token_from(None, None), "");
}

// =============================================================================
// MASKING
// =============================================================================

#[test]
fn mask_long_token() {
    assert_eq!(mask_token("0123456789abcdef"), "0123...cdef");
}

#[test]
fn mask_short_token() {
    assert_eq!(mask_token("12345678"), "****");
    assert_eq!(mask_token(""), "****");
}
