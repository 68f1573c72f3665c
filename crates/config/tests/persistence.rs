use std::fs;

use cloudmcp_config::{AccountConfig, Config};
use pretty_assertions::assert_eq;

fn account(token: &str, label: &str) -> AccountConfig {
    AccountConfig {
        token: token.into(),
        label: label.into(),
        api_url: None,
    }
}

#[test]
fn missing_file_loads_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn save_then_load_preserves_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.system.default_account = "primary".into();
    config
        .accounts
        .insert("primary".into(), account("tok-1", "Production"));
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded, config);

    let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name() != "config.toml")
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind");
}

#[cfg(unix)]
#[test]
fn saved_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    Config::default().save(&path).unwrap();
    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o077, 0);
}

#[test]
fn failed_save_leaves_existing_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "x").unwrap();

    let err = Config::default()
        .save(&blocker.join("config.toml"))
        .unwrap_err();
    assert!(err.to_string().contains("not-a-dir"));
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "x");
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[accounts.primary\ntoken = 1").unwrap();
    assert!(matches!(
        Config::load(&path),
        Err(cloudmcp_config::ConfigError::Parse { .. })
    ));
}
