//! Configuration loading against the live process environment
//!
//! Tests that touch environment variables are marked #[serial] so they
//! never run in parallel with each other.

use serial_test::serial;
use std::env;
use std::io::Write;
use tunecast_common::config::{
    load_credentials_file, load_toml_config, AppConfig, ConfigOverrides, ENV_CLIENT_ID,
    ENV_CLIENT_SECRET, ENV_LEGACY_STORE_CONNECTION_STRING, ENV_STORE_CONNECTION_STRING,
};
use tunecast_common::Error;

fn clear_env() {
    for key in [
        ENV_CLIENT_ID,
        ENV_CLIENT_SECRET,
        ENV_STORE_CONNECTION_STRING,
        ENV_LEGACY_STORE_CONNECTION_STRING,
    ] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_credentials_file_populates_environment() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "SPOTIFY_CLIENT_ID=file-id").unwrap();
    writeln!(file, "SPOTIFY_CLIENT_SECRET=file-secret").unwrap();
    writeln!(file, "MONGO_CONNECTION_STRING=sqlite://from-file.db").unwrap();

    let overrides = ConfigOverrides {
        credentials_file: Some(path),
        ..Default::default()
    };
    let config = AppConfig::load(&overrides).unwrap();

    assert_eq!(config.catalog.client_id, "file-id");
    assert_eq!(config.catalog.client_secret, "file-secret");
    assert_eq!(config.store.connection_string, "sqlite://from-file.db");
    clear_env();
}

#[test]
#[serial]
fn test_environment_wins_over_credentials_file() {
    clear_env();
    env::set_var(ENV_CLIENT_ID, "env-id");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(&path, "SPOTIFY_CLIENT_ID=file-id\nSPOTIFY_CLIENT_SECRET=file-secret\n").unwrap();

    let overrides = ConfigOverrides {
        credentials_file: Some(path),
        ..Default::default()
    };
    let config = AppConfig::load(&overrides).unwrap();

    assert_eq!(config.catalog.client_id, "env-id");
    assert_eq!(config.catalog.client_secret, "file-secret");
    clear_env();
}

#[test]
#[serial]
fn test_missing_credentials_file_is_not_fatal() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_credentials_file(&dir.path().join("absent.env")).unwrap();
    assert!(!loaded);

    // Without any credentials the configuration itself is incomplete
    let overrides = ConfigOverrides {
        credentials_file: Some(dir.path().join("absent.env")),
        ..Default::default()
    };
    assert!(matches!(AppConfig::load(&overrides), Err(Error::Config(_))));
}

#[test]
fn test_missing_toml_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_toml_config(&dir.path().join("tunecast.toml")).unwrap();
    assert!(config.server.port.is_none());
    assert!(config.catalog.client_id.is_none());
}

#[test]
fn test_malformed_toml_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tunecast.toml");
    std::fs::write(&path, "[server\nport = 1").unwrap();
    assert!(matches!(load_toml_config(&path), Err(Error::TomlParse(_))));
}
