use psyreports_activation::{ActivationConfig, ActivationError, DEFAULT_SALT};
use std::fs;
use std::path::PathBuf;

#[test]
fn file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("activation.json");
    fs::write(&path, r#"{ "salt": "CLINIC_7", "data_dir": "/srv/psy" }"#).unwrap();

    let config = ActivationConfig::from_file(&path).unwrap();
    assert_eq!(config.salt, "CLINIC_7");
    assert_eq!(config.data_dir, PathBuf::from("/srv/psy"));
}

#[test]
fn missing_fields_take_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("activation.json");
    fs::write(&path, r#"{ "data_dir": "/srv/psy" }"#).unwrap();

    let config = ActivationConfig::from_file(&path).unwrap();
    assert_eq!(config.salt, DEFAULT_SALT);
}

#[test]
fn explicit_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ActivationConfig::load(Some(dir.path().join("nope.json").as_path())).unwrap_err();
    assert!(matches!(err, ActivationError::Config(_)));
}

#[test]
fn malformed_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("activation.json");
    fs::write(&path, "salt = 1").unwrap();
    let err = ActivationConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ActivationError::Config(_)));
}
