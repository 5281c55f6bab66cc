use psyreports_activation::{ActivationError, CodeRejected};

#[test]
fn error_display_storage() {
    let err = ActivationError::Storage("disk full".into());
    let msg = format!("{err}");
    assert!(msg.contains("storage"));
    assert!(msg.contains("disk full"));
}

#[test]
fn error_display_config() {
    let err = ActivationError::Config("bad salt".into());
    assert!(format!("{err}").contains("configuration"));
}

#[test]
fn error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: ActivationError = io.into();
    assert!(format!("{err}").contains("IO error"));
}

#[test]
fn error_from_serde_json() {
    let serde_err: Result<serde_json::Value, _> = serde_json::from_str("not json");
    let err: ActivationError = serde_err.unwrap_err().into();
    assert!(format!("{err}").contains("serialization"));
}

#[test]
fn code_rejected_reveals_nothing() {
    assert_eq!(format!("{CodeRejected}"), "invalid activation code");
}

#[test]
fn error_is_debug() {
    let _ = format!("{:?}", ActivationError::Storage("x".into()));
    let _ = format!("{CodeRejected:?}");
}
