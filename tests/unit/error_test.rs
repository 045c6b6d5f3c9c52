//! Tests for error types

use prometheus_fair_queue::core::QueueError;

#[test]
fn test_empty_error() {
    let err = QueueError::Empty;
    assert_eq!(format!("{}", err), "queue empty");
    assert!(err.is_empty());
}

#[test]
fn test_invalid_weight_error() {
    let err = QueueError::InvalidWeight(-2.5);
    assert_eq!(format!("{}", err), "invalid weight: -2.5");
    assert!(!err.is_empty());
}

#[test]
fn test_config_error() {
    let err = QueueError::Config("bad strategy".to_string());
    assert_eq!(format!("{}", err), "invalid configuration: bad strategy");
}

#[test]
fn test_error_converts_to_anyhow() {
    fn run() -> prometheus_fair_queue::core::AppResult<()> {
        Err::<(), _>(QueueError::Empty)?;
        Ok(())
    }
    let err = run().unwrap_err();
    assert_eq!(err.to_string(), "queue empty");
}
