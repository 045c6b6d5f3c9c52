//! Tests for configuration validation

use std::collections::HashMap;

use prometheus_fair_queue::config::queue::{ENV_AUDIT_CAPACITY, ENV_INITIAL_CAPACITY, ENV_STRATEGY};
use prometheus_fair_queue::config::{QueueConfig, StrategyConfig};
use prometheus_fair_queue::core::{QueueError, StrategyKind};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_default_config() {
    let config = QueueConfig::default();
    assert_eq!(config.strategy, StrategyConfig::UsageDecay);
    assert_eq!(config.initial_capacity, 64);
    assert!(config.audit_capacity.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_invalid_audit_capacity() {
    let invalid = QueueConfig {
        audit_capacity: Some(0),
        ..QueueConfig::default()
    };
    assert!(matches!(invalid.validate(), Err(QueueError::Config(_))));
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "strategy": "wall_clock_decay",
        "initial_capacity": 128,
        "audit_capacity": 500
    }"#;

    let config = QueueConfig::from_json_str(json).unwrap();
    assert_eq!(config.strategy, StrategyConfig::WallClockDecay);
    assert_eq!(config.initial_capacity, 128);
    assert_eq!(config.audit_capacity, Some(500));
}

#[test]
fn test_config_from_json_defaults() {
    let config = QueueConfig::from_json_str("{}").unwrap();
    assert_eq!(config, QueueConfig::default());
}

#[test]
fn test_config_from_json_unknown_strategy() {
    let err = QueueConfig::from_json_str(r#"{ "strategy": "fifo" }"#).unwrap_err();
    assert!(err.to_string().contains("parse error"));
}

#[test]
fn test_config_from_lookup() {
    let config = QueueConfig::from_lookup(lookup(&[
        (ENV_STRATEGY, "wall_clock_decay"),
        (ENV_INITIAL_CAPACITY, "16"),
        (ENV_AUDIT_CAPACITY, "32"),
    ]))
    .unwrap();
    assert_eq!(config.strategy, StrategyConfig::WallClockDecay);
    assert_eq!(config.initial_capacity, 16);
    assert_eq!(config.audit_capacity, Some(32));
}

#[test]
fn test_config_from_lookup_rejects_garbage() {
    assert!(QueueConfig::from_lookup(lookup(&[(ENV_STRATEGY, "lifo")])).is_err());
    assert!(QueueConfig::from_lookup(lookup(&[(ENV_INITIAL_CAPACITY, "many")])).is_err());
    assert!(QueueConfig::from_lookup(lookup(&[(ENV_AUDIT_CAPACITY, "0")])).is_err());
}

#[test]
fn test_strategy_config_maps_to_kind() {
    assert_eq!(StrategyKind::from(StrategyConfig::UsageDecay), StrategyKind::UsageDecay);
    assert_eq!(
        StrategyKind::from(StrategyConfig::WallClockDecay),
        StrategyKind::WallClockDecay
    );
}
