//! Tests for builder modules

use std::sync::Arc;
use std::time::{Duration, Instant};

use prometheus_fair_queue::builders::QueueBuilder;
use prometheus_fair_queue::config::{QueueConfig, StrategyConfig};
use prometheus_fair_queue::core::{AuditAction, QueueError, StrategyKind};
use prometheus_fair_queue::util::ManualClock;

#[test]
fn test_queue_builder_defaults() {
    let builder = QueueBuilder::new(QueueConfig::default());
    assert_eq!(builder.config().strategy, StrategyConfig::UsageDecay);
    assert!(builder.audit_handle().is_none());

    let queue = builder.build().unwrap();
    assert_eq!(queue.strategy_kind(), StrategyKind::UsageDecay);
    assert!(queue.is_empty());
}

#[test]
fn test_queue_builder_wall_clock_uses_reference() {
    let start = Instant::now();
    let clock = Arc::new(ManualClock::starting_at(start + Duration::from_secs(10)));
    let config = QueueConfig {
        strategy: StrategyConfig::WallClockDecay,
        ..QueueConfig::default()
    };

    let mut queue = QueueBuilder::new(config)
        .reference(start)
        .clock(clock)
        .build()
        .unwrap();
    assert_eq!(queue.strategy_kind(), StrategyKind::WallClockDecay);

    queue.push(50.0, "a").unwrap();
    assert!((queue.peek().unwrap().score() - 5.0).abs() < 1e-9);
}

#[test]
fn test_queue_builder_wall_clock_requires_reference() {
    let config = QueueConfig {
        strategy: StrategyConfig::WallClockDecay,
        ..QueueConfig::default()
    };

    let builder = QueueBuilder::new(config);
    assert!(matches!(builder.strategy(), Err(QueueError::Config(_))));
    let err = builder.build().unwrap_err();
    assert_eq!(
        err,
        QueueError::Config("wall_clock_decay requires a reference instant".into())
    );
}

#[test]
fn test_queue_builder_audit_from_config() {
    let config = QueueConfig {
        audit_capacity: Some(8),
        ..QueueConfig::default()
    };
    let builder = QueueBuilder::new(config);
    let audit = builder.audit_handle().unwrap();
    let mut queue = builder.build().unwrap();

    queue.push(1.0, "a").unwrap();
    queue.pop_and_requeue().unwrap();

    let actions: Vec<_> = audit.events().iter().map(|e| e.action).collect();
    assert_eq!(actions, vec![AuditAction::Push, AuditAction::Requeue]);
}

#[test]
fn test_queue_builder_rejects_invalid_config() {
    let config = QueueConfig {
        audit_capacity: Some(0),
        ..QueueConfig::default()
    };
    assert!(QueueBuilder::new(config).build().is_err());
}

#[test]
fn test_queue_builder_shared() {
    let shared = QueueBuilder::new(QueueConfig::default()).build_shared().unwrap();
    shared.push(2.0, "a").unwrap();
    assert_eq!(shared.size(), 1);
}
