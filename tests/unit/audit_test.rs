//! Tests for audit sink

use prometheus_fair_queue::core::{
    build_audit_event, AuditAction, AuditSink, Element, InMemoryAuditSink, SharedAuditSink,
};

#[test]
fn test_in_memory_audit_sink() {
    let mut sink = InMemoryAuditSink::new(10);
    let element = Element::new("repo-1", 4.0).unwrap();

    sink.record(build_audit_event(&element, AuditAction::Push));
    assert_eq!(sink.events().len(), 1);

    let events = sink.events();
    assert_eq!(events[0].element_id, element.id());
    assert_eq!(events[0].name, "repo-1");
    assert_eq!(events[0].action, AuditAction::Push);
}

#[test]
fn test_audit_sink_overflow() {
    let mut sink = InMemoryAuditSink::new(2);
    let a = Element::new("a", 1.0).unwrap();
    let b = Element::new("b", 1.0).unwrap();
    let c = Element::new("c", 1.0).unwrap();

    sink.record(build_audit_event(&a, AuditAction::Push));
    sink.record(build_audit_event(&b, AuditAction::Push));
    sink.record(build_audit_event(&c, AuditAction::Push));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].name, "b"); // First one popped
    assert_eq!(events[1].name, "c");
}

#[test]
fn test_zero_capacity_sink_drops_everything() {
    let mut sink = InMemoryAuditSink::new(0);
    sink.record(build_audit_event(&Element::new("a", 1.0).unwrap(), AuditAction::Pop));
    assert!(sink.events().is_empty());
}

#[test]
fn test_shared_sink_clones_see_same_events() {
    let sink = SharedAuditSink::new(4);
    let mut writer = sink.clone();
    writer.record(build_audit_event(&Element::new("a", 1.0).unwrap(), AuditAction::Requeue));
    assert_eq!(sink.events().len(), 1);
    assert_eq!(sink.events()[0].action, AuditAction::Requeue);
}

#[test]
fn test_build_audit_event() {
    let element = Element::new("repo-9", 2.0).unwrap();
    let event = build_audit_event(&element, AuditAction::Pop);

    assert_eq!(event.element_id, element.id());
    assert_eq!(event.action, AuditAction::Pop);
    assert_eq!(event.times_served, 0);
    assert!(event.created_at_ms > 0);

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["action"], "pop");
}
