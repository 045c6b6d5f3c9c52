//! Audit sink implementations.
//!
//! Records every push, pop and requeue the queue performs so a caller can
//! replay which client was served when.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{Element, ElementId};
use crate::util::clock::now_ms;

/// Queue operation that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Element entered the queue.
    Push,
    /// Element left the queue for good.
    Pop,
    /// Element was served and put back.
    Requeue,
}

/// Audit event structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Element the event refers to.
    pub element_id: ElementId,
    /// Element display name.
    pub name: String,
    /// Action taken.
    pub action: AuditAction,
    /// Score after the action.
    pub score: f64,
    /// Service counter after the action.
    pub times_served: u64,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
}

/// Audit sink abstraction.
pub trait AuditSink: Send {
    /// Record an audit event.
    fn record(&mut self, event: AuditEvent);
}

/// In-memory audit sink for testing and dev.
pub struct InMemoryAuditSink {
    events: VecDeque<AuditEvent>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events.min(1024)),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.iter().cloned().collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&mut self, event: AuditEvent) {
        if self.max_events == 0 {
            return;
        }
        if self.events.len() >= self.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

/// Sink that hands events to a shared [`InMemoryAuditSink`], so the caller keeps
/// read access after the queue takes ownership of the boxed sink.
#[derive(Clone)]
pub struct SharedAuditSink {
    inner: std::sync::Arc<parking_lot::Mutex<InMemoryAuditSink>>,
}

impl SharedAuditSink {
    /// Create a shared sink holding at most `max_events`.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            inner: std::sync::Arc::new(parking_lot::Mutex::new(InMemoryAuditSink::new(max_events))),
        }
    }

    /// Retrieve a snapshot of stored events.
    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        self.inner.lock().events()
    }
}

impl AuditSink for SharedAuditSink {
    fn record(&mut self, event: AuditEvent) {
        self.inner.lock().record(event);
    }
}

/// Helper to build an audit event from an element's current state.
#[must_use]
pub fn build_audit_event(element: &Element, action: AuditAction) -> AuditEvent {
    AuditEvent {
        element_id: element.id(),
        name: element.name().to_string(),
        action,
        score: element.score(),
        times_served: element.times_served(),
        created_at_ms: now_ms(),
    }
}
