//! Core queue abstractions: elements, the heap, score strategies and the fair queue.

pub mod error;
pub mod element;
pub mod heap;
pub mod strategy;
pub mod scheduler;
pub mod shared;
pub mod audit;
pub mod report;

pub use error::{AppResult, QueueError};
pub use element::{Element, ElementId, ElementSnapshot, ElementState};
pub use heap::{BinaryMaxHeap, Prioritized};
pub use strategy::{Score, ScoreStrategy, Strategy, StrategyKind, UsageDecay, WallClockDecay};
pub use scheduler::{FairQueue, ScoredQueue};
pub use shared::SharedFairQueue;
pub use audit::{
    build_audit_event, AuditAction, AuditEvent, AuditSink, InMemoryAuditSink, SharedAuditSink,
};
pub use report::{serve, ServiceCount, ServiceReport, WeightBucket};
