//! Queue elements: immutable identity plus the derived scheduling state.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::heap::Prioritized;
use crate::core::QueueError;

/// Opaque element identifier. Also serves as the handle returned by `push`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Mutable scheduling state. Only the queue writes to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementState {
    /// Current ranking value.
    pub(crate) score: f64,
    /// Number of times the element went through `pop_and_requeue`.
    pub(crate) times_served: u64,
    /// When the score was last derived by a time-based strategy.
    pub(crate) last_computed_at: Option<Instant>,
}

/// A weighted client stored in the queue.
#[derive(Debug, Clone)]
pub struct Element {
    id: ElementId,
    name: String,
    weight: f64,
    state: ElementState,
}

impl Element {
    /// Create an element with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::InvalidWeight`] unless `weight` is finite and
    /// strictly positive.
    pub fn new(name: impl Into<String>, weight: f64) -> Result<Self, QueueError> {
        validate_weight(weight)?;
        Ok(Self {
            id: ElementId::new(),
            name: name.into(),
            weight,
            state: ElementState {
                score: 0.0,
                times_served: 0,
                last_computed_at: None,
            },
        })
    }

    /// Element identifier.
    #[must_use]
    pub const fn id(&self) -> ElementId {
        self.id
    }

    /// Display label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Intrinsic importance supplied at creation.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Current score. Zero until the element has been pushed once.
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.state.score
    }

    /// How many times this element has been served and requeued.
    #[must_use]
    pub const fn times_served(&self) -> u64 {
        self.state.times_served
    }

    /// Instant of the last time-based recalculation, if any.
    #[must_use]
    pub const fn last_computed_at(&self) -> Option<Instant> {
        self.state.last_computed_at
    }

    /// Read-only view of the scheduling state.
    #[must_use]
    pub const fn state(&self) -> &ElementState {
        &self.state
    }

    /// Serializable copy of identity and state.
    #[must_use]
    pub fn snapshot(&self) -> ElementSnapshot {
        ElementSnapshot {
            id: self.id,
            name: self.name.clone(),
            weight: self.weight,
            score: self.state.score,
            times_served: self.state.times_served,
        }
    }

    pub(crate) const fn state_mut(&mut self) -> &mut ElementState {
        &mut self.state
    }
}

impl Prioritized for Element {
    fn priority(&self) -> f64 {
        self.state.score
    }
}

impl ElementState {
    /// Current ranking value.
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// Service counter.
    #[must_use]
    pub const fn times_served(&self) -> u64 {
        self.times_served
    }

    /// Instant of the last time-based recalculation.
    #[must_use]
    pub const fn last_computed_at(&self) -> Option<Instant> {
        self.last_computed_at
    }
}

/// Point-in-time copy of an element, safe to hand out after the lock is released.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    /// Element identifier.
    pub id: ElementId,
    /// Display label.
    pub name: String,
    /// Intrinsic weight.
    pub weight: f64,
    /// Score at the time of the snapshot.
    pub score: f64,
    /// Service counter at the time of the snapshot.
    pub times_served: u64,
}

pub(crate) fn validate_weight(weight: f64) -> Result<(), QueueError> {
    if weight.is_finite() && weight > 0.0 {
        Ok(())
    } else {
        Err(QueueError::InvalidWeight(weight))
    }
}
