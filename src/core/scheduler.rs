//! The fair queue: a max-heap of elements plus the strategy that scores them.
//!
//! Scores are recalculated in exactly two places:
//!
//! 1. when an element is pushed, and
//! 2. inside [`FairQueue::pop_and_requeue`], right after the served element's
//!    counter is bumped and before it goes back into the heap.
//!
//! [`FairQueue::pop`] and [`FairQueue::peek`] never touch scores.

use std::fmt;

use tracing::{debug, warn};

use crate::core::audit::{build_audit_event, AuditAction, AuditSink};
use crate::core::heap::BinaryMaxHeap;
use crate::core::strategy::{ScoreStrategy, StrategyKind};
use crate::core::{Element, ElementId, ElementSnapshot, QueueError};

/// Common surface of queue implementations, so the heap-backed queue and the
/// full-resort reference queue can be driven by the same harness.
pub trait ScoredQueue {
    /// Score `element` and insert it.
    fn push_element(&mut self, element: Element) -> ElementId;
    /// Remove the highest-scored element permanently.
    ///
    /// # Errors
    ///
    /// [`QueueError::Empty`] when the queue has no elements.
    fn pop(&mut self) -> Result<Element, QueueError>;
    /// Serve the highest-scored element and put it back with a new score.
    ///
    /// # Errors
    ///
    /// [`QueueError::Empty`] when the queue has no elements.
    fn pop_and_requeue(&mut self) -> Result<ElementSnapshot, QueueError>;
    /// Highest-scored element, without mutation.
    ///
    /// # Errors
    ///
    /// [`QueueError::Empty`] when the queue has no elements.
    fn peek(&self) -> Result<&Element, QueueError>;
    /// Number of stored elements.
    fn len(&self) -> usize;
    /// Copies of every stored element, in no particular order.
    fn snapshot(&self) -> Vec<ElementSnapshot>;
    /// Whether the queue is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Heap-backed priority queue that keeps every element reachable.
///
/// ```
/// use prometheus_fair_queue::core::{FairQueue, UsageDecay};
///
/// let mut queue = FairQueue::new(UsageDecay);
/// queue.push(100.0, "A").unwrap();
/// queue.push(10.0, "B").unwrap();
///
/// let served = queue.pop_and_requeue().unwrap();
/// assert_eq!(served.name, "A");
/// assert_eq!(served.times_served, 1);
/// assert_eq!(served.score, 50.0);
/// assert_eq!(queue.size(), 2);
/// ```
pub struct FairQueue<S> {
    heap: BinaryMaxHeap<Element>,
    strategy: S,
    audit: Option<Box<dyn AuditSink>>,
}

impl<S: ScoreStrategy> FairQueue<S> {
    /// Create an empty queue scored by `strategy`.
    pub fn new(strategy: S) -> Self {
        Self::with_capacity(strategy, 0)
    }

    /// Create an empty queue with room for `capacity` elements.
    pub fn with_capacity(strategy: S, capacity: usize) -> Self {
        Self {
            heap: BinaryMaxHeap::with_capacity(capacity),
            strategy,
            audit: None,
        }
    }

    /// Attach an audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Box<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Create an element from `weight` and `name`, score it and insert it.
    ///
    /// # Errors
    ///
    /// [`QueueError::InvalidWeight`] unless `weight` is finite and positive.
    pub fn push(&mut self, weight: f64, name: impl Into<String>) -> Result<ElementId, QueueError> {
        let element = Element::new(name, weight).inspect_err(|_| {
            warn!(weight, "rejected element with invalid weight");
        })?;
        Ok(self.push_element(element))
    }

    /// Score an existing element and insert it.
    pub fn push_element(&mut self, mut element: Element) -> ElementId {
        self.rescore(&mut element);
        let id = element.id();
        debug!(%id, name = element.name(), score = element.score(), "element pushed");
        self.record(&element, AuditAction::Push);
        self.heap.insert(element);
        id
    }

    /// Remove the highest-scored element for good. No rescoring happens.
    ///
    /// # Errors
    ///
    /// [`QueueError::Empty`] when the queue has no elements.
    pub fn pop(&mut self) -> Result<Element, QueueError> {
        let element = self.heap.extract_max()?;
        debug!(id = %element.id(), name = element.name(), "element popped");
        self.record(&element, AuditAction::Pop);
        Ok(element)
    }

    /// Serve the highest-scored element: bump its counter, rescore it and
    /// reinsert it. Returns the element as it was reinserted.
    ///
    /// # Errors
    ///
    /// [`QueueError::Empty`] when the queue has no elements.
    pub fn pop_and_requeue(&mut self) -> Result<ElementSnapshot, QueueError> {
        let mut element = self.heap.extract_max()?;
        element.state_mut().times_served += 1;
        self.rescore(&mut element);
        let served = element.snapshot();
        debug!(
            id = %served.id,
            name = %served.name,
            times_served = served.times_served,
            score = served.score,
            "element served and requeued"
        );
        self.record(&element, AuditAction::Requeue);
        self.heap.insert(element);
        Ok(served)
    }

    /// Highest-scored element, without mutation.
    ///
    /// # Errors
    ///
    /// [`QueueError::Empty`] when the queue has no elements.
    pub fn peek(&self) -> Result<&Element, QueueError> {
        self.heap.peek()
    }

    /// Number of stored elements.
    #[must_use]
    pub fn size(&self) -> usize {
        self.heap.len()
    }

    /// Alias for [`size`](Self::size).
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Look up an element by id. O(n).
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.heap.iter().find(|el| el.id() == id)
    }

    /// Iterate elements in heap storage order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.heap.iter()
    }

    /// Copies of every element, in heap storage order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ElementSnapshot> {
        self.heap.iter().map(Element::snapshot).collect()
    }

    /// Active strategy.
    pub const fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Which strategy variant scores this queue.
    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// Whether the heap ordering holds. O(n).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.heap.is_valid()
    }

    fn rescore(&self, element: &mut Element) {
        let score = self.strategy.compute(element);
        assert!(
            !score.value.is_nan(),
            "{} produced a NaN score for {}",
            self.strategy.kind(),
            element.id()
        );
        let state = element.state_mut();
        state.score = score.value;
        if score.computed_at.is_some() {
            state.last_computed_at = score.computed_at;
        }
    }

    fn record(&mut self, element: &Element, action: AuditAction) {
        if let Some(audit) = self.audit.as_mut() {
            audit.record(build_audit_event(element, action));
        }
    }
}

impl<S: ScoreStrategy> ScoredQueue for FairQueue<S> {
    fn push_element(&mut self, element: Element) -> ElementId {
        Self::push_element(self, element)
    }

    fn pop(&mut self) -> Result<Element, QueueError> {
        Self::pop(self)
    }

    fn pop_and_requeue(&mut self) -> Result<ElementSnapshot, QueueError> {
        Self::pop_and_requeue(self)
    }

    fn peek(&self) -> Result<&Element, QueueError> {
        Self::peek(self)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn snapshot(&self) -> Vec<ElementSnapshot> {
        Self::snapshot(self)
    }
}

impl<S: fmt::Debug> fmt::Debug for FairQueue<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FairQueue")
            .field("len", &self.heap.len())
            .field("strategy", &self.strategy)
            .field("audit", &self.audit.is_some())
            .finish()
    }
}
