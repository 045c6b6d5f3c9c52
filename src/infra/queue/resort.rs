//! Full-resort reference queue.
//!
//! Keeps elements in a plain `Vec` and sorts it on every removal, so `pop` is
//! O(n log n). It exists to cross-check [`FairQueue`](crate::core::FairQueue)
//! and as the baseline in benchmarks; do not use it for real scheduling.

use crate::core::strategy::ScoreStrategy;
use crate::core::{Element, ElementId, ElementSnapshot, QueueError, ScoredQueue};

/// Queue that re-sorts its backing vector before every removal.
#[derive(Debug)]
pub struct ResortQueue<S> {
    elements: Vec<Element>,
    strategy: S,
}

impl<S: ScoreStrategy> ResortQueue<S> {
    /// Create an empty queue scored by `strategy`.
    pub const fn new(strategy: S) -> Self {
        Self {
            elements: Vec::new(),
            strategy,
        }
    }

    /// Create an element from `weight` and `name` and insert it.
    ///
    /// # Errors
    ///
    /// [`QueueError::InvalidWeight`] unless `weight` is finite and positive.
    pub fn push(&mut self, weight: f64, name: impl Into<String>) -> Result<ElementId, QueueError> {
        let element = Element::new(name, weight)?;
        Ok(self.push_element(element))
    }

    fn rescore(&self, element: &mut Element) {
        let score = self.strategy.compute(element);
        let state = element.state_mut();
        state.score = score.value;
        if score.computed_at.is_some() {
            state.last_computed_at = score.computed_at;
        }
    }

    /// Sort ascending so the maximum sits at the end. Stable, so ties keep
    /// insertion order.
    fn sort(&mut self) {
        self.elements.sort_by(|a, b| a.score().total_cmp(&b.score()));
    }
}

impl<S: ScoreStrategy> ScoredQueue for ResortQueue<S> {
    fn push_element(&mut self, mut element: Element) -> ElementId {
        self.rescore(&mut element);
        let id = element.id();
        self.elements.push(element);
        id
    }

    fn pop(&mut self) -> Result<Element, QueueError> {
        self.sort();
        self.elements.pop().ok_or(QueueError::Empty)
    }

    fn pop_and_requeue(&mut self) -> Result<ElementSnapshot, QueueError> {
        let mut element = ScoredQueue::pop(self)?;
        element.state_mut().times_served += 1;
        self.rescore(&mut element);
        let served = element.snapshot();
        self.elements.push(element);
        Ok(served)
    }

    fn peek(&self) -> Result<&Element, QueueError> {
        // max_by keeps the last of equal maxima, which is what the stable
        // sort in `pop` leaves at the end.
        self.elements
            .iter()
            .max_by(|a, b| a.score().total_cmp(&b.score()))
            .ok_or(QueueError::Empty)
    }

    fn len(&self) -> usize {
        self.elements.len()
    }

    fn snapshot(&self) -> Vec<ElementSnapshot> {
        self.elements.iter().map(Element::snapshot).collect()
    }
}
