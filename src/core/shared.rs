//! Thread-safe handle around [`FairQueue`].
//!
//! A single `parking_lot::Mutex` guards the whole queue. Every operation,
//! including the extract/bump/rescore/reinsert sequence of
//! [`pop_and_requeue`](SharedFairQueue::pop_and_requeue), runs under one lock
//! acquisition, so two threads can never serve the same element at once and no
//! thread ever sees an element that is out of the heap mid-requeue.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::strategy::ScoreStrategy;
use crate::core::{Element, ElementId, ElementSnapshot, FairQueue, QueueError};

/// Cloneable, lock-protected fair queue.
pub struct SharedFairQueue<S> {
    inner: Arc<Mutex<FairQueue<S>>>,
}

impl<S> Clone for SharedFairQueue<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ScoreStrategy> SharedFairQueue<S> {
    /// Wrap an existing queue.
    pub fn new(queue: FairQueue<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(queue)),
        }
    }

    /// See [`FairQueue::push`].
    ///
    /// # Errors
    ///
    /// [`QueueError::InvalidWeight`] for non-positive or non-finite weights.
    pub fn push(&self, weight: f64, name: impl Into<String>) -> Result<ElementId, QueueError> {
        // Validate before taking the lock.
        let element = Element::new(name, weight)?;
        Ok(self.inner.lock().push_element(element))
    }

    /// See [`FairQueue::push_element`].
    pub fn push_element(&self, element: Element) -> ElementId {
        self.inner.lock().push_element(element)
    }

    /// See [`FairQueue::pop`].
    ///
    /// # Errors
    ///
    /// [`QueueError::Empty`] when the queue has no elements.
    pub fn pop(&self) -> Result<Element, QueueError> {
        self.inner.lock().pop()
    }

    /// See [`FairQueue::pop_and_requeue`].
    ///
    /// # Errors
    ///
    /// [`QueueError::Empty`] when the queue has no elements.
    pub fn pop_and_requeue(&self) -> Result<ElementSnapshot, QueueError> {
        self.inner.lock().pop_and_requeue()
    }

    /// Copy of the current top element.
    ///
    /// # Errors
    ///
    /// [`QueueError::Empty`] when the queue has no elements.
    pub fn peek(&self) -> Result<ElementSnapshot, QueueError> {
        self.inner.lock().peek().map(Element::snapshot)
    }

    /// Number of stored elements.
    #[must_use]
    pub fn size(&self) -> usize {
        self.inner.lock().size()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Copies of every element.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ElementSnapshot> {
        self.inner.lock().snapshot()
    }

    /// Whether the heap ordering holds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.inner.lock().is_valid()
    }

    /// Run `f` with exclusive access to the underlying queue.
    pub fn with_queue<R>(&self, f: impl FnOnce(&mut FairQueue<S>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<S: ScoreStrategy> From<FairQueue<S>> for SharedFairQueue<S> {
    fn from(queue: FairQueue<S>) -> Self {
        Self::new(queue)
    }
}
