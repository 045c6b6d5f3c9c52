//! Array-backed binary max-heap.
//!
//! Positions are logically 1-based: the node at position `p` has children at
//! `2p` and `2p + 1` and its parent at `p / 2`. The backing `Vec` is 0-based, so
//! slot `i` holds position `i + 1`.
//!
//! Sift operations only swap when the moving node is *strictly* greater than the
//! node it is compared with. Equal scores never move past each other, and no
//! particular order among ties is promised.
//!
//! ```
//! use prometheus_fair_queue::core::heap::{BinaryMaxHeap, Prioritized};
//!
//! struct Job(f64);
//! impl Prioritized for Job {
//!     fn priority(&self) -> f64 {
//!         self.0
//!     }
//! }
//!
//! let mut heap = BinaryMaxHeap::new();
//! heap.insert(Job(1.0));
//! heap.insert(Job(7.0));
//! heap.insert(Job(3.0));
//! assert_eq!(heap.extract_max().unwrap().0, 7.0);
//! assert_eq!(heap.peek().unwrap().0, 3.0);
//! ```

use crate::core::QueueError;

/// Anything the heap can order.
pub trait Prioritized {
    /// Ordering key; larger comes out first. Must not be NaN.
    fn priority(&self) -> f64;
}

/// Binary max-heap over [`Prioritized`] values.
#[derive(Debug, Clone)]
pub struct BinaryMaxHeap<T> {
    nodes: Vec<T>,
}

impl<T> Default for BinaryMaxHeap<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<T: Prioritized> BinaryMaxHeap<T> {
    /// Create an empty heap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty heap with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Number of stored nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the heap is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append `item` and sift it up. O(log n).
    pub fn insert(&mut self, item: T) {
        self.nodes.push(item);
        self.sift_up(self.nodes.len() - 1);
        debug_assert!(self.is_valid(), "heap invariant broken after insert");
    }

    /// Remove and return the root. O(log n).
    ///
    /// # Errors
    ///
    /// [`QueueError::Empty`] when there is nothing to extract.
    pub fn extract_max(&mut self) -> Result<T, QueueError> {
        if self.nodes.is_empty() {
            return Err(QueueError::Empty);
        }
        // swap_remove moves the last node into the root slot.
        let max = self.nodes.swap_remove(0);
        self.sift_down(0);
        debug_assert!(self.is_valid(), "heap invariant broken after extract");
        Ok(max)
    }

    /// Borrow the root without removing it.
    ///
    /// # Errors
    ///
    /// [`QueueError::Empty`] when the heap has no nodes.
    pub fn peek(&self) -> Result<&T, QueueError> {
        self.nodes.first().ok_or(QueueError::Empty)
    }

    /// Iterate nodes in storage order (not sorted).
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.nodes.iter()
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Consume the heap, returning nodes in storage order.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.nodes
    }

    /// Check that every non-root node scores at most its parent. O(n).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (1..self.nodes.len()).all(|i| {
            let parent = (i - 1) / 2;
            self.nodes[parent].priority() >= self.nodes[i].priority()
        })
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.nodes[idx].priority() > self.nodes[parent].priority() {
                self.nodes.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.nodes.len();
        loop {
            let left = 2 * idx + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.nodes[right].priority() > self.nodes[left].priority()
            {
                right
            } else {
                left
            };
            if self.nodes[idx].priority() < self.nodes[child].priority() {
                self.nodes.swap(idx, child);
                idx = child;
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Node {
        label: &'static str,
        score: f64,
    }

    impl Prioritized for Node {
        fn priority(&self) -> f64 {
            self.score
        }
    }

    fn node(label: &'static str, score: f64) -> Node {
        Node { label, score }
    }

    #[test]
    fn test_empty_heap() {
        let mut heap = BinaryMaxHeap::<Node>::new();
        assert_eq!(heap.len(), 0);
        assert!(heap.is_empty());
        assert_eq!(heap.peek().unwrap_err(), QueueError::Empty);
        assert_eq!(heap.extract_max().unwrap_err(), QueueError::Empty);
        assert_eq!(heap.len(), 0);
    }

    #[test]
    fn test_extracts_in_descending_order() {
        let mut heap = BinaryMaxHeap::new();
        for (label, score) in [("a", 5.0), ("b", 1.0), ("c", 9.0), ("d", 3.0), ("e", 7.0)] {
            heap.insert(node(label, score));
        }
        let order: Vec<_> = std::iter::from_fn(|| heap.extract_max().ok())
            .map(|n| n.label)
            .collect();
        assert_eq!(order, vec!["c", "e", "a", "d", "b"]);
    }

    #[test]
    fn test_peek_does_not_mutate() {
        let mut heap = BinaryMaxHeap::new();
        heap.insert(node("low", 1.0));
        heap.insert(node("high", 2.0));
        assert_eq!(heap.peek().unwrap().label, "high");
        assert_eq!(heap.peek().unwrap().label, "high");
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn test_single_child_sift_down() {
        // After extracting the root from three nodes, the new root has only a left child.
        let mut heap = BinaryMaxHeap::new();
        heap.insert(node("a", 3.0));
        heap.insert(node("b", 1.0));
        heap.insert(node("c", 2.0));
        assert_eq!(heap.extract_max().unwrap().label, "a");
        assert_eq!(heap.extract_max().unwrap().label, "c");
        assert_eq!(heap.extract_max().unwrap().label, "b");
    }

    #[test]
    fn test_equal_scores_do_not_swap_on_insert() {
        let mut heap = BinaryMaxHeap::new();
        heap.insert(node("first", 4.0));
        heap.insert(node("second", 4.0));
        assert_eq!(heap.peek().unwrap().label, "first");
        assert!(heap.is_valid());
    }

    #[test]
    fn test_duplicates_keep_invariant() {
        let mut heap = BinaryMaxHeap::new();
        for score in [2.0, 2.0, 1.0, 2.0, 3.0, 1.0, 3.0] {
            heap.insert(node("x", score));
        }
        let mut last = f64::INFINITY;
        while let Ok(n) = heap.extract_max() {
            assert!(n.score <= last);
            last = n.score;
            assert!(heap.is_valid());
        }
    }

    #[test]
    fn test_is_valid_detects_broken_order() {
        let heap = BinaryMaxHeap {
            nodes: vec![node("root", 1.0), node("child", 5.0)],
        };
        assert!(!heap.is_valid());
    }

    #[test]
    fn test_into_vec_and_clear() {
        let mut heap = BinaryMaxHeap::with_capacity(4);
        heap.insert(node("a", 1.0));
        heap.insert(node("b", 2.0));
        assert_eq!(heap.iter().count(), 2);
        let nodes = heap.clone().into_vec();
        assert_eq!(nodes.len(), 2);
        heap.clear();
        assert!(heap.is_empty());
    }
}
