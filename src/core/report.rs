//! Fairness harness: serve a queue N times and histogram who got served.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::scheduler::ScoredQueue;
use crate::core::{ElementId, QueueError};

/// Service tally for one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCount {
    /// Element identifier.
    pub id: ElementId,
    /// Element display name.
    pub name: String,
    /// Element weight.
    pub weight: f64,
    /// Times this element was returned by `pop_and_requeue` during the run.
    pub served: u64,
}

/// Weight value used as a [`ServiceReport::by_weight`] key. Ordered
/// numerically with [`f64::total_cmp`].
#[derive(Debug, Clone, Copy)]
pub struct WeightBucket(pub f64);

impl WeightBucket {
    /// The bucket's weight.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for WeightBucket {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for WeightBucket {}

impl PartialOrd for WeightBucket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WeightBucket {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for WeightBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Outcome of a [`serve`] run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceReport {
    /// Number of `pop_and_requeue` calls made.
    pub iterations: u64,
    /// Per-element tallies, sorted by descending weight then name.
    pub counts: Vec<ServiceCount>,
}

/// Call `pop_and_requeue` `iterations` times and tally the results.
///
/// Elements that are never served still appear in the report with a zero count.
///
/// # Errors
///
/// [`QueueError::Empty`] if the queue is empty and `iterations > 0`.
pub fn serve<Q>(queue: &mut Q, iterations: u64) -> Result<ServiceReport, QueueError>
where
    Q: ScoredQueue + ?Sized,
{
    let mut tally: HashMap<ElementId, ServiceCount> = HashMap::new();
    for _ in 0..iterations {
        let served = queue.pop_and_requeue()?;
        tally
            .entry(served.id)
            .or_insert_with(|| ServiceCount {
                id: served.id,
                name: served.name.clone(),
                weight: served.weight,
                served: 0,
            })
            .served += 1;
    }

    for element in queue.snapshot() {
        tally.entry(element.id).or_insert(ServiceCount {
            id: element.id,
            name: element.name,
            weight: element.weight,
            served: 0,
        });
    }

    let mut counts: Vec<_> = tally.into_values().collect();
    counts.sort_by(|a, b| {
        b.weight
            .total_cmp(&a.weight)
            .then_with(|| a.name.cmp(&b.name))
    });

    let report = ServiceReport { iterations, counts };
    info!(
        iterations,
        elements = report.counts.len(),
        starved = report.starved().len(),
        max_share_error = report.max_share_error(),
        "fairness run complete"
    );
    Ok(report)
}

impl ServiceReport {
    /// Observed fraction of iterations that served `id`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn share(&self, id: ElementId) -> Option<f64> {
        if self.iterations == 0 {
            return None;
        }
        self.count(id).map(|c| c.served as f64 / self.iterations as f64)
    }

    /// Weight-proportional share `w_i / Σ w` for `id`.
    #[must_use]
    pub fn expected_share(&self, id: ElementId) -> Option<f64> {
        let total = self.total_weight();
        self.count(id).map(|c| c.weight / total)
    }

    /// Largest absolute gap between observed and expected share.
    #[must_use]
    pub fn max_share_error(&self) -> f64 {
        self.counts
            .iter()
            .filter_map(|c| Some((self.share(c.id)? - self.expected_share(c.id)?).abs()))
            .fold(0.0, f64::max)
    }

    /// Elements never served during the run.
    #[must_use]
    pub fn starved(&self) -> Vec<&ServiceCount> {
        self.counts.iter().filter(|c| c.served == 0).collect()
    }

    /// Percentage of iterations spent on each weight value, in ascending
    /// weight order. Elements sharing a weight share a bucket.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn by_weight(&self) -> BTreeMap<WeightBucket, f64> {
        let mut buckets: BTreeMap<WeightBucket, u64> = BTreeMap::new();
        for c in &self.counts {
            *buckets.entry(WeightBucket(c.weight)).or_default() += c.served;
        }
        let iterations = self.iterations.max(1) as f64;
        buckets
            .into_iter()
            .map(|(k, served)| (k, served as f64 / iterations * 100.0))
            .collect()
    }

    /// Tally for `id`.
    #[must_use]
    pub fn count(&self, id: ElementId) -> Option<&ServiceCount> {
        self.counts.iter().find(|c| c.id == id)
    }

    /// Pretty JSON rendering of the report.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn total_weight(&self) -> f64 {
        self.counts.iter().map(|c| c.weight).sum()
    }
}
