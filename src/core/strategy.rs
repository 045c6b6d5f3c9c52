//! Score recalculation strategies.
//!
//! A strategy is a pure function from an element's current state to a new
//! score. The queue decides *when* to call it (on push and right after a
//! requeue pop); strategies only decide *what* the score is.
//!
//! Two strategies exist:
//!
//! - [`UsageDecay`]: `weight / (times_served + 1)`. Convergence depends only on
//!   how often an element has been served, so every element surfaces eventually
//!   and long-run service share tracks `weight / Σ weight`. Use this one.
//! - [`WallClockDecay`]: `weight / elapsed_since(reference)`. Kept as a
//!   baseline. All scores shrink together, so an element whose weight is 100x
//!   smaller than its neighbour needs roughly 100x more elapsed time before it
//!   can outrank it. With weights spread over several orders of magnitude the
//!   low-weight elements are effectively starved.
//!
//! At the reference instant the wall-clock divisor is [`MIN_ELAPSED`], so any
//! weight above `f64::MAX * 1e-9` would overflow. Such scores saturate at
//! `f64::MAX` and tie with each other until time moves on.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::core::Element;
use crate::util::clock::{Clock, SystemClock};

/// Floor for elapsed time so the wall-clock score stays finite at `t == reference`.
pub const MIN_ELAPSED: Duration = Duration::from_nanos(1);

/// Result of a recalculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    /// New ranking value.
    pub value: f64,
    /// Instant the value was derived at, for time-based strategies.
    pub computed_at: Option<Instant>,
}

/// Identifies a strategy variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// `weight / elapsed_since(reference)`.
    WallClockDecay,
    /// `weight / (times_served + 1)`.
    UsageDecay,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WallClockDecay => f.write_str("wall_clock_decay"),
            Self::UsageDecay => f.write_str("usage_decay"),
        }
    }
}

/// Computes an element's score from its current state.
pub trait ScoreStrategy {
    /// Derive a fresh score for `element`.
    fn compute(&self, element: &Element) -> Score;

    /// Which variant this is.
    fn kind(&self) -> StrategyKind;
}

/// Service-count decay: `weight / (times_served + 1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsageDecay;

impl ScoreStrategy for UsageDecay {
    #[allow(clippy::cast_precision_loss)]
    fn compute(&self, element: &Element) -> Score {
        Score {
            value: element.weight() / (element.times_served() as f64 + 1.0),
            computed_at: None,
        }
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::UsageDecay
    }
}

/// Wall-clock decay: `weight / seconds_since(reference)`.
///
/// The reference instant is a constructor argument so tests can pin it and
/// drive time through a [`ManualClock`](crate::util::clock::ManualClock).
#[derive(Clone)]
pub struct WallClockDecay {
    reference: Instant,
    clock: Arc<dyn Clock>,
}

impl WallClockDecay {
    /// Decay relative to `reference`, reading time from the system clock.
    #[must_use]
    pub fn new(reference: Instant) -> Self {
        Self::with_clock(reference, Arc::new(SystemClock))
    }

    /// Decay relative to `reference`, reading time from `clock`.
    #[must_use]
    pub fn with_clock(reference: Instant, clock: Arc<dyn Clock>) -> Self {
        Self { reference, clock }
    }

    /// The fixed reference instant.
    #[must_use]
    pub const fn reference(&self) -> Instant {
        self.reference
    }

    /// Elapsed time since the reference, floored at [`MIN_ELAPSED`].
    #[must_use]
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.reference).max(MIN_ELAPSED)
    }
}

impl fmt::Debug for WallClockDecay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WallClockDecay")
            .field("reference", &self.reference)
            .finish_non_exhaustive()
    }
}

impl ScoreStrategy for WallClockDecay {
    fn compute(&self, element: &Element) -> Score {
        let now = self.clock.now();
        let value = element.weight() / self.elapsed_at(now).as_secs_f64();
        Score {
            value: value.min(f64::MAX),
            computed_at: Some(now),
        }
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::WallClockDecay
    }
}

/// Runtime-selected strategy, as produced from configuration.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// See [`WallClockDecay`].
    WallClock(WallClockDecay),
    /// See [`UsageDecay`].
    Usage(UsageDecay),
}

impl From<WallClockDecay> for Strategy {
    fn from(s: WallClockDecay) -> Self {
        Self::WallClock(s)
    }
}

impl From<UsageDecay> for Strategy {
    fn from(s: UsageDecay) -> Self {
        Self::Usage(s)
    }
}

impl ScoreStrategy for Strategy {
    fn compute(&self, element: &Element) -> Score {
        match self {
            Self::WallClock(s) => s.compute(element),
            Self::Usage(s) => s.compute(element),
        }
    }

    fn kind(&self) -> StrategyKind {
        match self {
            Self::WallClock(s) => s.kind(),
            Self::Usage(s) => s.kind(),
        }
    }
}
