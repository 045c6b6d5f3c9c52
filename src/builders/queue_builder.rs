//! Builder that turns a [`QueueConfig`] into a ready-to-use queue.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::config::{QueueConfig, StrategyConfig};
use crate::core::{
    FairQueue, QueueError, SharedAuditSink, SharedFairQueue, Strategy, UsageDecay, WallClockDecay,
};
use crate::util::clock::{Clock, SystemClock};

/// Construct [`FairQueue`]s from configuration.
///
/// ```
/// use prometheus_fair_queue::builders::QueueBuilder;
/// use prometheus_fair_queue::config::QueueConfig;
///
/// let mut queue = QueueBuilder::new(QueueConfig::default()).build().unwrap();
/// queue.push(5.0, "svc-a").unwrap();
/// assert_eq!(queue.size(), 1);
/// ```
pub struct QueueBuilder {
    config: QueueConfig,
    reference: Option<Instant>,
    clock: Arc<dyn Clock>,
    audit: Option<SharedAuditSink>,
}

impl QueueBuilder {
    /// Start from `config`, using the system clock.
    #[must_use]
    pub fn new(config: QueueConfig) -> Self {
        let audit = config.audit_capacity.map(SharedAuditSink::new);
        Self {
            config,
            reference: None,
            clock: Arc::new(SystemClock),
            audit,
        }
    }

    /// Fix the wall-clock reference instant. Required when the configured
    /// strategy is `wall_clock_decay`.
    #[must_use]
    pub const fn reference(mut self, reference: Instant) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Read time from `clock` instead of the system clock.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Handle to the audit sink the built queue will record into, if any.
    /// Clone it before calling [`build`](Self::build) to read events later.
    #[must_use]
    pub fn audit_handle(&self) -> Option<SharedAuditSink> {
        self.audit.clone()
    }

    /// Use `sink` for auditing instead of the one created from `audit_capacity`.
    #[must_use]
    pub fn audit_sink(mut self, sink: SharedAuditSink) -> Self {
        self.audit = Some(sink);
        self
    }

    /// Configuration this builder was created with.
    #[must_use]
    pub const fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Build the strategy alone.
    ///
    /// # Errors
    ///
    /// [`QueueError::Config`] when `wall_clock_decay` is configured without a
    /// [`reference`](Self::reference) instant.
    pub fn strategy(&self) -> Result<Strategy, QueueError> {
        match self.config.strategy {
            StrategyConfig::UsageDecay => Ok(UsageDecay.into()),
            StrategyConfig::WallClockDecay => {
                let reference = self.reference.ok_or_else(|| {
                    warn!("wall_clock_decay configured without a reference instant");
                    QueueError::Config("wall_clock_decay requires a reference instant".into())
                })?;
                Ok(WallClockDecay::with_clock(reference, Arc::clone(&self.clock)).into())
            }
        }
    }

    /// Build a single-threaded queue.
    ///
    /// # Errors
    ///
    /// [`QueueError::Config`] when the configuration is invalid or a
    /// wall-clock strategy has no reference instant.
    pub fn build(self) -> Result<FairQueue<Strategy>, QueueError> {
        self.config.validate()?;
        let strategy = self.strategy()?;
        let mut queue = FairQueue::with_capacity(strategy, self.config.initial_capacity);

        if let Some(sink) = self.audit {
            queue = queue.with_audit(Box::new(sink));
        }

        info!(
            strategy = %queue.strategy_kind(),
            initial_capacity = self.config.initial_capacity,
            "fair queue built"
        );
        Ok(queue)
    }

    /// Build a lock-protected queue for concurrent callers.
    ///
    /// # Errors
    ///
    /// [`QueueError::Config`] when the configuration is invalid.
    pub fn build_shared(self) -> Result<SharedFairQueue<Strategy>, QueueError> {
        self.build().map(SharedFairQueue::new)
    }
}
