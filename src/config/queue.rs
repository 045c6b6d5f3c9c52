//! Queue configuration structures.

use std::env;

use serde::{Deserialize, Serialize};

use crate::core::{QueueError, StrategyKind};

/// Environment variable selecting the strategy.
pub const ENV_STRATEGY: &str = "FAIR_QUEUE_STRATEGY";
/// Environment variable for the initial heap capacity.
pub const ENV_INITIAL_CAPACITY: &str = "FAIR_QUEUE_INITIAL_CAPACITY";
/// Environment variable for the audit buffer size.
pub const ENV_AUDIT_CAPACITY: &str = "FAIR_QUEUE_AUDIT_CAPACITY";

/// Score strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyConfig {
    /// `weight / elapsed_since(reference)`. Starves low weights; baseline only.
    WallClockDecay,
    /// `weight / (times_served + 1)`.
    #[default]
    UsageDecay,
}

impl From<StrategyConfig> for StrategyKind {
    fn from(cfg: StrategyConfig) -> Self {
        match cfg {
            StrategyConfig::WallClockDecay => Self::WallClockDecay,
            StrategyConfig::UsageDecay => Self::UsageDecay,
        }
    }
}

impl std::str::FromStr for StrategyConfig {
    type Err = QueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "wall_clock_decay" => Ok(Self::WallClockDecay),
            "usage_decay" => Ok(Self::UsageDecay),
            other => Err(QueueError::Config(format!("unknown strategy `{other}`"))),
        }
    }
}

/// Queue configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Score strategy.
    #[serde(default)]
    pub strategy: StrategyConfig,
    /// Elements to reserve room for up front.
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
    /// Attach an in-memory audit sink holding this many events.
    #[serde(default)]
    pub audit_capacity: Option<usize>,
}

const fn default_initial_capacity() -> usize {
    64
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyConfig::default(),
            initial_capacity: default_initial_capacity(),
            audit_capacity: None,
        }
    }
}

impl QueueConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// [`QueueError::Config`] when a value is out of range.
    pub fn validate(&self) -> Result<(), QueueError> {
        if self.audit_capacity == Some(0) {
            return Err(QueueError::Config(
                "audit_capacity must be greater than 0 when set".into(),
            ));
        }
        Ok(())
    }

    /// Parse queue configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// [`QueueError::Config`] on parse or validation failure.
    pub fn from_json_str(input: &str) -> Result<Self, QueueError> {
        let cfg: Self = serde_json::from_str(input)
            .map_err(|e| QueueError::Config(format!("parse error: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from the process environment, loading a `.env`
    /// file first if one exists. Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// [`QueueError::Config`] when a variable is set but malformed.
    pub fn from_env() -> Result<Self, QueueError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// [`QueueError::Config`] when a value is present but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, QueueError> {
        let mut cfg = Self::default();
        if let Some(raw) = lookup(ENV_STRATEGY) {
            cfg.strategy = raw.parse()?;
        }
        if let Some(raw) = lookup(ENV_INITIAL_CAPACITY) {
            cfg.initial_capacity = parse_usize(ENV_INITIAL_CAPACITY, &raw)?;
        }
        if let Some(raw) = lookup(ENV_AUDIT_CAPACITY) {
            cfg.audit_capacity = Some(parse_usize(ENV_AUDIT_CAPACITY, &raw)?);
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn parse_usize(key: &str, raw: &str) -> Result<usize, QueueError> {
    raw.trim()
        .parse()
        .map_err(|e| QueueError::Config(format!("{key}: {e}")))
}
