//! Configuration models for queue construction.

pub mod queue;

pub use queue::{QueueConfig, StrategyConfig};
