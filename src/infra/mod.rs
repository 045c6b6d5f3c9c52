//! Infrastructure adapters: reference queue implementations.

pub mod queue;
pub use queue::ResortQueue;
