//! # Prometheus Fair Queue
//!
//! A starvation-free weighted priority queue for serving clients in proportion
//! to their importance.
//!
//! The queue repeatedly selects the highest-scored client, lets the caller
//! serve it, and puts it back with a recalculated score. Clients with larger
//! weights are served more often, but every client is served eventually, no
//! matter how lopsided the weights are.
//!
//! ## Core Problem Solved
//!
//! Ranking entities (repositories, tenants, feeds) by a velocity-like weight and
//! always serving the top one starves everything below it. Decaying the score
//! over wall-clock time fixes starvation only in theory: with weights that differ
//! by 100x, the smaller element needs roughly 100x more elapsed time to catch up.
//! Decaying by *service count* instead converges on weight-proportional service
//! in a handful of rounds.
//!
//! ## Key Features
//!
//! - **Binary Max-Heap**: O(log n) insert and extract with iterative sifts
//! - **Pluggable Scoring**: usage-count decay (recommended) and wall-clock decay (baseline)
//! - **Atomic Requeue**: `pop_and_requeue` bumps, rescores and reinserts in one step
//! - **Thread-Safe Handle**: `SharedFairQueue` guards the whole surface with one lock
//! - **Fairness Reports**: serve N times and compare observed vs. expected share
//!
//! ```rust
//! use prometheus_fair_queue::core::{FairQueue, UsageDecay};
//!
//! let mut queue = FairQueue::new(UsageDecay);
//! queue.push(100.0, "rails/rails").unwrap();
//! queue.push(100.0, "rust-lang/rust").unwrap();
//! queue.push(10.0, "tokio-rs/tokio").unwrap();
//! queue.push(1.0, "sharkdp/bat").unwrap();
//!
//! for _ in 0..1000 {
//!     queue.pop_and_requeue().unwrap();
//! }
//! assert!(queue.iter().all(|el| el.times_served() > 0));
//! ```
//!
//! For construction from configuration, see [`builders::QueueBuilder`].

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core queue abstractions: elements, heap, strategies and the fair queue.
pub mod core;
/// Configuration models for queue construction.
pub mod config;
/// Builders to construct queues from configuration.
pub mod builders;
/// Reference queue implementations.
pub mod infra;
/// Shared utilities.
pub mod util;
