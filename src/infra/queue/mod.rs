//! Queue backends other than the heap-backed [`FairQueue`](crate::core::FairQueue).

pub mod resort;

pub use resort::ResortQueue;
