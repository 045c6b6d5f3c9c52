//! Tests for utility functions

use std::sync::Arc;
use std::time::Duration;

use prometheus_fair_queue::util::{init_tracing, now_ms, Clock, ManualClock, SystemClock};

#[test]
fn test_manual_clock_shared_across_handles() {
    let clock = Arc::new(ManualClock::new());
    let reader: Arc<dyn Clock> = clock.clone();
    let start = reader.now();
    clock.advance(Duration::from_secs(3));
    assert_eq!(reader.now() - start, Duration::from_secs(3));
}

#[test]
fn test_system_clock_advances() {
    let clock = SystemClock;
    let a = clock.now();
    std::thread::sleep(Duration::from_millis(2));
    assert!(clock.now() > a);
}

#[test]
fn test_now_ms_monotonic_enough() {
    let a = now_ms();
    let b = now_ms();
    assert!(b >= a);
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}
