//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use std::time::{Duration, Instant};

use etl_monitor::graph::FilterTransitions;
use etl_monitor::ProcessFilter;

/// Upper bound for waiting on timer-driven state
pub fn test_timeout() -> Duration {
    Duration::from_secs(2)
}

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f32, b: f32, epsilon: f32) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Poll until every pending transition has fired, collecting them in order
pub fn drain_transitions(transitions: &mut FilterTransitions) -> Vec<ProcessFilter> {
    let deadline = Instant::now() + test_timeout();
    let mut applied = Vec::new();
    while transitions.is_active() && Instant::now() < deadline {
        applied.extend(transitions.poll());
        std::thread::sleep(Duration::from_millis(2));
    }
    applied
}
