//! Assertions over recorded metric emissions.

use sim_service::observability::testing::RecordingBackend;

/// Assert that `metrics` recorded exactly `expected` metric names, in order.
///
/// # Panics
///
/// Panics (fails the test) when the sequences differ.
pub fn assert_emitted(metrics: &RecordingBackend, expected: &[&str]) {
    let actual = metrics.names();
    assert_eq!(
        actual, expected,
        "emission sequence mismatch: got {actual:?}, expected {expected:?}"
    );
}
