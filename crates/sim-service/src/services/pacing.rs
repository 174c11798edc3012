//! Injectable delay source standing in for real processing time.

use std::ops::Range;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

/// A pause in a simulated flow. The caller either supplies an explicit
/// duration in milliseconds, or passes 0 to get a randomized one drawn from
/// the flow's fallback range.
#[async_trait]
pub trait DelaySource: Send + Sync {
    async fn pause(&self, requested_ms: u64, fallback_ms: Range<u64>);
}

/// Production delay source: real sleeps, randomized fallback.
pub struct RandomDelay;

#[async_trait]
impl DelaySource for RandomDelay {
    async fn pause(&self, requested_ms: u64, fallback_ms: Range<u64>) {
        let ms = if requested_ms > 0 {
            requested_ms
        } else {
            rand::thread_rng().gen_range(fallback_ms)
        };
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

/// Test delay source: returns immediately so flow tests are deterministic.
#[cfg(any(test, feature = "test-utils"))]
pub struct NoDelay;

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl DelaySource for NoDelay {
    async fn pause(&self, _requested_ms: u64, _fallback_ms: Range<u64>) {}
}
