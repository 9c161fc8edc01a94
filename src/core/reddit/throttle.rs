//! Minimum-interval throttle for outbound upstream requests.
//!
//! Every caller of [`Throttle::acquire`] is serialized behind an async mutex
//! that guards the instant of the last permitted request. The read-wait-write
//! sequence happens while the guard is held, so two callers can never be
//! released within the same interval. Waiting is a timer sleep: only callers
//! contending on the same throttle are suspended.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};
use tracing::debug;

/// Serializes callers so that consecutive releases are at least `interval` apart.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Throttle {
    /// Create a throttle that has not released anyone yet.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: Mutex::new(None),
        }
    }

    /// The configured minimum interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until the caller may proceed, then record and return the release instant.
    ///
    /// The tokio mutex queues waiters in FIFO order, so callers are released
    /// in arrival order.
    pub async fn acquire(&self) -> Instant {
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let ready_at = previous + self.interval;
            if Instant::now() < ready_at {
                debug!(
                    "Throttling upstream request for {:?}",
                    ready_at.saturating_duration_since(Instant::now())
                );
                sleep_until(ready_at).await;
            }
        }

        let now = Instant::now();
        *last = Some(now);
        now
    }
}
