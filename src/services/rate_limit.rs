//! Shared request rate budget
//!
//! Explicit token bucket passed by reference into the market-data
//! cache: at most `capacity` requests inside any rolling `window`,
//! shared across every pair and timeframe. Acquisition is
//! check-and-decrement under one lock; waiting callers sleep on the
//! tokio clock instead of spinning, so paused-time tests stay
//! deterministic.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

pub struct RateBudget {
    capacity: usize,
    window: Duration,
    stamps: Mutex<VecDeque<Instant>>,
}

impl RateBudget {
    pub fn new(capacity: usize, window: Duration) -> Self {
        Self {
            capacity,
            window,
            stamps: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Take one token now, or return how long until one frees up.
    pub async fn try_acquire(&self) -> Result<(), Duration> {
        let mut stamps = self.stamps.lock().await;
        let now = Instant::now();

        while let Some(front) = stamps.front() {
            if *front + self.window <= now {
                stamps.pop_front();
            } else {
                break;
            }
        }

        if stamps.len() < self.capacity {
            stamps.push_back(now);
            return Ok(());
        }

        // Oldest in-window request determines when a slot frees.
        let retry_after = stamps
            .front()
            .map(|front| *front + self.window - now)
            .unwrap_or(self.window);
        Err(retry_after)
    }

    /// Wait for a token, giving up once the wait would exceed
    /// `max_wait`. The final error carries the backoff hint.
    pub async fn acquire_within(&self, max_wait: Duration) -> Result<(), Duration> {
        let deadline = Instant::now() + max_wait;
        loop {
            match self.try_acquire().await {
                Ok(()) => return Ok(()),
                Err(retry_after) => {
                    if Instant::now() + retry_after > deadline {
                        return Err(retry_after);
                    }
                    tokio::time::sleep(retry_after).await;
                }
            }
        }
    }
}
