//! Per-connection flood control.

use std::time::{Duration, Instant};

use crate::config::FloodSection;

/// Decision for one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloodDecision {
    Pass,
    Drop,
}

/// Per-connection token bucket (owned by the session task, no mutex).
#[derive(Debug)]
pub struct ConnRateLimiter {
    bucket: TokenBucket,
}

impl ConnRateLimiter {
    pub fn new(rps: u32, burst: u32) -> Self {
        Self {
            bucket: TokenBucket::new(rps, burst, Instant::now()),
        }
    }

    pub fn from_config(cfg: &FloodSection) -> Self {
        Self::new(cfg.rps, cfg.burst)
    }

    pub fn check(&mut self) -> FloodDecision {
        self.check_at(Instant::now())
    }

    pub fn check_at(&mut self, now: Instant) -> FloodDecision {
        if self.bucket.allow(now) {
            FloodDecision::Pass
        } else {
            FloodDecision::Drop
        }
    }
}

#[derive(Debug)]
struct TokenBucket {
    rps: u32,
    capacity: u32,
    tokens: u32,
    last: Instant,
}

impl TokenBucket {
    fn new(rps: u32, burst: u32, now: Instant) -> Self {
        let rps = rps.max(1);
        let capacity = burst.max(1);
        Self {
            rps,
            capacity,
            tokens: capacity,
            last: now,
        }
    }

    fn allow(&mut self, now: Instant) -> bool {
        self.refill(now);

        if self.tokens == 0 {
            return false;
        }
        self.tokens -= 1;
        true
    }

    fn refill(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last);
        if elapsed < Duration::from_millis(50) {
            return;
        }

        let add = (elapsed.as_millis() as u64 * self.rps as u64 / 1000).min(self.capacity as u64) as u32;
        if add > 0 {
            self.tokens = (self.tokens + add).min(self.capacity);
            self.last = now;
        }
    }
}
