//! Fixed-window rate limiting keyed by client address.
//!
//! One entry per distinct client key, created lazily on first request. The
//! window starts at the first request after expiry rather than at wall-clock
//! hour boundaries, and the retry hint counts down to `window_start + window`.
//! The caller supplies `now` so tests can drive the clock.
//!
//! Entries are held in a `DashMap`: concurrent checks for the same key are
//! serialized by the entry lock, checks for different keys do not contend.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Admitted,
    Rejected { retry_after_seconds: u64 },
}

impl Decision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Decision::Admitted)
    }
}

/// Per-client request counter for the current window.
#[derive(Debug)]
struct Entry {
    window_start: Instant,
    count: u32,
}

/// Expired entries are swept every this many checks, bounding map growth
/// under address churn without a background task.
const PURGE_INTERVAL: u64 = 4096;

/// Fixed-window limiter over per-client entries.
#[derive(Debug)]
pub struct RateLimiter {
    entries: DashMap<String, Entry>,
    limit: u32,
    window: Duration,
    checks: AtomicU64,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            limit,
            window,
            checks: AtomicU64::new(0),
        }
    }

    /// Counts a request against `client_key` and decides admission.
    ///
    /// The increment happens on every call, admitted or rejected, so a
    /// client hammering past the limit keeps consuming its window.
    pub fn check_and_increment(&self, client_key: &str, now: Instant) -> Decision {
        self.maybe_purge(now);

        let mut entry = self
            .entries
            .entry(client_key.to_string())
            .or_insert_with(|| Entry {
                window_start: now,
                count: 0,
            });

        if now.duration_since(entry.window_start) >= self.window {
            entry.window_start = now;
            entry.count = 0;
        }

        entry.count += 1;
        if entry.count > self.limit {
            let remaining = self
                .window
                .saturating_sub(now.duration_since(entry.window_start));
            Decision::Rejected {
                retry_after_seconds: remaining.as_secs(),
            }
        } else {
            Decision::Admitted
        }
    }

    /// Lazy sweep of entries whose window has fully elapsed.
    fn maybe_purge(&self, now: Instant) {
        let checks = self.checks.fetch_add(1, Ordering::Relaxed) + 1;
        if checks % PURGE_INTERVAL != 0 {
            return;
        }
        self.entries
            .retain(|_, entry| now.duration_since(entry.window_start) < self.window);
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.entries.len()
    }
}
