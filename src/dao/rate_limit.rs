use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::constants::MAX_RATE_WINDOW;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRecord {
    pub count: u32,
    pub window_reset_at: Instant,
}

struct Records {
    by_identity: HashMap<String, RateLimitRecord>,
    next_sweep_at: Instant,
}

/// Fixed-window admission per client identity.
///
/// Check and increment happen under one lock, so concurrent requests from the
/// same identity can never be admitted past the limit. Expired records are
/// swept at most once per window, during an `admit` call.
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    records: Mutex<Records>,
}

impl RateLimiter {
    /// Windows longer than a day are clamped so deadlines never overflow `Instant`.
    pub fn new(limit: u32, window: Duration) -> Self {
        if window > MAX_RATE_WINDOW {
            warn!(?window, max = ?MAX_RATE_WINDOW, "rate window too long, clamping");
        }
        let window = window.min(MAX_RATE_WINDOW);
        Self {
            limit,
            window,
            records: Mutex::new(Records {
                by_identity: HashMap::new(),
                next_sweep_at: Instant::now() + window,
            }),
        }
    }

    pub fn admit(&self, identity: &str) -> bool {
        self.admit_at(identity, Instant::now())
    }

    pub fn admit_at(&self, identity: &str, now: Instant) -> bool {
        let mut records = self.lock();
        if now >= records.next_sweep_at {
            let before = records.by_identity.len();
            records.by_identity.retain(|_, r| now <= r.window_reset_at);
            records.next_sweep_at = now + self.window;
            debug!(evicted = before - records.by_identity.len(), "swept rate limit records");
        }

        if let Some(r) = records.by_identity.get_mut(identity) {
            if now <= r.window_reset_at {
                if r.count >= self.limit {
                    return false;
                }
                r.count += 1;
                return true;
            }
        }
        records.by_identity.insert(
            identity.to_string(),
            RateLimitRecord {
                count: 1,
                window_reset_at: now + self.window,
            },
        );
        true
    }

    pub fn record(&self, identity: &str) -> Option<RateLimitRecord> {
        self.lock().by_identity.get(identity).copied()
    }

    pub fn tracked_identities(&self) -> usize {
        self.lock().by_identity.len()
    }

    fn lock(&self) -> MutexGuard<'_, Records> {
        // nothing inside the critical section can panic halfway through an update
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}
