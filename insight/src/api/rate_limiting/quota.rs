//! Fixed-window quota accounting.
//!
//! Each limiter owns its own [`QuotaStore`]; nothing here is a process-wide
//! singleton, so limiters can be unit tested in isolation and the store
//! could later be swapped for a shared cache without touching call sites.
//!
//! Windows are anchored to the first observation of a key, not to calendar
//! time. A client can therefore burst up to twice the limit across a window
//! boundary; that is an accepted property of fixed-window counting, kept
//! deliberately.

use insight_core::settings::rate_limiting::TierConfig;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Named configuration for one limiter instance.
#[derive(Debug, Clone)]
pub struct RateLimitPolicy {
    pub name: &'static str,
    pub max_requests: u32,
    pub window: Duration,
}

impl RateLimitPolicy {
    pub fn new(name: &'static str, max_requests: u32, window: Duration) -> Self {
        debug_assert!(max_requests > 0);
        debug_assert!(!window.is_zero());
        Self {
            name,
            max_requests,
            window,
        }
    }

    pub fn from_tier(name: &'static str, tier: &TierConfig) -> Self {
        Self::new(name, tier.max_requests, tier.window())
    }
}

/// Per-key counter within the current window.
#[derive(Debug, Clone, Copy)]
struct QuotaRecord {
    window_start: Instant,
    count: u32,
}

/// Outcome of a single admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Admitted,
    Rejected { retry_after: Duration },
}

impl Decision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Decision::Admitted)
    }
}

/// Records with no activity since their window expired are reaped once the
/// map grows past this size; an unexpired window is never evicted.
const EVICTION_THRESHOLD: usize = 10_000;

/// Mutable per-key quota state, serialized under a single lock.
///
/// The lock covers the whole read-check-increment sequence, so two
/// concurrent requests for the last remaining slot can never both be
/// admitted. Contention is negligible at the request rates this service
/// sees; per-key sharding would be the next step if that changes.
#[derive(Debug, Default)]
pub struct QuotaStore {
    records: Mutex<HashMap<String, QuotaRecord>>,
}

impl QuotaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically check-and-count a request for `key` under `policy`.
    pub fn check(&self, policy: &RateLimitPolicy, key: &str, now: Instant) -> Decision {
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if records.len() >= EVICTION_THRESHOLD {
            records.retain(|_, record| now < record.window_start + policy.window);
        }

        let record = records.entry(key.to_string()).or_insert(QuotaRecord {
            window_start: now,
            count: 0,
        });

        // A lapsed window resets to a fresh one anchored at `now`.
        if now >= record.window_start + policy.window {
            record.window_start = now;
            record.count = 0;
        }

        if record.count < policy.max_requests {
            record.count += 1;
            Decision::Admitted
        } else {
            Decision::Rejected {
                retry_after: (record.window_start + policy.window).saturating_duration_since(now),
            }
        }
    }

    /// Number of tracked keys. Test and introspection helper.
    pub fn tracked_keys(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

/// One rate limiter instance: a policy plus its exclusively-owned store.
#[derive(Debug)]
pub struct RateLimiter {
    policy: RateLimitPolicy,
    store: QuotaStore,
    enabled: bool,
}

impl RateLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            policy,
            store: QuotaStore::new(),
            enabled: true,
        }
    }

    /// A limiter that admits everything. Used when rate limiting is
    /// switched off in configuration.
    pub fn disabled(policy: RateLimitPolicy) -> Self {
        Self {
            policy,
            store: QuotaStore::new(),
            enabled: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.policy.name
    }

    pub fn check(&self, key: &str) -> Decision {
        self.check_at(key, Instant::now())
    }

    /// Admission check against an explicit clock. The test seam for window
    /// arithmetic.
    pub fn check_at(&self, key: &str, now: Instant) -> Decision {
        if !self.enabled {
            return Decision::Admitted;
        }
        self.store.check(&self.policy, key, now)
    }
}
