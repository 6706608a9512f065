//! Fixed-window rate limiting for registration attempts.
//!
//! Each client identifier owns one window entry. Inside a window at most
//! `max_requests` attempts are allowed; the first attempt after the window
//! has elapsed starts a fresh window instead of incrementing. Bursts of up to
//! `2 * max_requests` across a window seam are accepted.
//!
//! State is process-local and is never pruned; a restart clears it.

use chrono::{DateTime, Duration, Utc};
use dashmap::{mapref::entry::Entry, DashMap};

/// Default number of attempts allowed per window.
pub const DEFAULT_MAX_REQUESTS: u32 = 3;

/// Default window length in seconds (10 minutes).
pub const DEFAULT_WINDOW_SECS: i64 = 600;

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Rejected,
}

impl RateDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, RateDecision::Allowed)
    }
}

/// Key-value store of rate-limit windows.
///
/// Implementations must make `check_and_consume` atomic per client so that
/// concurrent callers cannot push a client past its limit.
pub trait RateLimitStore: Send + Sync {
    /// Check the client's window and, if allowed, count this attempt.
    fn check_and_consume(&self, client_id: &str, now: DateTime<Utc>) -> RateDecision;

    /// Time left until a rejected client may try again, or `None` if it is not limited.
    fn retry_after(&self, client_id: &str, now: DateTime<Utc>) -> Option<Duration>;
}

#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: u32,
    window_start: DateTime<Utc>,
}

impl WindowEntry {
    fn start(now: DateTime<Utc>) -> Self {
        Self {
            count: 1,
            window_start: now,
        }
    }
}

/// In-memory fixed-window limiter keyed by client identifier.
pub struct FixedWindowRateLimiter {
    entries: DashMap<String, WindowEntry>,
    max_requests: u32,
    window: Duration,
}

impl FixedWindowRateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            max_requests,
            window,
        }
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Number of client identifiers seen since the process started.
    pub fn tracked_clients(&self) -> usize {
        self.entries.len()
    }

    fn expired(&self, entry: &WindowEntry, now: DateTime<Utc>) -> bool {
        now - entry.window_start >= self.window
    }
}

impl Default for FixedWindowRateLimiter {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_REQUESTS,
            Duration::seconds(DEFAULT_WINDOW_SECS),
        )
    }
}

impl RateLimitStore for FixedWindowRateLimiter {
    fn check_and_consume(&self, client_id: &str, now: DateTime<Utc>) -> RateDecision {
        // The entry guard holds the shard lock for the whole read-modify-write.
        match self.entries.entry(client_id.to_string()) {
            Entry::Vacant(vacant) => {
                vacant.insert(WindowEntry::start(now));
                RateDecision::Allowed
            }
            Entry::Occupied(mut occupied) => {
                let expired = self.expired(occupied.get(), now);
                let entry = occupied.get_mut();
                if expired {
                    *entry = WindowEntry::start(now);
                    RateDecision::Allowed
                } else if entry.count >= self.max_requests {
                    RateDecision::Rejected
                } else {
                    entry.count += 1;
                    RateDecision::Allowed
                }
            }
        }
    }

    fn retry_after(&self, client_id: &str, now: DateTime<Utc>) -> Option<Duration> {
        let entry = self.entries.get(client_id)?;
        if self.expired(&entry, now) || entry.count < self.max_requests {
            return None;
        }
        Some(entry.window_start + self.window - now)
    }
}

impl std::fmt::Debug for FixedWindowRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedWindowRateLimiter")
            .field("max_requests", &self.max_requests)
            .field("window_secs", &self.window.num_seconds())
            .field("tracked_clients", &self.entries.len())
            .finish()
    }
}
