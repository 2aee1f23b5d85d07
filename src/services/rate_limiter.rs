//! Per-route-group rate limiting.
//!
//! Fixed-window admission: a window opens at the first request after the
//! previous one expired, and at most `limit` requests are admitted until it
//! closes. Rejections are immediate, nothing is queued. Windows roll over
//! lazily on the next call; there is no background task.
//!
//! ## Policies
//!
//! - `doors` (/lock, /unlock): 1 request per second
//! - `engine` (/engine): 2 requests per minute

use crate::models::action::RouteGroup;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Rate limit policy for one route group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatePolicy {
    /// Maximum requests admitted per window
    pub limit: u32,
    /// Window length
    pub window: Duration,
}

impl RatePolicy {
    /// Create a policy with requests per second.
    pub fn per_second(limit: u32) -> Self {
        Self {
            limit,
            window: Duration::from_secs(1),
        }
    }

    /// Create a policy with requests per minute.
    pub fn per_minute(limit: u32) -> Self {
        Self {
            limit,
            window: Duration::from_secs(60),
        }
    }
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    /// Window exhausted; `retry_after` is the time until it closes.
    Rejected { retry_after: Duration },
}

/// Counter state for one open window.
#[derive(Debug)]
struct FixedWindow {
    policy: RatePolicy,
    window_start: Option<Instant>,
    count: u32,
}

impl FixedWindow {
    fn new(policy: RatePolicy) -> Self {
        Self {
            policy,
            window_start: None,
            count: 0,
        }
    }

    fn admit(&mut self, now: Instant) -> Admission {
        let start = match self.window_start {
            Some(start) if now.saturating_duration_since(start) < self.policy.window => start,
            _ => {
                self.window_start = Some(now);
                self.count = 0;
                now
            }
        };

        if self.count < self.policy.limit {
            self.count += 1;
            Admission::Allowed
        } else {
            let elapsed = now.saturating_duration_since(start);
            Admission::Rejected {
                retry_after: self.policy.window.saturating_sub(elapsed),
            }
        }
    }
}

/// Independent fixed windows for every route group.
#[derive(Debug)]
pub struct RateLimiter {
    doors: Mutex<FixedWindow>,
    engine: Mutex<FixedWindow>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RatePolicy::per_second(1), RatePolicy::per_minute(2))
    }
}

impl RateLimiter {
    pub fn new(doors: RatePolicy, engine: RatePolicy) -> Self {
        Self {
            doors: Mutex::new(FixedWindow::new(doors)),
            engine: Mutex::new(FixedWindow::new(engine)),
        }
    }

    pub fn policy(&self, group: RouteGroup) -> RatePolicy {
        self.window(group)
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .policy
    }

    /// Count a request against `group` if its window has room.
    pub fn admit(&self, group: RouteGroup, now: Instant) -> Admission {
        self.window(group)
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .admit(now)
    }

    fn window(&self, group: RouteGroup) -> &Mutex<FixedWindow> {
        match group {
            RouteGroup::Doors => &self.doors,
            RouteGroup::Engine => &self.engine,
        }
    }
}
