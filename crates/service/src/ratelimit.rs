//! Per-account rate limiting for generation requests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use pathway_core::{AccountId, DomainError};
use tracing::warn;

/// Sliding-window limiter: at most `max_requests` per account within
/// `window`. Exceeding it yields `RateLimited`, which callers treat as
/// retryable after the carried delay.
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    hits: Mutex<HashMap<AccountId, Vec<Instant>>>,
}

impl RateLimiter {
    /// Create a limiter.
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Default budget for generation: 5 requests per minute.
    pub fn generation_default() -> Self {
        Self::new(5, Duration::from_secs(60))
    }

    /// Record a hit for `account`, or reject it if the window is full.
    pub fn check(&self, account: AccountId) -> Result<(), DomainError> {
        let now = Instant::now();
        let mut hits = self.hits.lock().unwrap_or_else(|e| e.into_inner());
        let timestamps = hits.entry(account).or_default();
        timestamps.retain(|t| now.duration_since(*t) < self.window);

        if timestamps.len() >= self.max_requests {
            let oldest = timestamps[0];
            let retry_after = self.window.saturating_sub(now.duration_since(oldest));
            warn!(%account, "rate limit exceeded");
            return Err(DomainError::RateLimited {
                retry_after_secs: retry_after.as_secs().max(1),
            });
        }

        timestamps.push(now);
        Ok(())
    }
}
