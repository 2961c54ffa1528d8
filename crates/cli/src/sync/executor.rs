// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Retry layer for destination mutations.
//!
//! [`ReliableExecutor`] wraps a [`DestTracker`] and keeps re-issuing each
//! call until it succeeds. Rate limits wait out the server's own hint;
//! everything else backs off briefly and tries again. The only way a call
//! fails through this layer is the optional cap on permanent errors.

use crate::sync::dest::{DestError, DestTracker};

/// Sleeping seam so tests can observe waits instead of serving them.
pub trait Waiter {
    fn wait(&mut self, seconds: u64);
}

/// Production waiter backed by the OS clock.
#[derive(Debug, Default)]
pub struct SystemWaiter;

impl Waiter for SystemWaiter {
    fn wait(&mut self, seconds: u64) {
        std::thread::sleep(std::time::Duration::from_secs(seconds));
    }
}

/// Knobs for the retry loop.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Wait when the server rate limits us without saying for how long.
    pub rate_limit_fallback_secs: u64,
    /// Wait between retries of ordinary failures.
    pub error_delay_secs: u64,
    /// Give up after this many permanent failures of one call, if set.
    pub max_permanent_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            rate_limit_fallback_secs: 100,
            error_delay_secs: 5,
            max_permanent_attempts: None,
        }
    }
}

/// A [`DestTracker`] that retries until the call lands.
pub struct ReliableExecutor<D, W = SystemWaiter> {
    dest: D,
    waiter: W,
    policy: RetryPolicy,
}

impl<D: DestTracker> ReliableExecutor<D, SystemWaiter> {
    pub fn new(dest: D, policy: RetryPolicy) -> Self {
        ReliableExecutor {
            dest,
            waiter: SystemWaiter,
            policy,
        }
    }
}

impl<D: DestTracker, W: Waiter> ReliableExecutor<D, W> {
    #[cfg(test)]
    pub fn with_waiter(dest: D, policy: RetryPolicy, waiter: W) -> Self {
        ReliableExecutor {
            dest,
            waiter,
            policy,
        }
    }

    /// Issue `call` until it succeeds.
    ///
    /// Rate limits never count against the permanent-failure cap; a mirror
    /// run is expected to park on them for as long as the server asks.
    fn demand<T, F>(&mut self, what: &str, mut call: F) -> Result<T, DestError>
    where
        F: FnMut(&mut D) -> Result<T, DestError>,
    {
        let mut permanent_failures = 0u32;
        loop {
            let delay = match call(&mut self.dest) {
                Ok(value) => return Ok(value),
                Err(DestError::RateLimited { retry_after }) => {
                    let seconds = retry_after.unwrap_or(self.policy.rate_limit_fallback_secs);
                    tracing::warn!("{} was rate limited, waiting {}s", what, seconds);
                    seconds
                }
                Err(other) => {
                    if is_permanent(&other) {
                        permanent_failures += 1;
                        if let Some(max) = self.policy.max_permanent_attempts {
                            if permanent_failures >= max {
                                return Err(other);
                            }
                        }
                    }
                    tracing::warn!(
                        "{} failed: {}, retrying in {}s",
                        what,
                        other,
                        self.policy.error_delay_secs
                    );
                    self.policy.error_delay_secs
                }
            };
            self.pause(delay);
        }
    }

    /// Sleep `seconds` in short slices, logging the countdown.
    ///
    /// Slicing keeps the process responsive to Ctrl-C during long
    /// rate-limit waits and gives the operator a live countdown.
    fn pause(&mut self, seconds: u64) {
        let chunk = seconds.div_ceil(20).clamp(1, 5);
        let mut remaining = seconds;
        while remaining > 0 {
            let step = chunk.min(remaining);
            tracing::info!("retrying in {}s", remaining);
            self.waiter.wait(step);
            remaining -= step;
        }
    }
}

/// Whether retrying this error verbatim can ever change the answer.
///
/// Client errors are permanent except the two statuses GitHub also uses
/// for rate limiting. Server errors and transport noise are transient.
fn is_permanent(error: &DestError) -> bool {
    matches!(
        error,
        DestError::Api { status, .. }
            if (400..500).contains(status) && *status != 403 && *status != 429
    )
}

impl<D: DestTracker, W: Waiter> DestTracker for ReliableExecutor<D, W> {
    fn create_issue(
        &mut self,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> Result<u64, DestError> {
        self.demand("create issue", |dest| dest.create_issue(title, body, labels))
    }

    fn update_issue(
        &mut self,
        number: u64,
        title: &str,
        body: &str,
        open: bool,
        labels: &[String],
    ) -> Result<(), DestError> {
        self.demand("update issue", |dest| {
            dest.update_issue(number, title, body, open, labels)
        })
    }

    fn lock_issue(&mut self, number: u64) -> Result<(), DestError> {
        self.demand("lock issue", |dest| dest.lock_issue(number))
    }

    fn create_comment(&mut self, number: u64, body: &str) -> Result<u64, DestError> {
        self.demand("create comment", |dest| dest.create_comment(number, body))
    }

    fn update_comment(&mut self, comment_id: u64, body: &str) -> Result<(), DestError> {
        self.demand("update comment", |dest| dest.update_comment(comment_id, body))
    }

    fn delete_comment(&mut self, comment_id: u64) -> Result<(), DestError> {
        self.demand("delete comment", |dest| dest.delete_comment(comment_id))
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
