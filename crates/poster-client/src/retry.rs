//! Retry policy for poster fetches.
//!
//! The policy is a pure function of (attempt number, failure kind), kept
//! separate from the HTTP code so it can be tested without a network:
//! a fetch attempt either gets a backoff delay and another try, or gives up.
//!
//! Transient failures (retryable server statuses, connection-level errors)
//! are retried with exponential backoff; permanent failures (client errors,
//! malformed responses) give up on the first decision and spend none of the
//! retry budget.

use std::time::Duration;

/// Classification of a failed fetch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Worth retrying: 500/502/503/504 or a connection-level failure
    Transient,
    /// Not worth retrying: other statuses, malformed bodies
    Permanent,
}

/// What to do after a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait this long, then try again
    RetryAfter(Duration),
    /// Stop; the caller falls back to its sentinel
    GiveUp,
}

/// Bounded exponential-backoff retry policy
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts allowed, including the first
    max_attempts: u32,

    /// Delay after the first failed attempt; doubles on each further failure
    base_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_backoff,
        }
    }

    /// Total attempts allowed, including the first
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Decide the next step after failed attempt number `attempt` (1-based).
    pub fn decide(&self, attempt: u32, failure: FailureKind) -> RetryDecision {
        match failure {
            FailureKind::Permanent => RetryDecision::GiveUp,
            FailureKind::Transient if attempt >= self.max_attempts => RetryDecision::GiveUp,
            FailureKind::Transient => RetryDecision::RetryAfter(self.backoff(attempt)),
        }
    }

    /// Backoff before attempt `attempt + 1`: base, 2x, 4x, ...
    fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(6);
        self.base_backoff * (1u32 << exponent)
    }
}

impl Default for RetryPolicy {
    /// 5 attempts total, backoff starting at 1s (1s, 2s, 4s, 8s)
    fn default() -> Self {
        Self::new(5, Duration::from_secs(1))
    }
}
