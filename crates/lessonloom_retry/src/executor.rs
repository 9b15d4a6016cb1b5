//! Rate-limit-only retry with exponential backoff, on tokio-retry2.

use crate::RateLimiter;
use derive_getters::Getters;
use lessonloom_error::RetryableError;
use std::future::Future;
use std::time::Duration;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, warn};

/// Retry budget and initial backoff for one call site.
///
/// # Examples
///
/// ```
/// use lessonloom_retry::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(*policy.retries(), 3);
/// let delays: Vec<_> = policy.delays().collect();
/// assert_eq!(
///     delays,
///     [2000, 4000, 8000].map(Duration::from_millis)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct RetryPolicy {
    /// Additional attempts after the first
    retries: u32,
    /// Wait before the first retry; doubles after every retry
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            base_delay: Duration::from_millis(2000),
        }
    }
}

impl RetryPolicy {
    /// A policy with the given budget and initial delay.
    pub fn new(retries: u32, base_delay: Duration) -> Self {
        Self {
            retries,
            base_delay,
        }
    }

    /// The same policy with a different retry budget.
    pub fn with_retries(self, retries: u32) -> Self {
        Self { retries, ..self }
    }

    /// The waits that precede each retry, in order.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let mut delay = self.base_delay;
        (0..self.retries).map(move |_| {
            let current = delay;
            delay = delay.saturating_mul(2);
            current
        })
    }
}

/// Runs remote operations, retrying rate-limit failures.
///
/// Only errors whose [`RetryableError::is_rate_limited`] is true are retried.
/// Any other error, or a rate-limit error once the budget is spent, is
/// returned unchanged.
#[derive(Debug, Clone, Default)]
pub struct RetryExecutor {
    policy: RetryPolicy,
    limiter: Option<RateLimiter>,
}

impl RetryExecutor {
    /// An executor with the given policy and no client-side throttle.
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            limiter: None,
        }
    }

    /// Throttle every attempt through `limiter`.
    pub fn with_limiter(mut self, limiter: RateLimiter) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// A copy of this executor using a different policy, sharing the throttle.
    pub fn with_policy(&self, policy: RetryPolicy) -> Self {
        Self {
            policy,
            limiter: self.limiter.clone(),
        }
    }

    /// A copy of this executor that does not throttle its attempts.
    ///
    /// For composite operations that throttle each of their own remote calls
    /// through [`RetryExecutor::throttled`].
    pub fn unthrottled(&self) -> Self {
        Self::new(self.policy)
    }

    /// The active policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// The client-side throttle, if any.
    pub fn limiter(&self) -> Option<&RateLimiter> {
        self.limiter.as_ref()
    }

    /// Await `call` while holding one throttle slot, without retrying.
    pub async fn throttled<Fut: Future>(&self, call: Fut) -> Fut::Output {
        let _guard = match &self.limiter {
            Some(limiter) => Some(limiter.acquire().await),
            None => None,
        };
        call.await
    }

    /// Execute `operation`, retrying on rate limiting.
    ///
    /// With `retries = n` the operation runs at most `n + 1` times, waiting
    /// `base_delay * 2^k` before retry `k`. Each attempt holds one throttle
    /// slot for its duration.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let response = executor
    ///     .execute(|| service.generate_content(&credential, model, &request))
    ///     .await?;
    /// ```
    pub async fn execute<F, Fut, T, E>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: RetryableError + std::fmt::Display,
    {
        let retries = self.policy.retries;
        let mut attempt: u32 = 0;

        Retry::spawn(self.policy.delays(), move || {
            attempt += 1;
            let current = attempt;
            let call = self.throttled(operation());

            async move {
                match call.await {
                    Ok(value) => {
                        if current > 1 {
                            debug!(attempt = current, "Remote call succeeded after retry");
                        }
                        Ok(value)
                    }
                    Err(err) if err.is_rate_limited() => {
                        if current <= retries {
                            warn!(
                                error = %err,
                                attempt = current,
                                attempts_remaining = retries + 1 - current,
                                "Rate limited, backing off before retry"
                            );
                        } else {
                            warn!(error = %err, attempt = current, "Rate limited, retry budget exhausted");
                        }
                        Err(RetryError::Transient {
                            err,
                            retry_after: None,
                        })
                    }
                    Err(err) => {
                        debug!(error = %err, attempt = current, "Non-retryable error, failing immediately");
                        Err(RetryError::Permanent(err))
                    }
                }
            }
        })
        .await
    }
}
