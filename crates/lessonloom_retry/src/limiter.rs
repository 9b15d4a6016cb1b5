//! Client-side request throttle using governor and a Tokio semaphore.
//!
//! The throttle is optional. Without one, concurrent stage invocations are
//! not serialized in any way.

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Throttle enforcing requests per minute and concurrent requests.
///
/// Cloning shares the underlying quotas.
///
/// # Example
///
/// ```rust,ignore
/// let limiter = RateLimiter::new(Some(10), Some(2));
/// let guard = limiter.acquire().await;
/// // make the call...
/// drop(guard); // releases the concurrency slot
/// ```
#[derive(Clone)]
pub struct RateLimiter {
    rpm: Option<u32>,
    rpm_limiter: Option<Arc<DirectRateLimiter>>,
    concurrent_semaphore: Option<Arc<Semaphore>>,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("rpm", &self.rpm)
            .field(
                "available_permits",
                &self
                    .concurrent_semaphore
                    .as_ref()
                    .map(|semaphore| semaphore.available_permits()),
            )
            .finish()
    }
}

impl RateLimiter {
    /// Create a throttle. `None` (or zero) leaves that dimension unlimited.
    pub fn new(rpm: Option<u32>, max_concurrent: Option<u32>) -> Self {
        let rpm_limiter = rpm.and_then(NonZeroU32::new).map(|n| {
            let quota = Quota::per_minute(n);
            Arc::new(GovernorRateLimiter::direct(quota))
        });

        let concurrent_semaphore = max_concurrent
            .filter(|n| *n > 0)
            .map(|n| Arc::new(Semaphore::new(n as usize)));

        Self {
            rpm,
            rpm_limiter,
            concurrent_semaphore,
        }
    }

    /// Wait until a request is allowed.
    ///
    /// The concurrency slot is taken last so it is not held while waiting on
    /// the per-minute quota.
    pub async fn acquire(&self) -> RateLimiterGuard {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.until_ready().await;
        }

        let permit = match &self.concurrent_semaphore {
            Some(semaphore) => semaphore.clone().acquire_owned().await.ok(),
            None => None,
        };

        RateLimiterGuard { _permit: permit }
    }

    /// Try to acquire without waiting; `None` if any limit would block.
    pub fn try_acquire(&self) -> Option<RateLimiterGuard> {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.check().ok()?;
        }

        let permit = match &self.concurrent_semaphore {
            Some(semaphore) => Some(semaphore.clone().try_acquire_owned().ok()?),
            None => None,
        };

        Some(RateLimiterGuard { _permit: permit })
    }
}

/// RAII guard releasing the concurrency slot when dropped.
pub struct RateLimiterGuard {
    _permit: Option<OwnedSemaphorePermit>,
}
