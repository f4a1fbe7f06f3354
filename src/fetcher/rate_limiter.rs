//! Call-rate limiting shared by every request to the upstream API.

use log::debug;
use std::collections::VecDeque;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// Admission control for outbound calls.
///
/// One limiter instance is shared by all day fetches and geocoding lookups of a
/// [`crate::RateLimitedFetcher`]; it is constructed by the caller and passed in so tests
/// can substitute their own.
pub trait CallLimiter: Send + Sync {
    /// Waits until one more call may be made, then records it.
    fn acquire(&self) -> impl Future<Output = ()> + Send;
}

/// Admits at most `max_calls` calls within any rolling `window`.
///
/// Admission decisions are serialized through an async mutex. A caller that has to
/// wait releases the lock while sleeping, so waiting never delays calls that were
/// already admitted.
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    max_calls: usize,
    window: Duration,
    admitted: Mutex<VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    /// A zero `max_calls` is treated as one.
    pub fn new(max_calls: usize, window: Duration) -> Self {
        let max_calls = max_calls.max(1);
        Self {
            max_calls,
            window,
            admitted: Mutex::new(VecDeque::with_capacity(max_calls)),
        }
    }

    pub fn per_minute(max_calls: usize) -> Self {
        Self::new(max_calls, Duration::from_secs(60))
    }

    pub fn max_calls(&self) -> usize {
        self.max_calls
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl CallLimiter for SlidingWindowLimiter {
    async fn acquire(&self) {
        loop {
            let wake_at = {
                let mut admitted = self.admitted.lock().await;
                let now = Instant::now();
                while admitted
                    .front()
                    .is_some_and(|t| now.duration_since(*t) >= self.window)
                {
                    admitted.pop_front();
                }
                if admitted.len() < self.max_calls {
                    admitted.push_back(now);
                    return;
                }
                match admitted.front() {
                    Some(oldest) => *oldest + self.window,
                    None => now,
                }
            };
            debug!("Rate limit of {} calls reached, waiting", self.max_calls);
            sleep_until(wake_at).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_admits_up_to_capacity_immediately() {
        let limiter = SlidingWindowLimiter::per_minute(3);
        let start = Instant::now();
        for _ in 0..3 {
            limiter.acquire().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_window_to_slide() {
        let limiter = SlidingWindowLimiter::per_minute(2);
        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_secs(60));
        assert!(start.elapsed() < Duration::from_secs(61));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_never_exceed_budget() {
        let limiter = Arc::new(SlidingWindowLimiter::new(2, Duration::from_secs(10)));
        let start = Instant::now();

        let handles: Vec<_> = (0..5)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move {
                    limiter.acquire().await;
                    start.elapsed()
                })
            })
            .collect();

        let mut admitted_at = Vec::new();
        for handle in handles {
            admitted_at.push(handle.await.unwrap());
        }
        admitted_at.sort();

        // Any 10 second window holds at most 2 admissions.
        for (i, t) in admitted_at.iter().enumerate() {
            let in_window = admitted_at[i..]
                .iter()
                .filter(|other| **other - *t < Duration::from_secs(10))
                .count();
            assert!(in_window <= 2, "admissions: {admitted_at:?}");
        }
        assert!(admitted_at[4] >= Duration::from_secs(20));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let limiter = SlidingWindowLimiter::per_minute(0);
        assert_eq!(limiter.max_calls(), 1);
        assert_eq!(limiter.window(), Duration::from_secs(60));
    }
}
