use std::{
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

/// A fixed window rate limiter shared by every clone.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    window: Arc<Mutex<Window>>,
    capacity: u64,
    period: Duration,
}

#[derive(Debug)]
struct Window {
    used: u64,
    reset_at: Instant,
}

/// Outcome of [`RateLimiter::acquire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permit {
    /// The request may proceed.
    Granted,
    /// The window is exhausted; retry after the given delay.
    Denied { retry_after: Duration },
}

impl RateLimiter {
    /// Allow `capacity` requests per `period`.
    pub fn new(capacity: u64, period: Duration) -> Self {
        Self {
            window: Arc::new(Mutex::new(Window { used: 0, reset_at: Instant::now() + period })),
            capacity,
            period,
        }
    }

    /// Take a permit from the current window, opening a new window if the
    /// previous one has elapsed.
    pub fn acquire(&self) -> Permit {
        // The window holds two plain counters, so a poisoned lock is still usable.
        let mut window = self.window.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        if now >= window.reset_at {
            window.reset_at = now + self.period;
            window.used = 1;
            Permit::Granted
        } else if window.used < self.capacity {
            window.used += 1;
            Permit::Granted
        } else {
            Permit::Denied { retry_after: window.reset_at - now }
        }
    }

    /// Convenience wrapper around [`acquire`](Self::acquire).
    pub fn try_acquire(&self) -> bool {
        self.acquire() == Permit::Granted
    }
}

#[cfg(test)]
mod tests {
    use super::{Permit, RateLimiter};
    use std::{
        sync::{
            Arc,
            atomic::{AtomicU64, Ordering},
        },
        time::Duration,
    };
    use tokio::time::sleep;

    #[tokio::test]
    async fn denies_when_over_capacity() {
        let limiter = RateLimiter::new(2, Duration::from_millis(50));
        assert!(limiter.try_acquire());
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
    }

    #[tokio::test]
    async fn denial_reports_time_left_in_window() {
        let limiter = RateLimiter::new(1, Duration::from_secs(30));
        assert_eq!(limiter.acquire(), Permit::Granted);
        match limiter.acquire() {
            Permit::Denied { retry_after } => {
                assert!(retry_after <= Duration::from_secs(30));
                assert!(retry_after > Duration::from_secs(29));
            }
            Permit::Granted => panic!("expected denial"),
        }
    }

    #[tokio::test]
    async fn resets_after_period() {
        let limiter = RateLimiter::new(1, Duration::from_millis(10));
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
        sleep(Duration::from_millis(15)).await;
        assert!(limiter.try_acquire());
    }

    #[tokio::test]
    async fn clones_share_the_window() {
        let limiter = RateLimiter::new(1, Duration::from_secs(1));
        let clone = limiter.clone();
        assert!(limiter.try_acquire());
        assert!(!clone.try_acquire());
    }

    #[tokio::test]
    async fn concurrency_respects_capacity() {
        let limiter = Arc::new(RateLimiter::new(5, Duration::from_secs(1)));
        let success = Arc::new(AtomicU64::new(0));
        let mut handles = Vec::new();
        for _ in 0..10 {
            let l = Arc::clone(&limiter);
            let s = Arc::clone(&success);
            handles.push(tokio::spawn(async move {
                if l.try_acquire() {
                    s.fetch_add(1, Ordering::SeqCst);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(success.load(Ordering::SeqCst), 5);
    }
}
