//! Inter-request delay policy.

use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

/// Delay applied between requests that are close together.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(750);

/// Requests further apart than this are not delayed.
pub const DEFAULT_QUIET_WINDOW: Duration = Duration::from_secs(20);

/// Enforces a fixed pause between requests issued in quick succession.
///
/// The last-request instant is recorded before sleeping, so it reflects
/// intent to send rather than completion.
#[derive(Debug)]
pub struct RateLimiter {
    delay: Duration,
    quiet_window: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Creates a limiter with a custom delay and quiet window.
    pub fn new(delay: Duration, quiet_window: Duration) -> Self {
        Self {
            delay,
            quiet_window,
            last_request: Mutex::new(None),
        }
    }

    /// A limiter that never delays.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Records `now` as the latest request and returns how long to wait first.
    pub fn next_delay(&self, now: Instant) -> Duration {
        let mut last = match self.last_request.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let delay = match *last {
            None => Duration::ZERO,
            Some(prev) if now.saturating_duration_since(prev) >= self.quiet_window => {
                Duration::ZERO
            }
            Some(_) => self.delay,
        };
        *last = Some(now);
        delay
    }

    /// Suspends the caller for the delay owed by the current request.
    pub async fn wait(&self) -> Duration {
        let delay = self.next_delay(Instant::now());
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        delay
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY, DEFAULT_QUIET_WINDOW)
    }
}
