use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

type Limiter<C> = RateLimiter<NotKeyed, InMemoryState, C, NoOpMiddleware<<C as Clock>::Instant>>;

/// Leading-edge throttle: the first call runs immediately and opens a window;
/// calls made while the window is open are dropped, never replayed.
///
/// Backed by a single-cell GCRA quota, so the only state is the next instant
/// a call may pass. A zero-length window disables throttling.
pub struct ThrottleGate<C: Clock = DefaultClock> {
    limiter: Option<Limiter<C>>,
}

impl ThrottleGate<DefaultClock> {
    pub fn new(window_ms: u64) -> Self {
        Self::with_clock(window_ms, DefaultClock::default())
    }
}

impl<C: Clock> ThrottleGate<C> {
    pub fn with_clock(window_ms: u64, clock: C) -> Self {
        let limiter = Quota::with_period(Duration::from_millis(window_ms))
            .map(|quota| RateLimiter::direct_with_clock(quota, clock));
        ThrottleGate { limiter }
    }

    /// Run `action` unless a window is still open. Returns whether it ran.
    pub fn call(&self, action: impl FnOnce()) -> bool {
        if let Some(limiter) = &self.limiter {
            if limiter.check().is_err() {
                return false;
            }
        }
        action();
        true
    }
}

impl<C: Clock> std::fmt::Debug for ThrottleGate<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThrottleGate")
            .field("enabled", &self.limiter.is_some())
            .finish()
    }
}
