// Licensed under the EUPL-1.2-or-later

//! Contains rate-limited warning emission for the servo components.

use std::time::{Duration, Instant};

/// Default throttle period for repeated warnings: 3 s
pub const DEFAULT_THROTTLE_PERIOD: Duration = Duration::from_secs(3);

/// Monotonic time source for the warning throttle.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Clock backed by [`Instant`].
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        MonotonicClock::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Rate-limited warning emission for one call site.
///
/// Warnings are observability signals, not errors: emission never blocks and
/// never fails the control cycle. Each call site owns its own instance, so
/// throttle state cannot cross-talk between scenarios or tests.
pub struct ThrottledWarnings {
    clock: Box<dyn Clock>,
    period: Duration,
    last_emitted: Option<Duration>,
}

impl ThrottledWarnings {
    pub fn new(period: Duration) -> Self {
        ThrottledWarnings::with_clock(period, Box::new(MonotonicClock::new()))
    }

    /// Creates a throttle driven by an injected clock.
    pub fn with_clock(period: Duration, clock: Box<dyn Clock>) -> Self {
        ThrottledWarnings {
            clock,
            period,
            last_emitted: None,
        }
    }

    /// Emits the warning unless one was already emitted within the throttle
    /// period. Returns whether the message went out; callers in the control
    /// cycle ignore the return value.
    pub fn warn(&mut self, message: &str) -> bool {
        let now = self.clock.now();
        if let Some(last) = self.last_emitted {
            if now < last + self.period {
                return false;
            }
        }
        self.last_emitted = Some(now);
        tracing::warn!(target: "servo", "{}", message);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct FakeClock(Rc<Cell<Duration>>);

    impl Clock for FakeClock {
        fn now(&self) -> Duration {
            self.0.get()
        }
    }

    #[test]
    fn suppresses_repeats_within_period() {
        let time = Rc::new(Cell::new(Duration::ZERO));
        let mut warnings = ThrottledWarnings::with_clock(
            Duration::from_secs(3),
            Box::new(FakeClock(Rc::clone(&time))),
        );

        assert!(warnings.warn("close to singularity"));
        assert!(!warnings.warn("close to singularity"));
        time.set(Duration::from_secs(2));
        assert!(!warnings.warn("close to singularity"));
        time.set(Duration::from_secs(3));
        assert!(warnings.warn("close to singularity"));
        assert!(!warnings.warn("close to singularity"));
    }

    #[test]
    fn call_sites_do_not_share_throttle_state() {
        let time = Rc::new(Cell::new(Duration::ZERO));
        let mut first = ThrottledWarnings::with_clock(
            Duration::from_secs(3),
            Box::new(FakeClock(Rc::clone(&time))),
        );
        let mut second = ThrottledWarnings::with_clock(
            Duration::from_secs(3),
            Box::new(FakeClock(Rc::clone(&time))),
        );

        assert!(first.warn("a"));
        assert!(second.warn("b"));
    }
}
