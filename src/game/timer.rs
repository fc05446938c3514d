use std::time::{Duration, Instant};

use crate::LOCK_DELAY;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// Periodic gravity step at the level's interval.
    Fall,
    /// One-shot grace period before a resting piece locks.
    LockDelay,
}

/// The fall timer and the lock-delay timer never run at the same time, so a
/// single deadline is enough to model both.
#[derive(Clone, Copy, Debug)]
pub struct Timers {
    kind: TimerKind,
    period: Duration,
    deadline: Instant,
}

impl Timers {
    pub fn falling(interval: Duration, now: Instant) -> Self {
        Self {
            kind: TimerKind::Fall,
            period: interval,
            deadline: now + interval,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_lock_pending(&self) -> bool {
        self.kind == TimerKind::LockDelay
    }

    pub fn start_fall(&mut self, interval: Duration, now: Instant) {
        *self = Self::falling(interval, now);
    }

    /// Stops the fall timer and arms the lock delay. Returns false if the
    /// lock delay was already running; it is not restarted.
    pub fn start_lock_delay(&mut self, now: Instant) -> bool {
        if self.is_lock_pending() {
            return false;
        }
        self.kind = TimerKind::LockDelay;
        self.period = LOCK_DELAY;
        self.deadline = now + LOCK_DELAY;
        true
    }

    pub fn due(&self, now: Instant) -> Option<TimerKind> {
        (now >= self.deadline).then_some(self.kind)
    }

    /// Schedule the next period of a periodic timer.
    pub fn rearm(&mut self, now: Instant) {
        self.deadline = now + self.period;
    }
}
