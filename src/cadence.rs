//! Deadline tracking for cooperative tasks
//!
//! Each task runs when its deadline has passed and then schedules itself
//! one interval later. The caller is responsible for sleeping between polls.

use embassy_time::{Duration, Instant};

/// Next deadline of a periodic task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    deadline: Instant,
}

impl Cadence {
    pub const fn new(deadline: Instant) -> Self {
        Self { deadline }
    }

    /// First run one `interval` after `now`
    pub fn after(now: Instant, interval: Duration) -> Self {
        Self::new(now + interval)
    }

    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Schedule the next run
    ///
    /// If we have fallen more than two intervals behind, the backlog is
    /// skipped instead of catching up with a burst of runs.
    pub fn advance(&mut self, interval: Duration, now: Instant) {
        if now > self.deadline + interval + interval {
            self.deadline = now;
        }
        self.deadline += interval;
    }
}

/// Time left until `deadline`, zero if it already passed
pub fn sleep_until(deadline: Instant, now: Instant) -> Duration {
    if deadline > now {
        deadline - now
    } else {
        Duration::from_ticks(0)
    }
}
