//! Pollable fixed-period timer.

use jiff::{SignedDuration, Timestamp};

/// Fires at most once per poll, at least `period` after the previous firing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    period: SignedDuration,
    next_due: Timestamp,
}

impl Interval {
    /// First firing is one period after `start`.
    pub fn new(period: SignedDuration, start: Timestamp) -> Self {
        Self {
            period,
            next_due: start.checked_add(period).unwrap_or(Timestamp::MAX),
        }
    }

    /// Time between firings
    pub fn period(&self) -> SignedDuration {
        self.period
    }

    /// Earliest instant the next poll fires
    pub fn next_due(&self) -> Timestamp {
        self.next_due
    }

    /// Whether the timer fires at `now`. A late poll fires once and the next
    /// firing is scheduled a full period after `now`.
    pub fn poll(&mut self, now: Timestamp) -> bool {
        if now < self.next_due {
            return false;
        }

        self.next_due = now.checked_add(self.period).unwrap_or(Timestamp::MAX);

        true
    }
}
