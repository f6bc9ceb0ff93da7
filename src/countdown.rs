use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

use crate::time_source::next_weekly_reset;

/// Remaining time split into display units. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Countdown {
    /// Splits a number of seconds; negative inputs clamp to zero.
    pub fn from_seconds(total: i64) -> Self {
        let total = total.max(0) as u64;
        Self {
            days: total / 86_400,
            hours: ((total % 86_400) / 3_600) as u8,
            minutes: ((total % 3_600) / 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400
            + u64::from(self.hours) * 3_600
            + u64::from(self.minutes) * 60
            + u64::from(self.seconds)
    }

    pub fn days_label(&self) -> String {
        self.days.to_string()
    }

    pub fn hours_label(&self) -> String {
        format!("{:02}", self.hours)
    }

    pub fn minutes_label(&self) -> String {
        format!("{:02}", self.minutes)
    }

    pub fn seconds_label(&self) -> String {
        format!("{:02}", self.seconds)
    }
}

/// Tracks the upcoming weekly reset and yields the countdown on each tick.
#[derive(Debug, Clone)]
pub struct CountdownTicker {
    target: DateTime<Tz>,
    last: Option<Countdown>,
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub countdown: Countdown,
    /// Seconds digit differs from the previous tick (drives the pulse effect).
    pub seconds_changed: bool,
}

impl CountdownTicker {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            target: next_weekly_reset(now),
            last: None,
        }
    }

    pub fn target(&self) -> DateTime<Tz> {
        self.target
    }

    pub fn tick(&mut self, now: DateTime<Utc>) -> Tick {
        let mut remaining = self.target.with_timezone(&Utc) - now;
        if remaining <= Duration::zero() {
            // Tick landed on or past the boundary: roll over to the next week.
            self.target = next_weekly_reset(now);
            remaining = self.target.with_timezone(&Utc) - now;
            tracing::debug!(reset = %self.target, "Weekly countdown rolled over");
        }
        let countdown = Countdown::from_seconds(remaining.num_seconds());
        let seconds_changed = self
            .last
            .map_or(true, |last| last.seconds != countdown.seconds);
        self.last = Some(countdown);
        Tick {
            countdown,
            seconds_changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_from_seconds_splits_units() {
        let c = Countdown::from_seconds(3 * 86_400 + 4 * 3_600 + 5 * 60 + 6);
        assert_eq!(c, Countdown { days: 3, hours: 4, minutes: 5, seconds: 6 });
        assert_eq!(c.days_label(), "3");
        assert_eq!(c.hours_label(), "04");
        assert_eq!(c.minutes_label(), "05");
        assert_eq!(c.seconds_label(), "06");
        assert_eq!(Countdown::from_seconds(-12), Countdown::default());
    }

    #[test]
    fn test_tick_midweek() {
        let mut ticker = CountdownTicker::new(utc("2025-01-15T10:00:00Z"));
        let tick = ticker.tick(utc("2025-01-15T10:00:00Z"));
        // Until 2025-01-18T23:00Z: 3 days 13 hours.
        assert_eq!(tick.countdown, Countdown { days: 3, hours: 13, minutes: 0, seconds: 0 });
        assert!(tick.seconds_changed);
    }

    #[test]
    fn test_crossing_boundary_restarts_full_week() {
        let mut ticker = CountdownTicker::new(utc("2025-01-18T22:59:58Z"));
        assert_eq!(ticker.tick(utc("2025-01-18T22:59:59Z")).countdown.total_seconds(), 1);

        // A delayed tick lands after the reset instant.
        let tick = ticker.tick(utc("2025-01-18T23:00:01Z"));
        assert_eq!(
            tick.countdown,
            Countdown { days: 6, hours: 23, minutes: 59, seconds: 59 }
        );
        assert_eq!(ticker.target().with_timezone(&Utc), utc("2025-01-25T23:00:00Z"));
    }

    #[test]
    fn test_tick_exactly_on_boundary_is_not_zero() {
        let mut ticker = CountdownTicker::new(utc("2025-01-18T22:59:58Z"));
        let tick = ticker.tick(utc("2025-01-18T23:00:00Z"));
        assert_eq!(tick.countdown.days, 7);
        assert_eq!(tick.countdown.total_seconds(), 7 * 86_400);
    }

    #[test]
    fn test_seconds_changed_flag() {
        let mut ticker = CountdownTicker::new(utc("2025-01-15T10:00:00Z"));
        assert!(ticker.tick(utc("2025-01-15T10:00:00.100Z")).seconds_changed);
        assert!(!ticker.tick(utc("2025-01-15T10:00:00.600Z")).seconds_changed);
        assert!(ticker.tick(utc("2025-01-15T10:00:01.100Z")).seconds_changed);
    }
}
