//! Civil time in the site's reference timezone.
//!
//! Every calendar computation (the daily seats reset, the weekly countdown) is done
//! in Europe/Paris, whatever timezone the visitor's machine is configured with.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

pub const REFERENCE_TZ: Tz = chrono_tz::Europe::Paris;

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Calendar date in the reference timezone at `now`.
pub fn today(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&REFERENCE_TZ).date_naive()
}

/// Next "Sunday 00:00:00" in the reference timezone strictly after `now`.
pub fn next_weekly_reset(now: DateTime<Utc>) -> DateTime<Tz> {
    let local = now.with_timezone(&REFERENCE_TZ);
    let days_until_sunday = (7 - local.weekday().num_days_from_sunday()) % 7;
    let mut date = local.date_naive() + Duration::days(i64::from(days_until_sunday));
    loop {
        let candidate = local_midnight(date);
        if candidate.with_timezone(&Utc) > now {
            return candidate;
        }
        date += Duration::days(7);
    }
}

fn local_midnight(date: NaiveDate) -> DateTime<Tz> {
    local_midnight_in(&REFERENCE_TZ, date)
}

/// Start of `date` in `tz`. Where a DST jump skips midnight the day starts at 01:00.
fn local_midnight_in<Z: TimeZone>(tz: &Z, date: NaiveDate) -> DateTime<Z> {
    let naive = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    (0..=2)
        .find_map(|h| tz.from_local_datetime(&(naive + Duration::hours(h))).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}
