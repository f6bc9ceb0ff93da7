//! Daily "remaining seats" counter.
//!
//! A random value in [`SEATS_MIN`, `SEATS_MAX`] is drawn once per Paris calendar day and
//! kept in the local store so every page and every reload shows the same number.

use chrono::NaiveDate;
use rand::Rng;

use crate::store::KeyValueStore;

pub const SEATS_KEY: &str = "tb_seats_left";
pub const SEATS_DATE_KEY: &str = "tb_seats_date";
pub const SEATS_MIN: u32 = 4;
pub const SEATS_MAX: u32 = 9;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterRecord {
    pub value: u32,
    pub day: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh(CounterRecord),
    Stale,
}

impl CounterRecord {
    /// Reads the stored record; `None` if either key is missing or malformed.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Option<Self> {
        let day = store.get_item(SEATS_DATE_KEY)?;
        let day = NaiveDate::parse_from_str(day.trim(), DATE_FORMAT).ok()?;
        let value = store.get_item(SEATS_KEY)?.trim().parse::<u32>().ok()?;
        Some(Self { value, day })
    }

    pub fn freshness<S: KeyValueStore + ?Sized>(store: &S, today: NaiveDate) -> Freshness {
        match Self::load(store) {
            Some(record) if record.day == today => Freshness::Fresh(record),
            _ => Freshness::Stale,
        }
    }

    fn persist<S: KeyValueStore + ?Sized>(&self, store: &S) {
        let day = self.day.format(DATE_FORMAT).to_string();
        if let Err(e) = store.set_item(SEATS_KEY, &self.value.to_string()) {
            tracing::warn!("Failed to persist seats counter: {}", e);
            return;
        }
        if let Err(e) = store.set_item(SEATS_DATE_KEY, &day) {
            tracing::warn!("Failed to persist seats counter date: {}", e);
        }
    }
}

/// Number of seats to display today, regenerating the record when it is stale.
pub fn seats_for_today<S, R>(store: &S, today: NaiveDate, rng: &mut R) -> u32
where
    S: KeyValueStore + ?Sized,
    R: Rng,
{
    match CounterRecord::freshness(store, today) {
        Freshness::Fresh(record) => record.value,
        Freshness::Stale => {
            let record = CounterRecord {
                value: rng.gen_range(SEATS_MIN..=SEATS_MAX),
                day: today,
            };
            tracing::debug!(value = record.value, %today, "Regenerated seats counter");
            record.persist(store);
            record.value
        }
    }
}
