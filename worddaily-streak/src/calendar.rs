//! Calendar-day handling for streak math.
//!
//! Streaks are counted in whole calendar days. "Today" is supplied by a [`Clock`]
//! so hosts decide which zone a day boundary falls in, and tests can pin it.

use chrono::{FixedOffset, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

/// Storage format for `lastPlayedDate`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// Source of the current calendar date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

impl<T> Clock for &T
where
    T: Clock + ?Sized,
{
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// Zone in which day boundaries are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarZone {
    /// The host's local time zone, including its DST rules.
    #[default]
    Local,
    /// A fixed offset east of UTC, in minutes.
    FixedOffsetMinutes(i32),
}

impl CalendarZone {
    /// Whether the zone can be turned into a valid UTC offset.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        match self {
            Self::Local => true,
            Self::FixedOffsetMinutes(minutes) => {
                minutes >= -MAX_OFFSET_MINUTES && minutes <= MAX_OFFSET_MINUTES
            }
        }
    }

    /// Current calendar date in this zone.
    ///
    /// Out-of-range fixed offsets fall back to UTC.
    #[must_use]
    pub fn today(self) -> NaiveDate {
        match self {
            Self::Local => Local::now().date_naive(),
            Self::FixedOffsetMinutes(minutes) => FixedOffset::east_opt(minutes * 60)
                .map_or_else(
                    || Utc::now().date_naive(),
                    |offset| Utc::now().with_timezone(&offset).date_naive(),
                ),
        }
    }
}

/// Wall-clock backed [`Clock`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock {
    zone: CalendarZone,
}

impl SystemClock {
    #[must_use]
    pub const fn new(zone: CalendarZone) -> Self {
        Self { zone }
    }

    #[must_use]
    pub const fn zone(&self) -> CalendarZone {
        self.zone
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        self.zone.today()
    }
}

/// Manually driven [`Clock`] for tests and simulations.
///
/// Clones share the same date, so a caller can keep a handle and move time
/// forward while a tracker owns another copy.
#[derive(Debug, Clone)]
pub struct FixedClock {
    date: Rc<Cell<NaiveDate>>,
}

impl FixedClock {
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Rc::new(Cell::new(date)),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        self.date.set(date);
    }

    /// Move the clock by `days`; negative values move it backward.
    /// Saturates at the edges of the supported calendar.
    pub fn advance_days(&self, days: i64) {
        let current = self.date.get();
        let next = chrono::Duration::try_days(days)
            .and_then(|delta| current.checked_add_signed(delta))
            .unwrap_or(current);
        self.date.set(next);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date.get()
    }
}

/// Format a date the way it is persisted (`YYYY-MM-DD`).
#[must_use]
pub fn format_day(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a persisted `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns an error if `raw` is not a valid calendar date in that format.
pub fn parse_day(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
}

/// Whole calendar days from `earlier` to `later`; negative when `later` comes first.
#[must_use]
pub fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn format_pads_month_and_day() {
        assert_eq!(format_day(day(2024, 3, 7)), "2024-03-07");
        assert_eq!(parse_day("2024-03-07").unwrap(), day(2024, 3, 7));
        assert!(parse_day("2024-3-7x").is_err());
        assert!(parse_day("2024-02-30").is_err());
    }

    #[test]
    fn days_between_crosses_month_year_and_leap_boundaries() {
        assert_eq!(days_between(day(2024, 2, 28), day(2024, 2, 29)), 1);
        assert_eq!(days_between(day(2024, 2, 29), day(2024, 3, 1)), 1);
        assert_eq!(days_between(day(2023, 12, 31), day(2024, 1, 1)), 1);
        assert_eq!(days_between(day(2024, 1, 3), day(2024, 1, 1)), -2);
    }

    #[test]
    fn dst_weekend_is_still_one_day() {
        // US spring-forward and EU fall-back dates.
        assert_eq!(days_between(day(2024, 3, 9), day(2024, 3, 10)), 1);
        assert_eq!(days_between(day(2024, 10, 26), day(2024, 10, 27)), 1);
    }

    #[test]
    fn fixed_clock_clones_share_date() {
        let clock = FixedClock::new(day(2024, 5, 1));
        let handle = clock.clone();
        handle.advance_days(2);
        assert_eq!(clock.today(), day(2024, 5, 3));
        handle.advance_days(-5);
        assert_eq!(clock.today(), day(2024, 4, 28));
        handle.set(day(2030, 1, 1));
        assert_eq!(clock.today(), day(2030, 1, 1));
    }

    #[test]
    fn advance_days_saturates_at_calendar_edges() {
        let clock = FixedClock::new(day(2024, 1, 1));
        clock.advance_days(i64::MAX);
        assert_eq!(clock.today(), day(2024, 1, 1));
        clock.advance_days(i64::MIN);
        assert_eq!(clock.today(), day(2024, 1, 1));
        clock.advance_days(400_000_000);
        assert_eq!(clock.today(), day(2024, 1, 1));
        clock.advance_days(1);
        assert_eq!(clock.today(), day(2024, 1, 2));
    }

    #[test]
    fn zone_validation_rejects_full_day_offsets() {
        assert!(CalendarZone::Local.is_valid());
        assert!(CalendarZone::FixedOffsetMinutes(-1439).is_valid());
        assert!(CalendarZone::FixedOffsetMinutes(330).is_valid());
        assert!(!CalendarZone::FixedOffsetMinutes(1440).is_valid());
    }

    #[test]
    fn fixed_offset_today_stays_within_a_day_of_utc() {
        let utc = Utc::now().date_naive();
        for minutes in [-720, 0, 840] {
            let today = CalendarZone::FixedOffsetMinutes(minutes).today();
            assert!(days_between(utc, today).abs() <= 1);
        }
    }

    #[test]
    fn zone_serializes_in_snake_case() {
        let local = serde_json::to_string(&CalendarZone::Local).unwrap();
        assert_eq!(local, "\"local\"");
        let fixed: CalendarZone =
            serde_json::from_str(r#"{"fixed_offset_minutes":-300}"#).unwrap();
        assert_eq!(fixed, CalendarZone::FixedOffsetMinutes(-300));
    }
}
