//! `localStorage`-backed store and JavaScript-date clock.

use crate::dom;
use chrono::NaiveDate;
use web_sys::Storage;
use worddaily_streak::{Clock, KeyValueStore};

#[derive(Debug, thiserror::Error)]
pub enum BrowserStoreError {
    #[error("localStorage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read `{key}` from localStorage: {message}")]
    Read { key: String, message: String },
    #[error("failed to write `{key}` to localStorage: {message}")]
    Write { key: String, message: String },
}

/// Web-specific streak storage using localStorage
pub struct BrowserStore {
    storage: Storage,
}

impl BrowserStore {
    /// Open the origin's `localStorage`.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserStoreError::Unavailable`] when there is no window or
    /// storage is disabled.
    pub fn open() -> Result<Self, BrowserStoreError> {
        dom::local_storage()
            .map(|storage| Self { storage })
            .map_err(|err| BrowserStoreError::Unavailable(dom::js_error_message(&err)))
    }
}

impl KeyValueStore for BrowserStore {
    type Error = BrowserStoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        self.storage
            .get_item(key)
            .map_err(|err| BrowserStoreError::Read {
                key: key.to_string(),
                message: dom::js_error_message(&err),
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.storage.set_item(key, value).map_err(|err| {
            let message = dom::js_error_message(&err);
            log::error!("localStorage write to `{key}` failed: {message}");
            BrowserStoreError::Write {
                key: key.to_string(),
                message,
            }
        })
    }
}

/// Clock reading the browser's local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn today(&self) -> NaiveDate {
        let now = js_sys::Date::new_0();
        date_from_js_parts(now.get_full_year(), now.get_month(), now.get_date())
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// Build a date from `Date` getters; JavaScript months are zero-based.
#[must_use]
pub fn date_from_js_parts(full_year: u32, month0: u32, day: u32) -> Option<NaiveDate> {
    let year = i32::try_from(full_year).ok()?;
    NaiveDate::from_ymd_opt(year, month0.checked_add(1)?, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_months_are_zero_based() {
        assert_eq!(
            date_from_js_parts(2024, 0, 31),
            NaiveDate::from_ymd_opt(2024, 1, 31)
        );
        assert_eq!(
            date_from_js_parts(2024, 11, 1),
            NaiveDate::from_ymd_opt(2024, 12, 1)
        );
    }

    #[test]
    fn invalid_js_parts_are_rejected() {
        assert_eq!(date_from_js_parts(2024, 12, 1), None);
        assert_eq!(date_from_js_parts(2023, 1, 29), None);
        assert_eq!(date_from_js_parts(u32::MAX, 0, 1), None);
    }

    #[test]
    fn store_errors_name_the_key() {
        let err = BrowserStoreError::Write {
            key: "wordDailyStreak".into(),
            message: "QuotaExceededError".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to write `wordDailyStreak` to localStorage: QuotaExceededError"
        );
    }
}
