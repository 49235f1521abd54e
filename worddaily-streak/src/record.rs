//! The persisted streak record and its serialized form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Reasons a stored record cannot be accepted.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed streak record: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("current streak {current} exceeds highest streak {highest}")]
    StreakAboveHighest { current: u32, highest: u32 },
    #[error("badge `{0}` is listed more than once")]
    DuplicateBadge(String),
}

/// Everything the app remembers about a learner's visits.
///
/// Serialized as a flat JSON object with camelCase keys; `lastPlayedDate` is
/// an empty string until the first visit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreakRecord {
    pub current_streak: u32,
    #[serde(with = "played_date")]
    pub last_played_date: Option<NaiveDate>,
    pub highest_streak: u32,
    pub badges: Vec<String>,
    pub total_days_played: u32,
}

impl StreakRecord {
    /// Parse and validate a stored record.
    ///
    /// Missing fields take their zero defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not a record, a count is negative or
    /// fractional, the date is malformed, or the record breaks its invariants.
    pub fn from_json(raw: &str) -> Result<Self, RecordError> {
        let record: Self = serde_json::from_str(raw)?;
        record.validate()?;
        Ok(record)
    }

    /// Serialize for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Check the invariants every persisted record must hold.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.current_streak > self.highest_streak {
            return Err(RecordError::StreakAboveHighest {
                current: self.current_streak,
                highest: self.highest_streak,
            });
        }
        let mut seen = HashSet::with_capacity(self.badges.len());
        for badge in &self.badges {
            if !seen.insert(badge.as_str()) {
                return Err(RecordError::DuplicateBadge(badge.clone()));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|b| b == id)
    }

    #[must_use]
    pub fn played_on(&self, date: NaiveDate) -> bool {
        self.last_played_date == Some(date)
    }

    /// True until the first visit is recorded.
    #[must_use]
    pub const fn is_fresh(&self) -> bool {
        self.last_played_date.is_none()
    }
}

mod played_date {
    use crate::calendar::{format_day, parse_day};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    #[allow(clippy::ref_option)] // serde `with` hands us `&Option<T>`.
    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&format_day(*date)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => parse_day(text).map(Some).map_err(|err| {
                de::Error::custom(format!("invalid lastPlayedDate `{text}`: {err}"))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_serializes_like_a_fresh_install() {
        let json = StreakRecord::default().to_json().unwrap();
        assert_eq!(
            json,
            r#"{"currentStreak":0,"lastPlayedDate":"","highestStreak":0,"badges":[],"totalDaysPlayed":0}"#
        );
    }

    #[test]
    fn parses_record_written_by_the_browser_app() {
        let raw = r#"{"currentStreak":3,"lastPlayedDate":"2024-06-02","highestStreak":8,"badges":["week-streak"],"totalDaysPlayed":12}"#;
        let record = StreakRecord::from_json(raw).unwrap();
        assert_eq!(record.current_streak, 3);
        assert_eq!(record.last_played_date, NaiveDate::from_ymd_opt(2024, 6, 2));
        assert!(record.has_badge("week-streak"));
        assert!(!record.is_fresh());
        assert_eq!(record.to_json().unwrap(), raw);
    }

    #[test]
    fn missing_fields_and_null_date_take_defaults() {
        let record = StreakRecord::from_json(r#"{"totalDaysPlayed":4,"lastPlayedDate":null}"#)
            .unwrap();
        assert_eq!(record.total_days_played, 4);
        assert!(record.is_fresh());
        assert!(record.badges.is_empty());
    }

    #[test]
    fn rejects_malformed_values() {
        for raw in [
            "not json",
            "42",
            r#"{"currentStreak":-1}"#,
            r#"{"currentStreak":1.5,"highestStreak":2}"#,
            r#"{"lastPlayedDate":"yesterday"}"#,
            r#"{"badges":"week-streak"}"#,
        ] {
            assert!(
                matches!(StreakRecord::from_json(raw), Err(RecordError::Parse(_))),
                "{raw} should fail to parse"
            );
        }
    }

    #[test]
    fn rejects_broken_invariants() {
        let above = StreakRecord::from_json(r#"{"currentStreak":5,"highestStreak":2}"#);
        assert!(matches!(
            above,
            Err(RecordError::StreakAboveHighest {
                current: 5,
                highest: 2
            })
        ));

        let dupes = StreakRecord::from_json(r#"{"badges":["week-streak","week-streak"]}"#);
        assert!(matches!(dupes, Err(RecordError::DuplicateBadge(id)) if id == "week-streak"));
    }
}
