//! Tracker configuration.

use crate::calendar::{CalendarZone, SystemClock};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key the browser app has always stored the record under.
pub const DEFAULT_STORAGE_KEY: &str = "wordDailyStreak";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tracker config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("storage key must not be empty")]
    EmptyStorageKey,
    #[error("fixed calendar offset {0} minutes is outside -1439..=1439")]
    OffsetOutOfRange(i32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub storage_key: String,
    pub calendar: CalendarZone,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            calendar: CalendarZone::Local,
        }
    }
}

impl TrackerConfig {
    /// Parse a config document; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the values are invalid.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error if the storage key is blank or the offset is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        match self.calendar {
            CalendarZone::FixedOffsetMinutes(minutes) if !self.calendar.is_valid() => {
                Err(ConfigError::OffsetOutOfRange(minutes))
            }
            _ => Ok(()),
        }
    }

    /// Wall clock evaluating days in the configured zone.
    #[must_use]
    pub const fn system_clock(&self) -> SystemClock {
        SystemClock::new(self.calendar)
    }
}
