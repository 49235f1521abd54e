//! Word Daily Streak Engine
//!
//! Platform-agnostic streak and badge tracking for the Word Daily vocabulary app.
//! This crate owns the persisted [`StreakRecord`] and the rules that evolve it,
//! without UI or platform-specific dependencies. Hosts inject a [`KeyValueStore`]
//! and a [`Clock`].

pub mod badges;
pub mod calendar;
pub mod config;
pub mod record;
pub mod storage;
pub mod summary;
pub mod tracker;

// Re-export commonly used types
pub use badges::{
    Badge, BadgeCatalog, BadgeInfo, BadgeLabel, Milestone, badge_catalog, newly_unlocked,
};
pub use calendar::{
    CalendarZone, Clock, FixedClock, SystemClock, days_between, format_day, parse_day,
};
pub use config::{ConfigError, DEFAULT_STORAGE_KEY, TrackerConfig};
pub use record::{RecordError, StreakRecord};
pub use storage::{MemoryStore, MemoryStoreError};
pub use summary::{
    BadgeProgress, HOT_STREAK_THRESHOLD, StreakSummary, achievements, share_text, unknown_badges,
};
pub use tracker::{StreakTracker, TrackerError, VisitReport, VisitTransition, apply_visit};

/// Trait for abstracting the persistent key-value store the record lives in.
/// Platform-specific implementations should provide this.
pub trait KeyValueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written (quota exceeded, storage disabled).
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

impl<T> KeyValueStore for &T
where
    T: KeyValueStore + ?Sized,
{
    type Error = T::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).set(key, value)
    }
}
