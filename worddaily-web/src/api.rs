//! Host-facing facade over the tracker.
//!
//! Each method mirrors one call the UI makes and returns plain serializable
//! data, so the wasm exports only translate values and errors.

use worddaily_streak::{
    BadgeCatalog, BadgeProgress, Clock, KeyValueStore, StreakRecord, StreakSummary,
    StreakTracker, TrackerError, VisitReport, achievements, share_text,
};

/// Error surfaced to JavaScript callers as a message string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ApiError(pub String);

impl<E> From<TrackerError<E>> for ApiError
where
    E: std::error::Error + 'static,
{
    fn from(err: TrackerError<E>) -> Self {
        Self(err.to_string())
    }
}

pub struct StreakApi<S, C> {
    tracker: StreakTracker<S, C>,
}

impl<S, C> StreakApi<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    pub const fn new(tracker: StreakTracker<S, C>) -> Self {
        Self { tracker }
    }

    #[must_use]
    pub const fn tracker(&self) -> &StreakTracker<S, C> {
        &self.tracker
    }

    /// Current record, created on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read or the new record cannot be written.
    pub fn streak_data(&self) -> Result<StreakRecord, ApiError> {
        Ok(self.tracker.get_or_initialize()?)
    }

    /// Record today's visit.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails; the UI must not assume the visit counted.
    pub fn update_streak(&self) -> Result<StreakRecord, ApiError> {
        Ok(self.tracker.record_visit()?)
    }

    /// # Errors
    ///
    /// See [`StreakApi::update_streak`].
    pub fn record_visit_detailed(&self) -> Result<VisitReport, ApiError> {
        Ok(self.tracker.record_visit_detailed()?)
    }

    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub fn has_played_today(&self) -> Result<bool, ApiError> {
        Ok(self.tracker.has_visited_today()?)
    }

    #[must_use]
    pub fn badge_info(&self) -> &'static BadgeCatalog {
        self.tracker.badge_catalog()
    }

    /// # Errors
    ///
    /// See [`StreakApi::streak_data`].
    pub fn achievements(&self) -> Result<Vec<BadgeProgress>, ApiError> {
        self.streak_data().map(|record| achievements(&record))
    }

    /// # Errors
    ///
    /// See [`StreakApi::streak_data`].
    pub fn summary(&self) -> Result<StreakSummary, ApiError> {
        self.streak_data().map(|record| StreakSummary::from(&record))
    }

    /// # Errors
    ///
    /// See [`StreakApi::streak_data`].
    pub fn share_text(&self, word: &str, definition: &str) -> Result<String, ApiError> {
        self.streak_data()
            .map(|record| share_text(word, definition, &record))
    }
}
