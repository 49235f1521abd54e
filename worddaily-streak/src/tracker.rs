//! Streak tracker: reads, evolves and persists the [`StreakRecord`].

use crate::KeyValueStore;
use crate::badges::{Badge, BadgeCatalog, badge_catalog, newly_unlocked};
use crate::calendar::{Clock, SystemClock, days_between};
use crate::config::{DEFAULT_STORAGE_KEY, TrackerConfig};
use crate::record::{RecordError, StreakRecord};
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError<E>
where
    E: std::error::Error + 'static,
{
    #[error("stored streak record under `{key}` is corrupt: {source}")]
    CorruptState {
        key: String,
        #[source]
        source: RecordError,
    },
    #[error("streak storage failed: {0}")]
    Storage(#[source] E),
    #[error("failed to encode streak record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// How a visit moved the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum VisitTransition {
    /// Already recorded today; nothing changed.
    SameDay,
    /// No visit had ever been recorded.
    First,
    /// Exactly one calendar day after the last visit.
    Consecutive,
    /// Any other gap, including a clock that moved backward.
    Reset { elapsed: i64 },
}

/// Result of recording a visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitReport {
    pub record: StreakRecord,
    pub transition: VisitTransition,
    pub new_badges: Vec<Badge>,
}

impl VisitReport {
    /// Whether this visit changed the record.
    #[must_use]
    pub const fn changed(&self) -> bool {
        !matches!(self.transition, VisitTransition::SameDay)
    }
}

/// Apply one visit on `today` to `record`.
///
/// Pure: no storage or clock access. A visit on the day already recorded
/// returns the record untouched.
#[must_use]
pub fn apply_visit(mut record: StreakRecord, today: NaiveDate) -> VisitReport {
    let transition = match record.last_played_date {
        Some(last) if last == today => {
            return VisitReport {
                record,
                transition: VisitTransition::SameDay,
                new_badges: Vec::new(),
            };
        }
        None => VisitTransition::First,
        Some(last) => match days_between(last, today) {
            1 => VisitTransition::Consecutive,
            elapsed => VisitTransition::Reset { elapsed },
        },
    };

    record.current_streak = match transition {
        VisitTransition::Consecutive => record.current_streak.saturating_add(1),
        _ => 1,
    };
    record.highest_streak = record.highest_streak.max(record.current_streak);
    record.total_days_played = record.total_days_played.saturating_add(1);

    let new_badges = newly_unlocked(
        record.current_streak,
        record.total_days_played,
        &record.badges,
    );
    record
        .badges
        .extend(new_badges.iter().map(|badge| badge.id().to_string()));
    record.last_played_date = Some(today);

    VisitReport {
        record,
        transition,
        new_badges,
    }
}

/// Owner of the persisted streak record.
///
/// All operations are synchronous and each write replaces the whole record,
/// so callers never observe a partial update. Two trackers sharing one store
/// from different hosts can still lose an update (last write wins).
#[derive(Debug)]
pub struct StreakTracker<S, C = SystemClock> {
    store: S,
    clock: C,
    key: String,
}

impl<S, C> StreakTracker<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    /// Tracker using the default storage key.
    pub fn new(store: S, clock: C) -> Self {
        Self::with_key(store, clock, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, clock: C, key: impl Into<String>) -> Self {
        Self {
            store,
            clock,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Read the stored record without creating one.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::CorruptState`] if the stored value is not a
    /// valid record, or [`TrackerError::Storage`] if the store cannot be read.
    pub fn load(&self) -> Result<Option<StreakRecord>, TrackerError<S::Error>> {
        let Some(raw) = self.store.get(&self.key).map_err(TrackerError::Storage)? else {
            return Ok(None);
        };
        StreakRecord::from_json(&raw)
            .map(Some)
            .map_err(|source| TrackerError::CorruptState {
                key: self.key.clone(),
                source,
            })
    }

    /// Return the stored record, creating and persisting the zero record when
    /// none exists. A corrupt record is replaced by the zero record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn get_or_initialize(&self) -> Result<StreakRecord, TrackerError<S::Error>> {
        match self.load() {
            Ok(Some(record)) => Ok(record),
            Ok(None) => {
                log::debug!("No streak record under `{}`; initializing", self.key);
                self.reinitialize()
            }
            Err(TrackerError::CorruptState { key, source }) => {
                log::warn!("Discarding corrupt streak record under `{key}`: {source}");
                self.reinitialize()
            }
            Err(err) => Err(err),
        }
    }

    /// Whether a visit has already been recorded today. Never writes.
    ///
    /// A missing or corrupt record counts as not visited.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn has_visited_today(&self) -> Result<bool, TrackerError<S::Error>> {
        match self.load() {
            Ok(record) => Ok(record.is_some_and(|r| r.played_on(self.today()))),
            Err(TrackerError::CorruptState { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Record today's visit and return the updated record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the update cannot be
    /// written; a failed write is never swallowed.
    pub fn record_visit(&self) -> Result<StreakRecord, TrackerError<S::Error>> {
        self.record_visit_detailed().map(|report| report.record)
    }

    /// Record today's visit, reporting the transition and any badges it unlocked.
    ///
    /// # Errors
    ///
    /// See [`StreakTracker::record_visit`].
    pub fn record_visit_detailed(&self) -> Result<VisitReport, TrackerError<S::Error>> {
        let record = self.get_or_initialize()?;
        let today = self.today();
        let report = apply_visit(record, today);
        if !report.changed() {
            log::debug!("Visit on {today} already recorded");
            return Ok(report);
        }

        self.persist(&report.record)?;
        log::info!(
            "Recorded visit on {today}: {:?}, streak {} (best {}), {} days played",
            report.transition,
            report.record.current_streak,
            report.record.highest_streak,
            report.record.total_days_played
        );
        for badge in &report.new_badges {
            log::info!("Unlocked badge `{}`", badge.id());
        }
        Ok(report)
    }

    /// The static badge catalog.
    #[must_use]
    pub fn badge_catalog(&self) -> &'static BadgeCatalog {
        badge_catalog()
    }

    fn reinitialize(&self) -> Result<StreakRecord, TrackerError<S::Error>> {
        let record = StreakRecord::default();
        self.persist(&record)?;
        Ok(record)
    }

    fn persist(&self, record: &StreakRecord) -> Result<(), TrackerError<S::Error>> {
        let encoded = record.to_json()?;
        self.store
            .set(&self.key, &encoded)
            .map_err(TrackerError::Storage)
    }
}

impl<S> StreakTracker<S, SystemClock>
where
    S: KeyValueStore,
{
    /// Tracker using the configured key and calendar zone.
    pub fn from_config(store: S, config: &TrackerConfig) -> Self {
        Self::with_key(store, config.system_clock(), config.storage_key.clone())
    }
}
