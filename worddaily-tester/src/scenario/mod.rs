use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::Colorize;
use worddaily_streak::{
    FixedClock, MemoryStore, StreakRecord, StreakTracker, TrackerConfig, VisitReport,
};

pub mod catalog;

pub use catalog::{find_scenario, list_scenarios};

pub type ScenarioFn = fn(&mut ScenarioCtx) -> Result<()>;

#[derive(Clone, Copy)]
pub struct Scenario {
    pub key: &'static str,
    pub title: &'static str,
    pub run: ScenarioFn,
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("key", &self.key)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Isolated tracker, store and clock for one scenario run.
pub struct ScenarioCtx {
    pub store: MemoryStore,
    pub clock: FixedClock,
    pub tracker: StreakTracker<MemoryStore, FixedClock>,
    visits: usize,
    verbose: bool,
}

impl ScenarioCtx {
    #[must_use]
    pub fn new(start: NaiveDate, config: &TrackerConfig, verbose: bool) -> Self {
        let store = MemoryStore::new();
        let clock = FixedClock::new(start);
        let tracker =
            StreakTracker::with_key(store.clone(), clock.clone(), config.storage_key.clone());
        Self {
            store,
            clock,
            tracker,
            visits: 0,
            verbose,
        }
    }

    #[must_use]
    pub const fn visits(&self) -> usize {
        self.visits
    }

    /// Record a visit on the clock's current day.
    pub fn visit(&mut self) -> Result<VisitReport> {
        let report = self
            .tracker
            .record_visit_detailed()
            .with_context(|| format!("visit on {}", self.clock_today()))?;
        self.visits += 1;
        if self.verbose {
            println!(
                "   {} {} → streak {} / best {} / days {}",
                "↳".dimmed(),
                self.clock_today(),
                report.record.current_streak,
                report.record.highest_streak,
                report.record.total_days_played
            );
        }
        Ok(report)
    }

    /// Move the clock by `days` and record a visit.
    pub fn visit_after(&mut self, days: i64) -> Result<VisitReport> {
        self.clock.advance_days(days);
        self.visit()
    }

    /// Overwrite the stored record.
    pub fn seed(&self, record: &StreakRecord) -> Result<()> {
        let raw = record.to_json().context("encoding seed record")?;
        self.seed_raw(&raw);
        Ok(())
    }

    pub fn seed_raw(&self, raw: &str) {
        self.store.insert_raw(self.tracker.storage_key(), raw);
    }

    pub fn record(&self) -> Result<StreakRecord> {
        Ok(self.tracker.get_or_initialize()?)
    }

    #[must_use]
    pub fn stored_raw(&self) -> Option<String> {
        self.store.raw(self.tracker.storage_key())
    }

    #[must_use]
    pub fn clock_today(&self) -> NaiveDate {
        self.tracker.today()
    }
}
