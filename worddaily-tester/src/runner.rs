use chrono::NaiveDate;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use worddaily_streak::{StreakRecord, TrackerConfig};

use crate::scenario::{Scenario, ScenarioCtx, find_scenario};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub title: String,
    pub passed: bool,
    pub visits: usize,
    pub failures: Vec<String>,
    pub final_record: Option<StreakRecord>,
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

impl ScenarioResult {
    fn unknown(name: &str) -> Self {
        Self {
            scenario_name: name.to_string(),
            title: "Unknown scenario".to_string(),
            passed: false,
            visits: 0,
            failures: vec![format!("Unknown scenario: {name}")],
            final_record: None,
            duration: Duration::ZERO,
        }
    }
}

pub struct ScenarioRunner {
    start: NaiveDate,
    config: TrackerConfig,
    verbose: bool,
}

impl ScenarioRunner {
    pub const fn new(start: NaiveDate, config: TrackerConfig, verbose: bool) -> Self {
        Self {
            start,
            config,
            verbose,
        }
    }

    /// Run scenarios by key; unknown keys become failed results.
    pub fn run_all(&self, keys: &[String]) -> Vec<ScenarioResult> {
        keys.iter()
            .map(|key| {
                find_scenario(key).map_or_else(
                    || {
                        log::warn!("Unknown scenario `{key}`");
                        ScenarioResult::unknown(key)
                    },
                    |scenario| self.run(&scenario),
                )
            })
            .collect()
    }

    pub fn run(&self, scenario: &Scenario) -> ScenarioResult {
        if self.verbose {
            println!(
                "🧪 Running scenario: {} (start {})",
                scenario.title.bright_white(),
                self.start
            );
        }
        let mut ctx = ScenarioCtx::new(self.start, &self.config, self.verbose);
        let started = Instant::now();
        let outcome = (scenario.run)(&mut ctx);
        let duration = started.elapsed();

        let failures = match outcome {
            Ok(()) => Vec::new(),
            Err(err) => {
                log::debug!("Scenario `{}` failed: {err:#}", scenario.key);
                vec![format!("{err:#}")]
            }
        };
        // Read back without initializing so a failing scenario's store is reported as-is.
        let final_record = ctx.tracker.load().ok().flatten();

        ScenarioResult {
            scenario_name: scenario.key.to_string(),
            title: scenario.title.to_string(),
            passed: failures.is_empty(),
            visits: ctx.visits(),
            failures,
            final_record,
            duration,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs_f64().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
