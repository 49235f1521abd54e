use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;
use worddaily_streak::{CalendarZone, TrackerConfig, parse_day};

use crate::scenario::list_scenarios;

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Expand `all` into every catalog key, keeping the other requested names.
pub fn expand_scenarios(arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(arg);
    if scenarios.iter().any(|s| s.eq_ignore_ascii_case("all")) {
        scenarios.retain(|s| !s.eq_ignore_ascii_case("all"));
        for (key, _) in list_scenarios() {
            if !scenarios.iter().any(|s| s == key) {
                scenarios.push(key.to_string());
            }
        }
    }
    scenarios
}

pub fn parse_start(raw: &str) -> Result<NaiveDate> {
    parse_day(raw).with_context(|| format!("invalid start date `{raw}` (expected YYYY-MM-DD)"))
}

pub fn load_config(path: Option<&Path>) -> Result<TrackerConfig> {
    let Some(path) = path else {
        return Ok(TrackerConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    TrackerConfig::from_json(&raw).with_context(|| format!("invalid config {}", path.display()))
}

/// Calendar zone from the config that the simulated scenario clock overrides.
pub fn ignored_calendar_zone(config: &TrackerConfig) -> Option<CalendarZone> {
    (config.calendar != CalendarZone::default()).then_some(config.calendar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_filters() {
        let parts = split_csv(" smoke, ,week-streak,  century ");
        assert_eq!(parts, vec!["smoke", "week-streak", "century"]);
    }

    #[test]
    fn all_expands_to_catalog_without_duplicates() {
        let expanded = expand_scenarios("smoke,all");
        assert_eq!(expanded[0], "smoke");
        assert_eq!(expanded.len(), list_scenarios().len());
    }

    #[test]
    fn start_date_must_be_iso() {
        assert_eq!(
            parse_start("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_start("02/29/2024").is_err());
    }

    #[test]
    fn config_file_is_loaded_and_validated() {
        let dir = std::env::temp_dir().join(format!(
            "worddaily-config-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let good = dir.join("good.json");
        std::fs::write(&good, r#"{"storage_key":"qa.streak"}"#).unwrap();
        assert_eq!(load_config(Some(&good)).unwrap().storage_key, "qa.streak");

        let bad = dir.join("bad.json");
        std::fs::write(&bad, r#"{"storage_key":""}"#).unwrap();
        assert!(load_config(Some(&bad)).is_err());
        assert!(load_config(Some(&dir.join("missing.json"))).is_err());
        assert_eq!(load_config(None).unwrap(), TrackerConfig::default());
    }

    #[test]
    fn only_non_default_zones_are_reported_as_ignored() {
        assert_eq!(ignored_calendar_zone(&TrackerConfig::default()), None);
        let config = TrackerConfig {
            calendar: CalendarZone::FixedOffsetMinutes(-300),
            ..TrackerConfig::default()
        };
        assert_eq!(
            ignored_calendar_zone(&config),
            Some(CalendarZone::FixedOffsetMinutes(-300))
        );
    }
}
