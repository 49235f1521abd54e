use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use crate::runner::ScenarioResult;

fn success_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let rate = (passed as f64 / total as f64) * 100.0;
    rate
}

pub fn write_console_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Streak Scenario Results".bright_cyan().bold())?;
    writeln!(out, "{}", "==========================".cyan())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = total - passed;

    writeln!(out, "Total scenarios: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", failed.to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(passed, total))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{status} {} ({})", result.scenario_name.bold(), result.title)?;
        writeln!(out, "   Visits: {}", result.visits)?;
        if let Some(record) = &result.final_record {
            writeln!(
                out,
                "   Final: streak {} / best {} / days {} / badges [{}]",
                record.current_streak,
                record.highest_streak,
                record.total_days_played,
                record.badges.join(", ")
            )?;
        }
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_json_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn write_markdown_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "# Word Daily Streak Scenario Results\n")?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total scenarios**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}", total - passed)?;
    writeln!(out, "- **Success rate**: {:.1}%\n", success_rate(passed, total))?;

    writeln!(out, "## Scenarios\n")?;
    writeln!(out, "| Status | Scenario | Visits | Streak | Best | Days | Badges |")?;
    writeln!(out, "|---|---|---|---|---|---|---|")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        let (streak, best, days, badges) = result.final_record.as_ref().map_or_else(
            || ("-".to_string(), "-".to_string(), "-".to_string(), String::new()),
            |r| {
                (
                    r.current_streak.to_string(),
                    r.highest_streak.to_string(),
                    r.total_days_played.to_string(),
                    r.badges.join(", "),
                )
            },
        );
        writeln!(
            out,
            "| {status} | {} | {} | {streak} | {best} | {days} | {badges} |",
            result.scenario_name, result.visits
        )?;
    }

    let failing: Vec<_> = results.iter().filter(|r| !r.passed).collect();
    if !failing.is_empty() {
        writeln!(out, "\n## Failures\n")?;
        for result in failing {
            for failure in &result.failures {
                writeln!(out, "- `{}`: {failure}", result.scenario_name)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use worddaily_streak::StreakRecord;

    fn sample() -> Vec<ScenarioResult> {
        vec![
            ScenarioResult {
                scenario_name: "week-streak".into(),
                title: "Seven Consecutive Days".into(),
                passed: true,
                visits: 7,
                failures: Vec::new(),
                final_record: Some(StreakRecord {
                    current_streak: 7,
                    highest_streak: 7,
                    total_days_played: 7,
                    badges: vec!["week-streak".into()],
                    last_played_date: None,
                }),
                duration: Duration::from_millis(2),
            },
            ScenarioResult {
                scenario_name: "gap-reset".into(),
                title: "Two-Day Gap Resets the Streak".into(),
                passed: false,
                visits: 1,
                failures: vec!["current streak 2".into()],
                final_record: None,
                duration: Duration::from_millis(1),
            },
        ]
    }

    #[test]
    fn markdown_lists_rows_and_failures() {
        let mut buf = Vec::new();
        write_markdown_report(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("| ✅ | week-streak | 7 | 7 | 7 | 7 | week-streak |"));
        assert!(text.contains("| ❌ | gap-reset | 1 | - | - | - |  |"));
        assert!(text.contains("- `gap-reset`: current streak 2"));
        assert!(text.contains("**Success rate**: 50.0%"));
    }

    #[test]
    fn json_report_is_an_array() {
        let mut buf = Vec::new();
        write_json_report(&mut buf, &sample()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["final_record"]["currentStreak"], 7);
    }

    #[test]
    fn console_report_handles_empty_results() {
        let mut buf = Vec::new();
        write_console_report(&mut buf, &[], Duration::ZERO).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("Total scenarios: 0"));
        assert!(text.contains("Success rate: 0.0%"));
    }
}
