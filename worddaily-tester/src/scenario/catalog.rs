use anyhow::{Result, ensure};
use std::collections::HashSet;
use worddaily_streak::{Badge, StreakRecord, VisitTransition};

use super::{Scenario, ScenarioCtx};

const SCENARIOS: &[Scenario] = &[
    Scenario {
        key: "smoke",
        title: "Smoke Test",
        run: smoke,
    },
    Scenario {
        key: "first-visit",
        title: "First Visit Starts a Streak",
        run: first_visit,
    },
    Scenario {
        key: "same-day",
        title: "Repeat Visits Are Idempotent",
        run: same_day,
    },
    Scenario {
        key: "week-streak",
        title: "Seven Consecutive Days",
        run: week_streak,
    },
    Scenario {
        key: "gap-reset",
        title: "Two-Day Gap Resets the Streak",
        run: gap_reset,
    },
    Scenario {
        key: "clock-skew",
        title: "Clock Moved Backward",
        run: clock_skew,
    },
    Scenario {
        key: "corrupt-recovery",
        title: "Corrupt Record Recovery",
        run: corrupt_recovery,
    },
    Scenario {
        key: "badge-order",
        title: "Simultaneous Badge Unlock Order",
        run: badge_order,
    },
    Scenario {
        key: "century",
        title: "Hundred-Day Streak",
        run: century,
    },
    Scenario {
        key: "long-haul",
        title: "Year of Irregular Visits",
        run: long_haul,
    },
];

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS.iter().map(|s| (s.key, s.title)).collect()
}

#[must_use]
pub fn find_scenario(key: &str) -> Option<Scenario> {
    let key = key.trim().to_lowercase();
    SCENARIOS.iter().copied().find(|s| s.key == key)
}

fn smoke(ctx: &mut ScenarioCtx) -> Result<()> {
    let first = ctx.visit()?;
    ensure!(
        first.transition == VisitTransition::First,
        "expected first visit, got {:?}",
        first.transition
    );
    let next = ctx.visit_after(1)?;
    ensure!(
        next.record.current_streak == 2,
        "expected streak 2, got {}",
        next.record.current_streak
    );
    let again = ctx.visit()?;
    ensure!(again.record == next.record, "same-day visit changed the record");
    Ok(())
}

fn first_visit(ctx: &mut ScenarioCtx) -> Result<()> {
    ensure!(!ctx.tracker.has_visited_today()?, "fresh store reports a visit");
    ensure!(ctx.stored_raw().is_none(), "visit check initialized storage");

    let initial = ctx.record()?;
    ensure!(initial == StreakRecord::default(), "initial record is not zeroed: {initial:?}");

    let record = ctx.visit()?.record;
    ensure!(record.current_streak == 1, "current streak {}", record.current_streak);
    ensure!(record.total_days_played == 1, "total days {}", record.total_days_played);
    ensure!(record.highest_streak == 1, "highest streak {}", record.highest_streak);
    ensure!(ctx.tracker.has_visited_today()?, "visit not recorded for today");
    Ok(())
}

fn same_day(ctx: &mut ScenarioCtx) -> Result<()> {
    let first = ctx.visit()?.record;
    for _ in 0..3 {
        let report = ctx.visit()?;
        ensure!(report.transition == VisitTransition::SameDay, "expected same-day no-op");
        ensure!(report.record == first, "repeat visit changed the record");
    }
    Ok(())
}

fn week_streak(ctx: &mut ScenarioCtx) -> Result<()> {
    ctx.visit()?;
    for _ in 1..7 {
        ctx.visit_after(1)?;
    }
    let record = ctx.record()?;
    ensure!(record.current_streak == 7, "current streak {}", record.current_streak);
    ensure!(record.has_badge(Badge::WeekStreak.id()), "week-streak missing: {:?}", record.badges);
    Ok(())
}

fn gap_reset(ctx: &mut ScenarioCtx) -> Result<()> {
    let day9 = ctx.clock_today();
    ctx.seed(&StreakRecord {
        current_streak: 9,
        highest_streak: 9,
        total_days_played: 9,
        last_played_date: Some(day9),
        badges: Vec::new(),
    })?;

    let record = ctx.visit_after(2)?.record;
    ensure!(record.current_streak == 1, "current streak {}", record.current_streak);
    ensure!(record.total_days_played == 10, "total days {}", record.total_days_played);
    ensure!(record.highest_streak == 9, "highest streak {}", record.highest_streak);
    ensure!(
        record.has_badge(Badge::DedicatedLearner.id()),
        "dedicated-learner missing: {:?}",
        record.badges
    );
    ensure!(!record.has_badge(Badge::WeekStreak.id()), "week-streak awarded after a reset");
    Ok(())
}

fn clock_skew(ctx: &mut ScenarioCtx) -> Result<()> {
    ctx.visit()?;
    ctx.visit_after(1)?;
    let report = ctx.visit_after(-3)?;
    ensure!(
        report.transition == VisitTransition::Reset { elapsed: -3 },
        "expected reset, got {:?}",
        report.transition
    );
    ensure!(report.record.current_streak == 1, "streak not reset");
    ensure!(report.record.highest_streak == 2, "highest streak lost");
    ensure!(report.record.total_days_played == 3, "total days {}", report.record.total_days_played);
    Ok(())
}

fn corrupt_recovery(ctx: &mut ScenarioCtx) -> Result<()> {
    ctx.seed_raw("{\"currentStreak\": \"lots\"");
    let record = ctx.record()?;
    ensure!(record == StreakRecord::default(), "corrupt value not replaced: {record:?}");
    let stored = ctx.stored_raw().unwrap_or_default();
    ensure!(
        StreakRecord::from_json(&stored).is_ok(),
        "store still holds an unreadable record: {stored}"
    );
    let record = ctx.visit()?.record;
    ensure!(record.current_streak == 1, "visit after recovery did not start fresh");
    Ok(())
}

fn badge_order(ctx: &mut ScenarioCtx) -> Result<()> {
    let yesterday = ctx.clock_today();
    ctx.seed(&StreakRecord {
        current_streak: 29,
        highest_streak: 29,
        total_days_played: 49,
        last_played_date: Some(yesterday),
        badges: vec![
            Badge::WeekStreak.id().to_string(),
            Badge::DedicatedLearner.id().to_string(),
        ],
    })?;
    let report = ctx.visit_after(1)?;
    ensure!(
        report.new_badges == vec![Badge::MonthStreak, Badge::VocabularyEnthusiast],
        "unexpected unlocks {:?}",
        report.new_badges
    );
    Ok(())
}

fn century(ctx: &mut ScenarioCtx) -> Result<()> {
    ctx.visit()?;
    for _ in 1..100 {
        ctx.visit_after(1)?;
    }
    let record = ctx.record()?;
    ensure!(record.current_streak == 100, "current streak {}", record.current_streak);
    for badge in Badge::ALL {
        ensure!(record.has_badge(badge.id()), "{} missing", badge.id());
    }
    Ok(())
}

fn long_haul(ctx: &mut ScenarioCtx) -> Result<()> {
    let mut before = ctx.record()?;
    for day in 0..365_i64 {
        // Skip every tenth day and revisit on every seventh.
        let gap = match (day % 10, day % 7) {
            (_, 0) if day > 0 => 0,
            (9, _) => 2,
            _ => 1,
        };
        let after = if day == 0 {
            ctx.visit()?.record
        } else {
            ctx.visit_after(gap)?.record
        };
        check_step(&before, &after)?;
        before = after;
    }
    Ok(())
}

fn check_step(before: &StreakRecord, after: &StreakRecord) -> Result<()> {
    ensure!(after.highest_streak >= after.current_streak, "highest below current: {after:?}");
    ensure!(after.highest_streak >= before.highest_streak, "highest streak decreased");
    ensure!(after.total_days_played >= before.total_days_played, "total days decreased");
    ensure!(
        before.badges.iter().all(|b| after.badges.contains(b)),
        "badges shrank"
    );
    let unique: HashSet<_> = after.badges.iter().collect();
    ensure!(unique.len() == after.badges.len(), "duplicate badges: {:?}", after.badges);
    Ok(())
}
