use chrono::NaiveDate;
use worddaily_streak::{
    Badge, DEFAULT_STORAGE_KEY, FixedClock, MemoryStore, StreakRecord, StreakTracker,
    VisitTransition,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

type TestTracker = StreakTracker<MemoryStore, FixedClock>;

fn seeded(record: &StreakRecord, today: NaiveDate) -> (TestTracker, FixedClock) {
    let store = MemoryStore::with_value(DEFAULT_STORAGE_KEY, &record.to_json().unwrap());
    let clock = FixedClock::new(today);
    (StreakTracker::new(store, clock.clone()), clock)
}

#[test]
fn seven_consecutive_days_earn_week_streak() {
    let clock = FixedClock::new(day(2024, 6, 1));
    let tracker = StreakTracker::new(MemoryStore::new(), clock.clone());

    let mut last = None;
    for offset in 0..7 {
        if offset > 0 {
            clock.advance_days(1);
        }
        let record = tracker.record_visit().unwrap();
        assert_eq!(record.current_streak, offset + 1);
        if offset < 6 {
            assert!(!record.has_badge("week-streak"));
        }
        last = Some(record);
    }

    let record = last.unwrap();
    assert_eq!(record.current_streak, 7);
    assert_eq!(record.highest_streak, 7);
    assert_eq!(record.total_days_played, 7);
    assert_eq!(record.badges, vec!["week-streak".to_string()]);
}

#[test]
fn gap_resets_streak_but_counts_the_day() {
    let start = StreakRecord {
        current_streak: 9,
        highest_streak: 9,
        total_days_played: 9,
        last_played_date: Some(day(2024, 6, 9)),
        badges: Vec::new(),
    };
    let (tracker, _clock) = seeded(&start, day(2024, 6, 11));

    let report = tracker.record_visit_detailed().unwrap();
    assert_eq!(report.transition, VisitTransition::Reset { elapsed: 2 });
    assert_eq!(report.record.current_streak, 1);
    assert_eq!(report.record.total_days_played, 10);
    assert_eq!(report.record.highest_streak, 9);
    assert_eq!(report.new_badges, vec![Badge::DedicatedLearner]);
    assert!(report.record.has_badge("dedicated-learner"));
    assert!(!report.record.has_badge("week-streak"));
}

#[test]
fn corrupt_value_is_replaced_by_default_record() {
    for raw in ["{not json", "null", r#"{"currentStreak":4,"highestStreak":1}"#] {
        let store = MemoryStore::with_value(DEFAULT_STORAGE_KEY, raw);
        let tracker = StreakTracker::new(store.clone(), FixedClock::new(day(2024, 1, 1)));

        let record = tracker.get_or_initialize().unwrap();
        assert_eq!(record, StreakRecord::default(), "input {raw}");
        let stored = store.raw(DEFAULT_STORAGE_KEY).unwrap();
        assert_eq!(StreakRecord::from_json(&stored).unwrap(), StreakRecord::default());
    }
}

#[test]
fn first_visit_on_corrupt_store_starts_fresh() {
    let store = MemoryStore::with_value(DEFAULT_STORAGE_KEY, "\u{0}garbage");
    let tracker = StreakTracker::new(store, FixedClock::new(day(2024, 1, 1)));
    let report = tracker.record_visit_detailed().unwrap();
    assert_eq!(report.transition, VisitTransition::First);
    assert_eq!(report.record.current_streak, 1);
    assert_eq!(report.record.total_days_played, 1);
}

#[test]
fn initialization_persists_zero_record_once() {
    let store = MemoryStore::new();
    let tracker = StreakTracker::new(store.clone(), FixedClock::new(day(2024, 1, 1)));
    assert_eq!(tracker.get_or_initialize().unwrap(), StreakRecord::default());
    assert_eq!(
        store.raw(DEFAULT_STORAGE_KEY).as_deref(),
        Some(r#"{"currentStreak":0,"lastPlayedDate":"","highestStreak":0,"badges":[],"totalDaysPlayed":0}"#)
    );
    // A second read returns what is stored rather than writing again.
    store.set_read_only(true);
    assert_eq!(tracker.get_or_initialize().unwrap(), StreakRecord::default());
}

#[test]
fn same_and_next_day_unlock_multiple_badges_in_order() {
    let start = StreakRecord {
        current_streak: 29,
        highest_streak: 29,
        total_days_played: 49,
        last_played_date: Some(day(2024, 2, 28)),
        badges: vec!["week-streak".to_string(), "dedicated-learner".to_string()],
    };
    let (tracker, _clock) = seeded(&start, day(2024, 2, 29));
    let report = tracker.record_visit_detailed().unwrap();
    assert_eq!(
        report.new_badges,
        vec![Badge::MonthStreak, Badge::VocabularyEnthusiast]
    );
    assert_eq!(
        report.record.badges,
        vec![
            "week-streak",
            "dedicated-learner",
            "month-streak",
            "vocabulary-enthusiast"
        ]
    );
}

#[test]
fn unknown_stored_badges_survive_updates() {
    let start = StreakRecord {
        current_streak: 1,
        highest_streak: 1,
        total_days_played: 1,
        last_played_date: Some(day(2024, 1, 1)),
        badges: vec!["early-adopter".to_string()],
    };
    let (tracker, clock) = seeded(&start, day(2024, 1, 2));
    for _ in 0..8 {
        tracker.record_visit().unwrap();
        clock.advance_days(1);
    }
    let record = tracker.get_or_initialize().unwrap();
    assert_eq!(record.badges[0], "early-adopter");
    assert!(record.has_badge("week-streak"));
}

#[test]
fn badges_earned_before_a_reset_are_kept() {
    let clock = FixedClock::new(day(2024, 3, 1));
    let tracker = StreakTracker::new(MemoryStore::new(), clock.clone());
    for _ in 0..7 {
        tracker.record_visit().unwrap();
        clock.advance_days(1);
    }
    clock.advance_days(10);
    let record = tracker.record_visit().unwrap();
    assert_eq!(record.current_streak, 1);
    assert_eq!(record.highest_streak, 7);
    assert_eq!(record.badges, vec!["week-streak".to_string()]);
}
