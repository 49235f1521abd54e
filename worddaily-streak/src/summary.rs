//! Read-only views over a record for the home, navigation and achievements screens.

use crate::badges::{Badge, badge_catalog};
use crate::record::StreakRecord;
use serde::Serialize;

/// Streak length at which the navigation streak indicator starts to pulse.
pub const HOT_STREAK_THRESHOLD: u32 = 3;

/// Headline numbers shown on the home page and navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    pub current: u32,
    pub best: u32,
    pub days_played: u32,
    pub badges_earned: usize,
    /// Best streak is worth showing separately ("Best: N days").
    pub show_best: bool,
    pub is_hot: bool,
}

impl From<&StreakRecord> for StreakSummary {
    fn from(record: &StreakRecord) -> Self {
        Self {
            current: record.current_streak,
            best: record.highest_streak,
            days_played: record.total_days_played,
            badges_earned: record.badges.len(),
            show_best: record.highest_streak > record.current_streak,
            is_hot: record.current_streak >= HOT_STREAK_THRESHOLD,
        }
    }
}

/// One catalog badge as seen by a particular learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeProgress {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub earned: bool,
    pub progress: u32,
    pub target: u32,
}

/// Every catalog badge in catalog order, earned or locked.
///
/// Earned status comes from the record's badge list, so a badge stays earned
/// after the streak that unlocked it is broken.
#[must_use]
pub fn achievements(record: &StreakRecord) -> Vec<BadgeProgress> {
    badge_catalog()
        .iter()
        .map(|(badge, info)| {
            let milestone = badge.milestone();
            let target = milestone.target();
            BadgeProgress {
                id: badge.id(),
                name: info.name,
                description: info.description,
                earned: record.has_badge(badge.id()),
                progress: milestone
                    .counter(record.current_streak, record.total_days_played)
                    .min(target),
                target,
            }
        })
        .collect()
}

/// Badges from `record` the catalog does not describe, in stored order.
#[must_use]
pub fn unknown_badges(record: &StreakRecord) -> Vec<&str> {
    record
        .badges
        .iter()
        .map(String::as_str)
        .filter(|id| Badge::from_id(id).is_none())
        .collect()
}

/// Text offered when sharing today's word.
#[must_use]
pub fn share_text(word: &str, definition: &str, record: &StreakRecord) -> String {
    let streak = if record.current_streak > 1 {
        format!("I'm on a {}-day streak! ", record.current_streak)
    } else {
        String::new()
    };
    format!("I learned the word \"{word}\" today: {definition}. {streak}#WordDaily")
}
