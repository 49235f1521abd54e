//! Badge catalog and milestone rules.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Achievement a learner can unlock once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Badge {
    WeekStreak,
    MonthStreak,
    CenturyStreak,
    DedicatedLearner,
    VocabularyEnthusiast,
}

/// Counter threshold a badge is tied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    /// Reached when the current streak is at least this long.
    Streak(u32),
    /// Reached when this many distinct days have been played.
    TotalDays(u32),
}

impl Milestone {
    #[must_use]
    pub const fn target(self) -> u32 {
        match self {
            Self::Streak(target) | Self::TotalDays(target) => target,
        }
    }

    /// The counter this milestone watches, picked from the record's values.
    #[must_use]
    pub const fn counter(self, current_streak: u32, total_days: u32) -> u32 {
        match self {
            Self::Streak(_) => current_streak,
            Self::TotalDays(_) => total_days,
        }
    }

    #[must_use]
    pub const fn is_reached(self, current_streak: u32, total_days: u32) -> bool {
        self.counter(current_streak, total_days) >= self.target()
    }
}

impl Badge {
    /// Every badge, in evaluation order: streak milestones first, then
    /// total-days milestones, each ascending.
    pub const ALL: [Self; 5] = [
        Self::WeekStreak,
        Self::MonthStreak,
        Self::CenturyStreak,
        Self::DedicatedLearner,
        Self::VocabularyEnthusiast,
    ];

    /// Identifier stored in the record.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::WeekStreak => "week-streak",
            Self::MonthStreak => "month-streak",
            Self::CenturyStreak => "century-streak",
            Self::DedicatedLearner => "dedicated-learner",
            Self::VocabularyEnthusiast => "vocabulary-enthusiast",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|badge| badge.id() == id)
    }

    #[must_use]
    pub const fn milestone(self) -> Milestone {
        match self {
            Self::WeekStreak => Milestone::Streak(7),
            Self::MonthStreak => Milestone::Streak(30),
            Self::CenturyStreak => Milestone::Streak(100),
            Self::DedicatedLearner => Milestone::TotalDays(10),
            Self::VocabularyEnthusiast => Milestone::TotalDays(50),
        }
    }

    #[must_use]
    pub const fn info(self) -> BadgeInfo {
        match self {
            Self::WeekStreak => BadgeInfo {
                name: "7-Day Streak",
                description: "Visited Word Daily for 7 consecutive days",
            },
            Self::MonthStreak => BadgeInfo {
                name: "30-Day Streak",
                description: "Maintained a learning streak for a full month",
            },
            Self::CenturyStreak => BadgeInfo {
                name: "100-Day Streak",
                description: "An impressive vocabulary journey of 100 consecutive days",
            },
            Self::DedicatedLearner => BadgeInfo {
                name: "Dedicated Learner",
                description: "Explored at least 10 daily words",
            },
            Self::VocabularyEnthusiast => BadgeInfo {
                name: "Vocabulary Enthusiast",
                description: "Studied 50 or more daily words",
            },
        }
    }
}

/// Display metadata for a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Display text for any badge identifier, including ones the catalog does
/// not know. Unknown ids are labelled with the id itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeLabel<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub known: bool,
}

/// Immutable id → info mapping shared by the whole process.
#[derive(Debug)]
pub struct BadgeCatalog {
    entries: [(Badge, BadgeInfo); 5],
}

static CATALOG: BadgeCatalog = BadgeCatalog {
    entries: [
        (Badge::WeekStreak, Badge::WeekStreak.info()),
        (Badge::MonthStreak, Badge::MonthStreak.info()),
        (Badge::CenturyStreak, Badge::CenturyStreak.info()),
        (Badge::DedicatedLearner, Badge::DedicatedLearner.info()),
        (
            Badge::VocabularyEnthusiast,
            Badge::VocabularyEnthusiast.info(),
        ),
    ],
};

/// The static badge catalog.
#[must_use]
pub fn badge_catalog() -> &'static BadgeCatalog {
    &CATALOG
}

impl BadgeCatalog {
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&BadgeInfo> {
        self.entries
            .iter()
            .find(|(badge, _)| badge.id() == id)
            .map(|(_, info)| info)
    }

    /// Label for `id`, falling back to the raw identifier when unknown.
    #[must_use]
    pub fn label<'a>(&'a self, id: &'a str) -> BadgeLabel<'a> {
        self.get(id).map_or(
            BadgeLabel {
                id,
                name: id,
                description: "",
                known: false,
            },
            |info| BadgeLabel {
                id,
                name: info.name,
                description: info.description,
                known: true,
            },
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (Badge, &BadgeInfo)> + '_ {
        self.entries.iter().map(|(badge, info)| (*badge, info))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for BadgeCatalog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (badge, info) in &self.entries {
            map.serialize_entry(badge.id(), info)?;
        }
        map.end()
    }
}

/// Badges reached by the given counters that `existing` does not hold yet,
/// in evaluation order.
#[must_use]
pub fn newly_unlocked(current_streak: u32, total_days: u32, existing: &[String]) -> Vec<Badge> {
    Badge::ALL
        .into_iter()
        .filter(|badge| badge.milestone().is_reached(current_streak, total_days))
        .filter(|badge| !existing.iter().any(|held| held == badge.id()))
        .collect()
}
