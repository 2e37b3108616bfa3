// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Experience points, levels, streaks, and achievements

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// XP and Levels
// =============================================================================

/// Cumulative XP required to reach each level
pub const LEVEL_THRESHOLDS: [i64; 7] = [0, 100, 250, 500, 1000, 2000, 5000];

/// XP granted per correct quiz or exam answer
pub const XP_PER_CORRECT: i64 = 10;

/// Bonus XP for a perfect quiz
pub const XP_PERFECT_BONUS: i64 = 25;

/// XP granted per reviewed card
pub const XP_PER_REVIEW: i64 = 5;

/// Level for a cumulative XP total.
///
/// The level is the highest satisfied index in the threshold table,
/// floored at 1 and capped by the table's last index.
pub fn level_for_xp(xp: i64) -> u32 {
    let mut highest = 0usize;
    for (i, threshold) in LEVEL_THRESHOLDS.iter().enumerate() {
        if xp >= *threshold {
            highest = i;
        }
    }
    highest.max(1) as u32
}

/// XP still needed to reach the next level, or `None` at the cap
pub fn xp_to_next_level(xp: i64) -> Option<i64> {
    let next = level_for_xp(xp) as usize + 1;
    LEVEL_THRESHOLDS.get(next).map(|threshold| threshold - xp)
}

// =============================================================================
// Streaks
// =============================================================================

/// Update a streak-day counter for a study event on `today`.
///
/// Studying on consecutive calendar days extends the streak by one;
/// a second session on an already-recorded day leaves it unchanged;
/// any gap restarts it at one.
pub fn updated_streak(current: u32, last_study: Option<NaiveDate>, today: NaiveDate) -> u32 {
    match last_study {
        Some(last) if last == today => current.max(1),
        Some(last) if (today - last).num_days() == 1 => current + 1,
        _ => 1,
    }
}

// =============================================================================
// Achievements
// =============================================================================

/// Fixed achievement catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Achievement {
    FirstQuiz,
    PerfectQuiz,
    WeekStreak,
    LevelFive,
    FiftyReviews,
}

impl Achievement {
    /// All achievements in display order
    pub fn all() -> [Achievement; 5] {
        [
            Self::FirstQuiz,
            Self::PerfectQuiz,
            Self::WeekStreak,
            Self::LevelFive,
            Self::FiftyReviews,
        ]
    }

    /// Stable identifier used as the storage key
    pub fn id(&self) -> &'static str {
        match self {
            Self::FirstQuiz => "first-quiz",
            Self::PerfectQuiz => "perfect-quiz",
            Self::WeekStreak => "week-streak",
            Self::LevelFive => "level-five",
            Self::FiftyReviews => "fifty-reviews",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::FirstQuiz => "First Steps",
            Self::PerfectQuiz => "Flawless",
            Self::WeekStreak => "Week of Focus",
            Self::LevelFive => "Scholar",
            Self::FiftyReviews => "Deck Veteran",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::FirstQuiz => "Complete your first quiz",
            Self::PerfectQuiz => "Score 100% on a quiz",
            Self::WeekStreak => "Study 7 days in a row",
            Self::LevelFive => "Reach level 5",
            Self::FiftyReviews => "Review 50 cards",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().into_iter().find(|a| a.id() == id)
    }
}

/// Aggregated study totals fed into achievement checks
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressSnapshot {
    pub xp: i64,
    pub streak_days: u32,
    pub quizzes_taken: i64,
    pub perfect_quizzes: i64,
    pub cards_reviewed: i64,
}

/// Achievements whose conditions the snapshot satisfies
pub fn earned_achievements(snapshot: &ProgressSnapshot) -> Vec<Achievement> {
    let mut earned = Vec::new();

    if snapshot.quizzes_taken >= 1 {
        earned.push(Achievement::FirstQuiz);
    }
    if snapshot.perfect_quizzes >= 1 {
        earned.push(Achievement::PerfectQuiz);
    }
    if snapshot.streak_days >= 7 {
        earned.push(Achievement::WeekStreak);
    }
    if level_for_xp(snapshot.xp) >= 5 {
        earned.push(Achievement::LevelFive);
    }
    if snapshot.cards_reviewed >= 50 {
        earned.push(Achievement::FiftyReviews);
    }

    earned
}
