// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Spaced-repetition scheduling (SuperMemo-2)
//!
//! Pure functions over a card's review state. Scores arrive as 0-100
//! percentages and are discretized to the 0-5 SM-2 quality scale.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Ease factor assigned to brand-new cards
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Lower bound the ease factor can never drop below
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Quality threshold under which a recall counts as failed
pub const PASSING_QUALITY: u8 = 3;

/// Scheduling state carried by every card
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    /// Per-card multiplier controlling how quickly intervals grow
    pub ease_factor: f64,
    /// Days until the next review
    pub interval_days: i64,
    /// Consecutive successful recalls
    pub repetitions: u32,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            ease_factor: INITIAL_EASE_FACTOR,
            interval_days: 1,
            repetitions: 0,
        }
    }
}

impl ReviewState {
    /// Apply one review outcome and produce the updated state.
    ///
    /// A failing quality (q < 3) restarts the card: repetitions drop to
    /// zero and the interval resets to one day. The ease factor is updated
    /// on every review, pass or fail, and never drops below 1.3.
    pub fn review(&self, score: u32) -> ReviewState {
        let q = quality_from_score(score);
        let miss = f64::from(5 - q);
        let ease_factor =
            (self.ease_factor + (0.1 - miss * (0.08 + miss * 0.02))).max(MIN_EASE_FACTOR);

        if q < PASSING_QUALITY {
            return ReviewState {
                ease_factor,
                interval_days: 1,
                repetitions: 0,
            };
        }

        let repetitions = self.repetitions + 1;
        let interval_days = match repetitions {
            1 => 1,
            2 => 6,
            _ => (self.interval_days as f64 * ease_factor).round() as i64,
        };

        ReviewState {
            ease_factor,
            interval_days,
            repetitions,
        }
    }

    /// Date the card next comes due, counting from `today`
    pub fn due_from(&self, today: NaiveDate) -> NaiveDate {
        today + Duration::days(self.interval_days)
    }
}

/// Discretize a 0-100 percentage score to the 0-5 SM-2 quality scale
pub fn quality_from_score(score: u32) -> u8 {
    let clamped = score.min(100) as f64;
    (clamped / 100.0 * 5.0).round() as u8
}
