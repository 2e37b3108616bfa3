//! Tests for spaced-repetition scheduling
//!
//! Covers:
//! - The exact ease/interval/repetition walk for a run of perfect recalls
//! - Reset semantics when a recall fails
//! - Score-to-quality discretization at the boundaries
//! - Due-date arithmetic

use chrono::NaiveDate;
use sensei::scheduler::{
    quality_from_score, ReviewState, INITIAL_EASE_FACTOR, MIN_EASE_FACTOR,
};

const EPS: f64 = 1e-9;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Review Walk Tests
// ============================================================================

mod review_walk_tests {
    use super::*;

    #[test]
    fn test_three_perfect_recalls_follow_the_canonical_walk() {
        let state = ReviewState::default();
        assert!((state.ease_factor - INITIAL_EASE_FACTOR).abs() < EPS);

        // First pass: ease 2.5 -> 2.6, interval pinned to 1 day
        let state = state.review(100);
        assert_eq!(state.repetitions, 1);
        assert_eq!(state.interval_days, 1);
        assert!((state.ease_factor - 2.6).abs() < EPS);

        // Second pass: ease -> 2.7, interval pinned to 6 days
        let state = state.review(100);
        assert_eq!(state.repetitions, 2);
        assert_eq!(state.interval_days, 6);
        assert!((state.ease_factor - 2.7).abs() < EPS);

        // Third pass: ease -> 2.8, interval = round(6 * 2.8) = 17
        let state = state.review(100);
        assert_eq!(state.repetitions, 3);
        assert_eq!(state.interval_days, 17);
        assert!((state.ease_factor - 2.8).abs() < EPS);
    }

    #[test]
    fn test_failed_recall_resets_but_keeps_the_ease_penalty() {
        let mut state = ReviewState::default();
        for _ in 0..3 {
            state = state.review(100);
        }
        assert!((state.ease_factor - 2.8).abs() < EPS);

        // Score 40 maps to q=2: 2.8 + (0.1 - 3 * 0.14) = 2.48
        let state = state.review(40);
        assert_eq!(state.repetitions, 0);
        assert_eq!(state.interval_days, 1);
        assert!((state.ease_factor - 2.48).abs() < EPS);

        // Recovery restarts the interval ladder from one day
        let state = state.review(100);
        assert_eq!(state.repetitions, 1);
        assert_eq!(state.interval_days, 1);
        assert!((state.ease_factor - 2.58).abs() < EPS);
    }

    #[test]
    fn test_ease_never_drops_below_the_floor() {
        let mut state = ReviewState::default();
        for _ in 0..30 {
            state = state.review(0);
        }
        assert!((state.ease_factor - MIN_EASE_FACTOR).abs() < EPS);
        assert_eq!(state.interval_days, 1);
    }

    #[test]
    fn test_barely_passing_recall_still_advances() {
        // Score 60 maps to q=3, the lowest passing quality
        let state = ReviewState::default().review(60);
        assert_eq!(state.repetitions, 1);
        assert_eq!(state.interval_days, 1);
        // q=3 applies 0.1 - 2 * 0.12 = -0.14
        assert!((state.ease_factor - 2.36).abs() < EPS);
    }
}

// ============================================================================
// Quality Mapping Tests
// ============================================================================

mod quality_tests {
    use super::*;

    #[test]
    fn test_score_boundaries_map_to_expected_qualities() {
        assert_eq!(quality_from_score(0), 0);
        assert_eq!(quality_from_score(20), 1);
        assert_eq!(quality_from_score(40), 2);
        assert_eq!(quality_from_score(60), 3);
        assert_eq!(quality_from_score(80), 4);
        assert_eq!(quality_from_score(100), 5);
    }

    #[test]
    fn test_scores_above_100_are_clamped() {
        assert_eq!(quality_from_score(101), 5);
        assert_eq!(quality_from_score(u32::MAX), 5);
    }

    #[test]
    fn test_quality_is_monotone_in_score() {
        let mut last = 0;
        for score in 0..=100 {
            let q = quality_from_score(score);
            assert!(q >= last, "quality dipped at score {}", score);
            last = q;
        }
    }
}

// ============================================================================
// Due Date Tests
// ============================================================================

mod due_date_tests {
    use super::*;

    #[test]
    fn test_due_date_advances_by_the_interval() {
        let state = ReviewState {
            ease_factor: 2.6,
            interval_days: 17,
            repetitions: 3,
        };
        assert_eq!(state.due_from(day(2026, 8, 26)), day(2026, 9, 12));
    }

    #[test]
    fn test_new_card_is_due_tomorrow_after_first_pass() {
        let state = ReviewState::default().review(100);
        assert_eq!(state.due_from(day(2026, 2, 28)), day(2026, 3, 1));
    }
}
