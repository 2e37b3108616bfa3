//! Tests for the SQLite study store
//!
//! Covers:
//! - Schema bootstrap and persistence across reopen
//! - Profile counters, streak recording, and XP accumulation
//! - Subject difficulty and score history
//! - Card queries by due date, subject, and limit
//! - Attempt history ordering and achievement unlock idempotency

use chrono::NaiveDate;
use sensei::error::SenseiError;
use sensei::models::Difficulty;
use sensei::scheduler::ReviewState;
use sensei::storage::{Attempt, AttemptKind, Card, StudyStore};
use tempfile::TempDir;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Persistence Tests
// ============================================================================

mod persistence_tests {
    use super::*;

    #[test]
    fn test_state_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("study").join("sensei.db");

        {
            let store = StudyStore::open(&db_path).unwrap();
            store.add_xp(120).unwrap();
            store.record_study_day(day(2026, 8, 25)).unwrap();
            store.set_difficulty("rust", Difficulty::Hard).unwrap();
        }

        let store = StudyStore::open(&db_path).unwrap();
        let profile = store.profile().unwrap();
        assert_eq!(profile.xp, 120);
        assert_eq!(profile.streak_days, 1);
        assert_eq!(profile.last_study_date, Some(day(2026, 8, 25)));
        assert_eq!(store.difficulty("rust").unwrap(), Difficulty::Hard);
    }

    #[test]
    fn test_reopen_does_not_reset_the_profile() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("sensei.db");

        StudyStore::open(&db_path).unwrap().add_xp(55).unwrap();
        // A second bootstrap must not insert a fresh profile row
        let store = StudyStore::open(&db_path).unwrap();
        assert_eq!(store.profile().unwrap().xp, 55);
    }
}

// ============================================================================
// Profile Tests
// ============================================================================

mod profile_tests {
    use super::*;

    #[test]
    fn test_streak_walk_through_the_calendar() {
        let store = StudyStore::open_in_memory().unwrap();

        assert_eq!(store.record_study_day(day(2026, 8, 20)).unwrap(), 1);
        assert_eq!(store.record_study_day(day(2026, 8, 21)).unwrap(), 2);
        // Second session the same day changes nothing
        assert_eq!(store.record_study_day(day(2026, 8, 21)).unwrap(), 2);
        assert_eq!(store.record_study_day(day(2026, 8, 22)).unwrap(), 3);
        // Skipping the 23rd restarts the count
        assert_eq!(store.record_study_day(day(2026, 8, 24)).unwrap(), 1);

        let profile = store.profile().unwrap();
        assert_eq!(profile.streak_days, 1);
        assert_eq!(profile.last_study_date, Some(day(2026, 8, 24)));
    }

    #[test]
    fn test_reviewed_card_counter_accumulates() {
        let store = StudyStore::open_in_memory().unwrap();
        store.add_reviewed_cards(3).unwrap();
        store.add_reviewed_cards(4).unwrap();
        assert_eq!(store.profile().unwrap().cards_reviewed, 7);
    }
}

// ============================================================================
// Subject Tests
// ============================================================================

mod subject_tests {
    use super::*;

    #[test]
    fn test_unknown_subject_defaults_to_medium() {
        let store = StudyStore::open_in_memory().unwrap();
        assert_eq!(store.difficulty("never-seen").unwrap(), Difficulty::Medium);
    }

    #[test]
    fn test_score_history_counts_attempts() {
        let store = StudyStore::open_in_memory().unwrap();
        store.record_subject_score("physics", 80).unwrap();
        store.record_subject_score("physics", 95).unwrap();
        store.record_subject_score("chemistry", 60).unwrap();

        let subjects = store.list_subjects().unwrap();
        assert_eq!(subjects.len(), 2);

        let physics = subjects.iter().find(|s| s.name == "physics").unwrap();
        assert_eq!(physics.last_score, Some(95));
        assert_eq!(physics.attempts, 2);

        let chemistry = subjects.iter().find(|s| s.name == "chemistry").unwrap();
        assert_eq!(chemistry.attempts, 1);
    }

    #[test]
    fn test_difficulty_survives_score_updates() {
        let store = StudyStore::open_in_memory().unwrap();
        store.set_difficulty("rust", Difficulty::Easy).unwrap();
        store.record_subject_score("rust", 70).unwrap();
        assert_eq!(store.difficulty("rust").unwrap(), Difficulty::Easy);
    }
}

// ============================================================================
// Card Tests
// ============================================================================

mod card_tests {
    use super::*;

    #[test]
    fn test_due_cards_honor_date_subject_and_limit() {
        let store = StudyStore::open_in_memory().unwrap();
        let today = day(2026, 8, 26);

        store
            .insert_card(&Card::new("rust", "What is a borrow?", "A reference", day(2026, 8, 24)))
            .unwrap();
        store
            .insert_card(&Card::new("rust", "What is Send?", "A marker trait", day(2026, 8, 25)))
            .unwrap();
        store
            .insert_card(&Card::new("math", "2+2?", "4", day(2026, 8, 26)))
            .unwrap();
        // Not yet due
        store
            .insert_card(&Card::new("rust", "What is a lifetime?", "A scope", day(2026, 9, 1)))
            .unwrap();

        let all_due = store.due_cards(today, None, 10).unwrap();
        assert_eq!(all_due.len(), 3);
        // Oldest due date first
        assert_eq!(all_due[0].front, "What is a borrow?");

        let rust_due = store.due_cards(today, Some("rust"), 10).unwrap();
        assert_eq!(rust_due.len(), 2);
        assert!(rust_due.iter().all(|c| c.subject == "rust"));

        let capped = store.due_cards(today, None, 2).unwrap();
        assert_eq!(capped.len(), 2);

        assert_eq!(store.card_count().unwrap(), 4);
    }

    #[test]
    fn test_duplicate_fronts_are_detectable_per_subject() {
        let store = StudyStore::open_in_memory().unwrap();
        let card = Card::new("rust", "What is a slice?", "A view", day(2026, 8, 26));
        store.insert_card(&card).unwrap();

        assert!(store.has_card_front("rust", "What is a slice?").unwrap());
        assert!(!store.has_card_front("math", "What is a slice?").unwrap());
        assert!(!store.has_card_front("rust", "What is a trait?").unwrap());
    }

    #[test]
    fn test_review_update_persists_the_new_schedule() {
        let store = StudyStore::open_in_memory().unwrap();
        let card = Card::new("rust", "front", "back", day(2026, 8, 20));
        store.insert_card(&card).unwrap();

        let state = card.state.review(100);
        store
            .update_card_review(&card.id, &state, day(2026, 8, 27))
            .unwrap();

        // No longer due on the old date, due again on the new one
        assert!(store.due_cards(day(2026, 8, 26), None, 10).unwrap().is_empty());
        let due = store.due_cards(day(2026, 8, 27), None, 10).unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].state.repetitions, 1);
        assert!((due[0].state.ease_factor - 2.6).abs() < 1e-9);
    }

    #[test]
    fn test_updating_a_missing_card_is_an_error() {
        let store = StudyStore::open_in_memory().unwrap();
        let err = store
            .update_card_review("no-such-id", &ReviewState::default(), day(2026, 8, 26))
            .unwrap_err();
        assert!(matches!(err, SenseiError::CardNotFound(_)));
    }
}

// ============================================================================
// Attempt Tests
// ============================================================================

mod attempt_tests {
    use super::*;

    #[test]
    fn test_recent_attempts_come_back_newest_first() {
        let store = StudyStore::open_in_memory().unwrap();

        let mut first = Attempt::new("rust", AttemptKind::Quiz, 60, 5, 3);
        first.taken_at = 1_000;
        let mut second = Attempt::new("rust", AttemptKind::Exam, 80, 5, 4);
        second.taken_at = 2_000;
        let mut third = Attempt::new("math", AttemptKind::Review, 90, 10, 9);
        third.taken_at = 3_000;

        store.record_attempt(&first).unwrap();
        store.record_attempt(&second).unwrap();
        store.record_attempt(&third).unwrap();

        let recent = store.recent_attempts(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].subject, "math");
        assert_eq!(recent[0].kind, AttemptKind::Review);
        assert_eq!(recent[1].score, 80);
    }

    #[test]
    fn test_provenance_round_trips() {
        let store = StudyStore::open_in_memory().unwrap();
        let attempt = Attempt::new("rust", AttemptKind::Quiz, 100, 5, 5)
            .with_provenance("OpenAI", "gpt-4o-mini");
        store.record_attempt(&attempt).unwrap();

        let recent = store.recent_attempts(1).unwrap();
        assert_eq!(recent[0].provider.as_deref(), Some("OpenAI"));
        assert_eq!(recent[0].model.as_deref(), Some("gpt-4o-mini"));
    }

    #[test]
    fn test_snapshot_counts_quizzes_and_perfects() {
        let store = StudyStore::open_in_memory().unwrap();
        store.add_xp(300).unwrap();
        store.add_reviewed_cards(12).unwrap();
        store
            .record_attempt(&Attempt::new("rust", AttemptKind::Quiz, 100, 5, 5))
            .unwrap();
        store
            .record_attempt(&Attempt::new("rust", AttemptKind::Quiz, 60, 5, 3))
            .unwrap();
        // Exams and reviews stay out of the quiz counters
        store
            .record_attempt(&Attempt::new("rust", AttemptKind::Exam, 100, 4, 4))
            .unwrap();

        let snapshot = store.progress_snapshot().unwrap();
        assert_eq!(snapshot.xp, 300);
        assert_eq!(snapshot.quizzes_taken, 2);
        assert_eq!(snapshot.perfect_quizzes, 1);
        assert_eq!(snapshot.cards_reviewed, 12);
    }
}

// ============================================================================
// Achievement Tests
// ============================================================================

mod achievement_tests {
    use super::*;

    #[test]
    fn test_unlock_is_idempotent() {
        let store = StudyStore::open_in_memory().unwrap();

        assert!(store.unlock_achievement("first-quiz").unwrap());
        // Second unlock reports nothing new
        assert!(!store.unlock_achievement("first-quiz").unwrap());
        assert!(store.unlock_achievement("week-streak").unwrap());

        let unlocked = store.unlocked_achievements().unwrap();
        assert_eq!(unlocked.len(), 2);
        assert!(unlocked.contains("first-quiz"));
        assert!(unlocked.contains("week-streak"));
    }
}
