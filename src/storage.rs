// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: Apache-2.0
//! Local study progress store (SQLite)
//!
//! One database file holds the profile, per-subject difficulty, the card
//! deck with its scheduling state, assessment attempts, and unlocked
//! achievements.

use crate::error::Result;
use crate::models::Difficulty;
use crate::progress::{self, ProgressSnapshot};
use crate::scheduler::ReviewState;
use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;
use std::path::Path;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS profile (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    xp INTEGER NOT NULL DEFAULT 0,
    streak_days INTEGER NOT NULL DEFAULT 0,
    last_study_date TEXT,
    cards_reviewed INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS subjects (
    name TEXT PRIMARY KEY,
    difficulty TEXT NOT NULL DEFAULT 'medium',
    last_score INTEGER,
    attempts INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS cards (
    id TEXT PRIMARY KEY,
    subject TEXT NOT NULL,
    front TEXT NOT NULL,
    back TEXT NOT NULL,
    ease_factor REAL NOT NULL DEFAULT 2.5,
    interval_days INTEGER NOT NULL DEFAULT 1,
    repetitions INTEGER NOT NULL DEFAULT 0,
    due_date TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS attempts (
    id TEXT PRIMARY KEY,
    subject TEXT NOT NULL,
    kind TEXT NOT NULL,
    score INTEGER NOT NULL,
    total_questions INTEGER NOT NULL,
    correct_answers INTEGER NOT NULL,
    provider TEXT,
    model TEXT,
    taken_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS achievements (
    id TEXT PRIMARY KEY,
    unlocked_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_cards_due ON cards(due_date);
CREATE INDEX IF NOT EXISTS idx_cards_subject ON cards(subject);
CREATE INDEX IF NOT EXISTS idx_attempts_subject ON attempts(subject);
"#;

const DATE_FMT: &str = "%Y-%m-%d";

// =============================================================================
// Store Models
// =============================================================================

/// The singleton study profile
#[derive(Debug, Clone)]
pub struct Profile {
    pub xp: i64,
    pub streak_days: u32,
    pub last_study_date: Option<NaiveDate>,
    pub cards_reviewed: i64,
}

/// Per-subject difficulty and score history
#[derive(Debug, Clone)]
pub struct SubjectRecord {
    pub name: String,
    pub difficulty: Difficulty,
    pub last_score: Option<u32>,
    pub attempts: i64,
}

/// A flashcard with its scheduling state
#[derive(Debug, Clone)]
pub struct Card {
    pub id: String,
    pub subject: String,
    pub front: String,
    pub back: String,
    pub state: ReviewState,
    pub due_date: NaiveDate,
}

impl Card {
    /// Create a fresh card due immediately
    pub fn new(subject: &str, front: &str, back: &str, today: NaiveDate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            subject: subject.to_string(),
            front: front.to_string(),
            back: back.to_string(),
            state: ReviewState::default(),
            due_date: today,
        }
    }
}

/// Assessment kind recorded with each attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptKind {
    Quiz,
    Exam,
    Review,
}

impl AttemptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quiz => "quiz",
            Self::Exam => "exam",
            Self::Review => "review",
        }
    }
}

/// One graded assessment
#[derive(Debug, Clone)]
pub struct Attempt {
    pub id: String,
    pub subject: String,
    pub kind: AttemptKind,
    pub score: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub taken_at: i64,
}

impl Attempt {
    pub fn new(subject: &str, kind: AttemptKind, score: u32, total: u32, correct: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            subject: subject.to_string(),
            kind,
            score,
            total_questions: total,
            correct_answers: correct,
            provider: None,
            model: None,
            taken_at: Utc::now().timestamp(),
        }
    }

    pub fn with_provenance(mut self, provider: &str, model: &str) -> Self {
        self.provider = Some(provider.to_string());
        self.model = Some(model.to_string());
        self
    }
}

/// Convert a stored `YYYY-MM-DD` column back to a date inside a row mapper
fn date_col(idx: usize, value: String) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(&value, DATE_FMT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

// =============================================================================
// Store Operations
// =============================================================================

/// Study progress store
pub struct StudyStore {
    conn: Connection,
}

impl StudyStore {
    /// Open or create the store at the given path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = StudyStore { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Open an in-memory store (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = StudyStore { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO profile (id, xp, streak_days, cards_reviewed, created_at)
             VALUES (1, 0, 0, 0, ?1)",
            params![Utc::now().timestamp()],
        )?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Profile
    // -------------------------------------------------------------------------

    /// Get the study profile
    pub fn profile(&self) -> Result<Profile> {
        let (xp, streak_days, last_study_date, cards_reviewed): (
            i64,
            u32,
            Option<String>,
            i64,
        ) = self.conn.query_row(
            "SELECT xp, streak_days, last_study_date, cards_reviewed FROM profile WHERE id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )?;

        let last_study_date = match last_study_date {
            Some(s) => Some(date_col(2, s)?),
            None => None,
        };

        Ok(Profile {
            xp,
            streak_days,
            last_study_date,
            cards_reviewed,
        })
    }

    /// Add XP and return the new cumulative total
    pub fn add_xp(&self, amount: i64) -> Result<i64> {
        self.conn.execute(
            "UPDATE profile SET xp = xp + ?1 WHERE id = 1",
            params![amount],
        )?;
        let xp: i64 = self
            .conn
            .query_row("SELECT xp FROM profile WHERE id = 1", [], |row| row.get(0))?;
        Ok(xp)
    }

    /// Record a study event on `today` and return the updated streak
    pub fn record_study_day(&self, today: NaiveDate) -> Result<u32> {
        let profile = self.profile()?;
        let streak = progress::updated_streak(profile.streak_days, profile.last_study_date, today);
        self.conn.execute(
            "UPDATE profile SET streak_days = ?1, last_study_date = ?2 WHERE id = 1",
            params![streak, today.format(DATE_FMT).to_string()],
        )?;
        Ok(streak)
    }

    /// Bump the lifetime reviewed-card counter
    pub fn add_reviewed_cards(&self, count: i64) -> Result<()> {
        self.conn.execute(
            "UPDATE profile SET cards_reviewed = cards_reviewed + ?1 WHERE id = 1",
            params![count],
        )?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Subjects
    // -------------------------------------------------------------------------

    /// Current difficulty for a subject (medium until recorded otherwise)
    pub fn difficulty(&self, subject: &str) -> Result<Difficulty> {
        let name: Option<String> = self
            .conn
            .query_row(
                "SELECT difficulty FROM subjects WHERE name = ?1",
                params![subject],
                |row| row.get(0),
            )
            .optional()?;

        Ok(name
            .as_deref()
            .and_then(Difficulty::from_name)
            .unwrap_or(Difficulty::Medium))
    }

    /// Set the difficulty for a subject
    pub fn set_difficulty(&self, subject: &str, difficulty: Difficulty) -> Result<()> {
        self.conn.execute(
            "INSERT INTO subjects (name, difficulty) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET difficulty = excluded.difficulty",
            params![subject, difficulty.as_str()],
        )?;
        Ok(())
    }

    /// Record an assessment score against a subject
    pub fn record_subject_score(&self, subject: &str, score: u32) -> Result<()> {
        self.conn.execute(
            "INSERT INTO subjects (name, last_score, attempts) VALUES (?1, ?2, 1)
             ON CONFLICT(name) DO UPDATE SET
                last_score = excluded.last_score,
                attempts = attempts + 1",
            params![subject, score],
        )?;
        Ok(())
    }

    /// List all subjects with their recorded state
    pub fn list_subjects(&self) -> Result<Vec<SubjectRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, difficulty, last_score, attempts FROM subjects ORDER BY name",
        )?;
        let rows = stmt.query_map([], |row| {
            let difficulty: String = row.get(1)?;
            Ok(SubjectRecord {
                name: row.get(0)?,
                difficulty: Difficulty::from_name(&difficulty).unwrap_or(Difficulty::Medium),
                last_score: row.get(2)?,
                attempts: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // -------------------------------------------------------------------------
    // Cards
    // -------------------------------------------------------------------------

    /// Insert a card
    pub fn insert_card(&self, card: &Card) -> Result<()> {
        self.conn.execute(
            "INSERT INTO cards (id, subject, front, back, ease_factor, interval_days,
                                repetitions, due_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                card.id,
                card.subject,
                card.front,
                card.back,
                card.state.ease_factor,
                card.state.interval_days,
                card.state.repetitions,
                card.due_date.format(DATE_FMT).to_string(),
                Utc::now().timestamp(),
            ],
        )?;
        Ok(())
    }

    /// Check whether a card with this front already exists for a subject
    pub fn has_card_front(&self, subject: &str, front: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM cards WHERE subject = ?1 AND front = ?2",
            params![subject, front],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Cards due on or before `today`, oldest due first
    pub fn due_cards(
        &self,
        today: NaiveDate,
        subject: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Card>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, subject, front, back, ease_factor, interval_days, repetitions, due_date
             FROM cards
             WHERE due_date <= ?1 AND (?2 IS NULL OR subject = ?2)
             ORDER BY due_date ASC
             LIMIT ?3",
        )?;
        let rows = stmt.query_map(
            params![today.format(DATE_FMT).to_string(), subject, limit as i64],
            |row| {
                let due: String = row.get(7)?;
                Ok(Card {
                    id: row.get(0)?,
                    subject: row.get(1)?,
                    front: row.get(2)?,
                    back: row.get(3)?,
                    state: ReviewState {
                        ease_factor: row.get(4)?,
                        interval_days: row.get(5)?,
                        repetitions: row.get(6)?,
                    },
                    due_date: date_col(7, due)?,
                })
            },
        )?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Persist a card's post-review scheduling state
    pub fn update_card_review(
        &self,
        card_id: &str,
        state: &ReviewState,
        due: NaiveDate,
    ) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE cards SET ease_factor = ?1, interval_days = ?2, repetitions = ?3, due_date = ?4
             WHERE id = ?5",
            params![
                state.ease_factor,
                state.interval_days,
                state.repetitions,
                due.format(DATE_FMT).to_string(),
                card_id,
            ],
        )?;
        if updated == 0 {
            return Err(crate::error::SenseiError::CardNotFound(card_id.to_string()));
        }
        Ok(())
    }

    /// Total cards in the deck
    pub fn card_count(&self) -> Result<i64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;
        Ok(count)
    }

    // -------------------------------------------------------------------------
    // Attempts
    // -------------------------------------------------------------------------

    /// Record a graded assessment
    pub fn record_attempt(&self, attempt: &Attempt) -> Result<()> {
        self.conn.execute(
            "INSERT INTO attempts (id, subject, kind, score, total_questions, correct_answers,
                                   provider, model, taken_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                attempt.id,
                attempt.subject,
                attempt.kind.as_str(),
                attempt.score,
                attempt.total_questions,
                attempt.correct_answers,
                attempt.provider,
                attempt.model,
                attempt.taken_at,
            ],
        )?;
        Ok(())
    }

    /// Most recent attempts, newest first
    pub fn recent_attempts(&self, limit: usize) -> Result<Vec<Attempt>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, subject, kind, score, total_questions, correct_answers,
                    provider, model, taken_at
             FROM attempts ORDER BY taken_at DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            let kind: String = row.get(2)?;
            Ok(Attempt {
                id: row.get(0)?,
                subject: row.get(1)?,
                kind: match kind.as_str() {
                    "exam" => AttemptKind::Exam,
                    "review" => AttemptKind::Review,
                    _ => AttemptKind::Quiz,
                },
                score: row.get(3)?,
                total_questions: row.get(4)?,
                correct_answers: row.get(5)?,
                provider: row.get(6)?,
                model: row.get(7)?,
                taken_at: row.get(8)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // -------------------------------------------------------------------------
    // Achievements
    // -------------------------------------------------------------------------

    /// IDs of unlocked achievements
    pub fn unlocked_achievements(&self) -> Result<HashSet<String>> {
        let mut stmt = self.conn.prepare("SELECT id FROM achievements")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        Ok(rows.collect::<rusqlite::Result<HashSet<_>>>()?)
    }

    /// Unlock an achievement; returns true only the first time
    pub fn unlock_achievement(&self, id: &str) -> Result<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO achievements (id, unlocked_at) VALUES (?1, ?2)",
            params![id, Utc::now().timestamp()],
        )?;
        Ok(inserted > 0)
    }

    // -------------------------------------------------------------------------
    // Aggregation
    // -------------------------------------------------------------------------

    /// Totals for achievement checks and the profile view
    pub fn progress_snapshot(&self) -> Result<ProgressSnapshot> {
        let profile = self.profile()?;
        let quizzes_taken: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM attempts WHERE kind = 'quiz'",
            [],
            |row| row.get(0),
        )?;
        let perfect_quizzes: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM attempts WHERE kind = 'quiz' AND score = 100",
            [],
            |row| row.get(0),
        )?;

        Ok(ProgressSnapshot {
            xp: profile.xp,
            streak_days: profile.streak_days,
            quizzes_taken,
            perfect_quizzes,
            cards_reviewed: profile.cards_reviewed,
        })
    }
}
