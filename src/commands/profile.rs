// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Study profile command

use anyhow::Result;
use chrono::DateTime;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use crate::colors::{separator, Status, StyledText};
use crate::config::SenseiConfig;
use crate::progress::{self, Achievement};

#[derive(Tabled)]
struct SubjectRow {
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Difficulty")]
    difficulty: String,
    #[tabled(rename = "Last Score")]
    last_score: String,
    #[tabled(rename = "Attempts")]
    attempts: i64,
}

#[derive(Tabled)]
struct AttemptRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Score")]
    score: String,
}

/// Show XP, level, streak, subjects, recent attempts, and achievements
pub fn profile() -> Result<()> {
    let config = SenseiConfig::load()?;
    let store = super::open_store(&config)?;
    let snapshot = store.progress_snapshot()?;
    let level = progress::level_for_xp(snapshot.xp);

    println!("{}", "Study Profile".header());
    println!("{}", separator(46));
    println!("  Level:   {}", level.to_string().count());
    println!("  XP:      {}", snapshot.xp.to_string().count());
    match progress::xp_to_next_level(snapshot.xp) {
        Some(needed) => println!("  Next:    {} XP to level {}", needed, level + 1),
        None => println!("  Next:    max level reached"),
    }
    println!("  Streak:  {} day(s)", snapshot.streak_days);
    println!(
        "  Cards:   {} reviewed, {} in the deck",
        snapshot.cards_reviewed,
        store.card_count()?
    );
    println!(
        "  Quizzes: {} taken, {} perfect",
        snapshot.quizzes_taken, snapshot.perfect_quizzes
    );

    let subjects = store.list_subjects()?;
    if !subjects.is_empty() {
        println!();
        println!("{}", "Subjects".header());
        let rows: Vec<SubjectRow> = subjects
            .into_iter()
            .map(|s| SubjectRow {
                subject: s.name,
                difficulty: s.difficulty.to_string(),
                last_score: s
                    .last_score
                    .map(|score| format!("{}%", score))
                    .unwrap_or_else(|| "-".to_string()),
                attempts: s.attempts,
            })
            .collect();
        let table = Table::new(rows)
            .with(TableStyle::ascii_rounded())
            .to_string();
        println!("{}", table);
    }

    let attempts = store.recent_attempts(5)?;
    if !attempts.is_empty() {
        println!();
        println!("{}", "Recent Activity".header());
        let rows: Vec<AttemptRow> = attempts
            .into_iter()
            .map(|a| AttemptRow {
                date: timestamp_to_date(a.taken_at),
                subject: a.subject,
                kind: a.kind.as_str().to_string(),
                score: format!("{}%", a.score),
            })
            .collect();
        let table = Table::new(rows)
            .with(TableStyle::ascii_rounded())
            .to_string();
        println!("{}", table);
    }

    let unlocked = store.unlocked_achievements()?;
    println!();
    println!("{}", "Achievements".header());
    for achievement in Achievement::all() {
        let marker = if unlocked.contains(achievement.id()) {
            Status::achievement()
        } else {
            "[ ]".separator()
        };
        println!(
            "  {} {} - {}",
            marker,
            achievement.title(),
            achievement.description()
        );
    }

    Ok(())
}

/// Convert an epoch-seconds timestamp to a date string
fn timestamp_to_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
