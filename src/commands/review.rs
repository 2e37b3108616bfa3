// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Spaced-repetition review command

use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::Local;

use crate::colors::{Status, StyledText};
use crate::config::SenseiConfig;
use crate::progress;
use crate::storage::{Attempt, AttemptKind};

/// Replay the cards due today and reschedule each by its recall quality
pub fn review(subject: Option<&str>, limit: usize) -> Result<()> {
    let config = SenseiConfig::load()?;
    let store = super::open_store(&config)?;
    let today = Local::now().date_naive();

    let cards = store.due_cards(today, subject, limit)?;
    if cards.is_empty() {
        println!("{} Nothing due today. Come back tomorrow!", Status::ok());
        return Ok(());
    }

    println!(
        "{} {} card(s) due",
        Status::review(),
        cards.len().to_string().count()
    );

    let mut score_sum = 0u32;
    let mut passed = 0u32;
    for (i, card) in cards.iter().enumerate() {
        println!();
        println!(
            "{} {}",
            format!("Card {}/{} [{}]:", i + 1, cards.len(), card.subject).header(),
            card.front
        );
        print!("  {} ", "(press Enter to reveal)".separator());
        io::stdout().flush()?;
        wait_for_enter()?;
        println!("  {}", card.back);

        let score = read_recall_score()?;
        score_sum += score;
        if score >= 60 {
            passed += 1;
        }

        let state = card.state.review(score);
        store.update_card_review(&card.id, &state, state.due_from(today))?;
        println!(
            "{} Next review in {} day(s)",
            Status::info(),
            state.interval_days
        );
    }

    let reviewed = cards.len() as i64;
    store.add_reviewed_cards(reviewed)?;

    let xp_gain = reviewed * progress::XP_PER_REVIEW;
    let total_xp = store.add_xp(xp_gain)?;
    let streak = store.record_study_day(today)?;
    println!();
    println!(
        "{} +{} XP (total {}, level {}, streak {} day(s))",
        Status::xp(),
        xp_gain,
        total_xp,
        progress::level_for_xp(total_xp),
        streak
    );

    let average = (f64::from(score_sum) / cards.len() as f64).round() as u32;
    let attempt = Attempt::new(
        subject.unwrap_or("all"),
        AttemptKind::Review,
        average,
        cards.len() as u32,
        passed,
    );
    store.record_attempt(&attempt)?;

    super::announce_new_achievements(&store)?;
    Ok(())
}

fn wait_for_enter() -> Result<()> {
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(())
}

/// Ask for a 0-5 recall quality and widen it to the 0-100 score scale
fn read_recall_score() -> Result<u32> {
    let stdin = io::stdin();
    loop {
        print!(
            "{} Recall quality 0-5 (0 = blank, 5 = instant): ",
            Status::question()
        );
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            anyhow::bail!("Input closed during review");
        }
        match input.trim().parse::<u32>() {
            Ok(quality) if quality <= 5 => return Ok(quality * 20),
            _ => println!("{} Enter a number from 0 to 5", Status::warn()),
        }
    }
}
