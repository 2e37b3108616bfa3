// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Interactive quiz command

use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::Local;

use crate::colors::{line, Status, StyledText};
use crate::config::{AiConfig, SenseiConfig};
use crate::error::SenseiError;
use crate::models::{Difficulty, DispatchOptions};
use crate::progress;
use crate::router::AiRouter;
use crate::storage::{Attempt, AttemptKind, Card};
use crate::tutor::prompts;
use crate::tutor::session::{self, QuizQuestion};

/// Generate and run a multiple-choice quiz
pub fn quiz(
    subject: &str,
    count: usize,
    difficulty_flag: Option<&str>,
    provider: Option<&str>,
    no_shuffle: bool,
) -> Result<()> {
    let config = SenseiConfig::load()?;
    let store = super::open_store(&config)?;
    let preferred = super::parse_provider_flag(provider)?.or(config.preferred_provider);

    let stored_difficulty = store.difficulty(subject)?;
    let difficulty = match difficulty_flag {
        Some(name) => Difficulty::from_name(name)
            .ok_or_else(|| SenseiError::UnknownDifficulty(name.to_string()))?,
        None => stored_difficulty,
    };

    println!(
        "{} Writing a {}-question {} quiz on {}...",
        Status::think(),
        count,
        difficulty,
        subject.ident()
    );

    let router = AiRouter::new(&AiConfig::from_env());
    let options = DispatchOptions::default()
        .with_max_tokens(config.max_tokens)
        .with_preferred(preferred);
    let rt = super::runtime()?;
    let completion =
        rt.block_on(router.dispatch(&prompts::quiz(subject, count, difficulty), &options))?;

    let mut questions = session::parse_quiz(&completion.text)?;
    if !no_shuffle {
        let mut rng = rand::thread_rng();
        for question in &mut questions {
            question.shuffle_options(&mut rng);
        }
    }

    // Run the round
    let mut responses = Vec::with_capacity(questions.len());
    for (i, question) in questions.iter().enumerate() {
        present_question(i + 1, questions.len(), question);
        let pick = read_option_pick(question.options.len())?;
        if pick == question.answer {
            println!("{} Correct!", Status::correct());
        } else {
            println!(
                "{} The answer was {}. {}",
                Status::miss(),
                format!(
                    "{}. {}",
                    letter_for(question.answer),
                    question.correct_option()
                )
                .success(),
                question.explanation
            );
        }
        responses.push(pick);
    }

    let report = session::grade_quiz(&questions, &responses);
    let score = report.score();

    println!();
    println!("{}", line(46));
    println!(
        "{} Score: {}/{} ({}%)",
        if score >= 50 {
            Status::ok()
        } else {
            Status::miss()
        },
        report.correct,
        report.total,
        score
    );

    // XP and streak
    let mut xp_gain = i64::from(report.correct) * progress::XP_PER_CORRECT;
    if report.is_perfect() {
        xp_gain += progress::XP_PERFECT_BONUS;
        println!(
            "{} Perfect score! +{} bonus XP",
            Status::xp(),
            progress::XP_PERFECT_BONUS
        );
    }
    let today = Local::now().date_naive();
    let total_xp = store.add_xp(xp_gain)?;
    let streak = store.record_study_day(today)?;
    println!(
        "{} +{} XP (total {}, level {}, streak {} day(s))",
        Status::xp(),
        xp_gain,
        total_xp,
        progress::level_for_xp(total_xp),
        streak
    );

    // Record the attempt and adjust the subject's difficulty
    let attempt = Attempt::new(subject, AttemptKind::Quiz, score, report.total, report.correct)
        .with_provenance(&completion.provider, &completion.model);
    store.record_attempt(&attempt)?;
    store.record_subject_score(subject, score)?;

    let adjusted = stored_difficulty.adjusted_for_score(score);
    if adjusted != stored_difficulty {
        store.set_difficulty(subject, adjusted)?;
        println!(
            "{} Difficulty for {} is now {}",
            Status::info(),
            subject.ident(),
            adjusted
        );
    }

    // Missed questions feed the review deck
    let mut added = 0;
    for &i in &report.missed {
        let question = &questions[i];
        let back = if question.explanation.is_empty() {
            question.correct_option().to_string()
        } else {
            format!("{} - {}", question.correct_option(), question.explanation)
        };
        if !store.has_card_front(subject, &question.question)? {
            store.insert_card(&Card::new(subject, &question.question, &back, today))?;
            added += 1;
        }
    }
    if added > 0 {
        println!(
            "{} Added {} missed question(s) to your review deck",
            Status::review(),
            added
        );
    }

    super::announce_new_achievements(&store)?;
    Ok(())
}

/// Print one question with lettered options
pub(crate) fn present_question(number: usize, total: usize, question: &QuizQuestion) {
    println!();
    println!(
        "{} {}",
        format!("Question {}/{}:", number, total).header(),
        question.question
    );
    for (i, option) in question.options.iter().enumerate() {
        println!("  {}. {}", letter_for(i), option);
    }
}

/// Prompt until the user picks a valid option
pub(crate) fn read_option_pick(option_count: usize) -> Result<usize> {
    let stdin = io::stdin();
    loop {
        print!("{} Your answer: ", Status::question());
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            anyhow::bail!("Input closed before the round finished");
        }
        if let Some(pick) = parse_option_pick(input.trim(), option_count) {
            return Ok(pick);
        }
        println!(
            "{} Enter a letter A-{} or a number 1-{}",
            Status::warn(),
            letter_for(option_count.saturating_sub(1)),
            option_count
        );
    }
}

/// Accept "B", "b", or "2" style picks
pub(crate) fn parse_option_pick(input: &str, option_count: usize) -> Option<usize> {
    let input = input.trim();
    if input.len() == 1 {
        let c = input.chars().next()?;
        if c.is_ascii_alphabetic() {
            let idx = (c.to_ascii_uppercase() as u8 - b'A') as usize;
            return (idx < option_count).then_some(idx);
        }
    }
    input
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=option_count).contains(n))
        .map(|n| n - 1)
}

pub(crate) fn letter_for(idx: usize) -> char {
    (b'A' + idx as u8) as char
}
