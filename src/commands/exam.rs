// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Mixed multiple-choice and short-answer exam command

use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::Local;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use crate::colors::{Status, StyledText};
use crate::config::{AiConfig, SenseiConfig};
use crate::models::DispatchOptions;
use crate::progress;
use crate::router::AiRouter;
use crate::storage::{Attempt, AttemptKind};
use crate::tutor::prompts;
use crate::tutor::session::{self, ExamQuestion};

use super::quiz::{letter_for, present_question, read_option_pick};

/// Graded score at or above this counts as a correct answer
const PASSING_SCORE: u32 = 60;

#[derive(Tabled)]
struct ExamRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Feedback")]
    feedback: String,
}

/// Generate and run an exam, grading short answers through a second dispatch
pub fn exam(subject: &str, choice: usize, short: usize, provider: Option<&str>) -> Result<()> {
    let config = SenseiConfig::load()?;
    let store = super::open_store(&config)?;
    let preferred = super::parse_provider_flag(provider)?.or(config.preferred_provider);
    let difficulty = store.difficulty(subject)?;

    println!(
        "{} Writing a {} exam on {} ({} multiple-choice, {} short-answer)...",
        Status::think(),
        difficulty,
        subject.ident(),
        choice,
        short
    );

    let router = AiRouter::new(&AiConfig::from_env());
    let options = DispatchOptions::default()
        .with_max_tokens(config.max_tokens)
        .with_preferred(preferred);
    let rt = super::runtime()?;
    let completion = rt.block_on(router.dispatch(
        &prompts::exam(subject, choice, short, difficulty),
        &options,
    ))?;

    let questions = session::parse_exam(&completion.text)?;
    let total = questions.len();

    let mut rows = Vec::with_capacity(total);
    let mut score_sum = 0u32;
    let mut correct_answers = 0u32;

    for (i, question) in questions.iter().enumerate() {
        match question {
            ExamQuestion::MultipleChoice(q) => {
                present_question(i + 1, total, q);
                let pick = read_option_pick(q.options.len())?;
                let correct = pick == q.answer;
                let score = if correct { 100 } else { 0 };
                if correct {
                    correct_answers += 1;
                    println!("{} Correct!", Status::correct());
                } else {
                    println!(
                        "{} The answer was {}. {}",
                        Status::miss(),
                        format!("{}. {}", letter_for(q.answer), q.correct_option()).success(),
                        q.explanation
                    );
                }
                score_sum += score;
                rows.push(ExamRow {
                    number: i + 1,
                    kind: "choice",
                    score: format!("{}%", score),
                    feedback: if correct {
                        "correct".to_string()
                    } else {
                        format!("answer: {}", q.correct_option())
                    },
                });
            }
            ExamQuestion::ShortAnswer {
                question,
                reference,
            } => {
                println!();
                println!(
                    "{} {}",
                    format!("Question {}/{}:", i + 1, total).header(),
                    question
                );
                let response = read_free_answer()?;

                println!("{} Grading...", Status::think());
                let graded_reply = rt.block_on(router.dispatch(
                    &prompts::grade_short_answer(question, reference, &response),
                    &options,
                ))?;
                let graded = session::parse_grade(&graded_reply.text)?;

                if graded.score >= PASSING_SCORE {
                    correct_answers += 1;
                    println!("{} {}% - {}", Status::correct(), graded.score, graded.feedback);
                } else {
                    println!("{} {}% - {}", Status::miss(), graded.score, graded.feedback);
                }
                score_sum += graded.score;
                rows.push(ExamRow {
                    number: i + 1,
                    kind: "short",
                    score: format!("{}%", graded.score),
                    feedback: truncate(&graded.feedback, 48),
                });
            }
        }
    }

    let final_score = if total == 0 {
        0
    } else {
        (f64::from(score_sum) / total as f64).round() as u32
    };

    println!();
    let table = Table::new(rows)
        .with(TableStyle::ascii_rounded())
        .to_string();
    println!("{}", table);
    println!(
        "{} Final score: {}%",
        if final_score >= PASSING_SCORE {
            Status::ok()
        } else {
            Status::miss()
        },
        final_score
    );

    // XP, attempt record, difficulty feedback
    let xp_gain = i64::from(correct_answers) * progress::XP_PER_CORRECT;
    let total_xp = store.add_xp(xp_gain)?;
    let streak = store.record_study_day(Local::now().date_naive())?;
    println!(
        "{} +{} XP (total {}, level {}, streak {} day(s))",
        Status::xp(),
        xp_gain,
        total_xp,
        progress::level_for_xp(total_xp),
        streak
    );

    let attempt = Attempt::new(
        subject,
        AttemptKind::Exam,
        final_score,
        total as u32,
        correct_answers,
    )
    .with_provenance(&completion.provider, &completion.model);
    store.record_attempt(&attempt)?;
    store.record_subject_score(subject, final_score)?;

    let adjusted = difficulty.adjusted_for_score(final_score);
    if adjusted != difficulty {
        store.set_difficulty(subject, adjusted)?;
        println!(
            "{} Difficulty for {} is now {}",
            Status::info(),
            subject.ident(),
            adjusted
        );
    }

    super::announce_new_achievements(&store)?;
    Ok(())
}

fn read_free_answer() -> Result<String> {
    print!("{} Your answer: ", Status::question());
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input)? == 0 {
        anyhow::bail!("Input closed before the exam finished");
    }
    Ok(input.trim().to_string())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
