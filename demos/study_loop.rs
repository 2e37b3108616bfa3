//! Study loop examples for the sensei library
//!
//! Walks the offline half of a study session:
//! - Parsing quiz material out of a model reply
//! - Grading picks locally
//! - Spaced-repetition scheduling
//! - XP, levels, streaks, and the study store
//!
//! Run with: cargo run --example study_loop

use chrono::NaiveDate;
use sensei::progress::{level_for_xp, updated_streak, XP_PER_CORRECT};
use sensei::scheduler::ReviewState;
use sensei::storage::{Card, StudyStore};
use sensei::tutor::{grade_quiz, parse_quiz};

fn main() -> anyhow::Result<()> {
    println!("=== Sensei Study Loop Examples ===\n");

    // ========================================================================
    // Example 1: Parse a quiz out of a chatty model reply
    // ========================================================================
    println!("1. Parsing a quiz reply:");

    let model_reply = r#"Here is your quiz, good luck!
```json
[
  {
    "question": "What does the ? operator do?",
    "options": ["Panics on error", "Propagates the error", "Ignores the error", "Retries the call"],
    "answer": 1,
    "explanation": "It returns early with the error value."
  },
  {
    "question": "Which collection is growable?",
    "options": ["[i32; 4]", "Vec<i32>"],
    "answer": "B"
  }
]
```"#;

    let questions = parse_quiz(model_reply)?;
    println!("   Parsed {} questions", questions.len());
    for (i, q) in questions.iter().enumerate() {
        println!("   Q{}: {} -> {}", i + 1, q.question, q.correct_option());
    }

    // ========================================================================
    // Example 2: Grade picks locally
    // ========================================================================
    println!("\n2. Grading a round:");

    // First pick is wrong, second is right
    let report = grade_quiz(&questions, &[0, 1]);
    println!(
        "   {}/{} correct, score {}%",
        report.correct,
        report.total,
        report.score()
    );
    println!("   XP earned: {}", i64::from(report.correct) * XP_PER_CORRECT);

    // ========================================================================
    // Example 3: Spaced-repetition scheduling
    // ========================================================================
    println!("\n3. Scheduling reviews:");

    let mut state = ReviewState::default();
    for (day, score) in [(1, 100), (2, 100), (8, 100), (25, 40)] {
        state = state.review(score);
        println!(
            "   day {:>2}: score {:>3} -> interval {} day(s), ease {:.2}, reps {}",
            day, score, state.interval_days, state.ease_factor, state.repetitions
        );
    }

    // ========================================================================
    // Example 4: The study store
    // ========================================================================
    println!("\n4. Recording progress:");

    let store = StudyStore::open_in_memory()?;
    let today = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();

    let missed = &questions[0];
    store.insert_card(&Card::new(
        "rust",
        &missed.question,
        missed.correct_option(),
        today,
    ))?;
    println!("   Due cards: {}", store.due_cards(today, None, 10)?.len());

    let xp = store.add_xp(120)?;
    let streak = store.record_study_day(today)?;
    println!(
        "   XP {} (level {}), streak {} day(s)",
        xp,
        level_for_xp(xp),
        streak
    );

    // Streak arithmetic without the store
    let tomorrow = today.succ_opt().unwrap();
    println!(
        "   Studying again tomorrow would make the streak {}",
        updated_streak(streak, Some(today), tomorrow)
    );

    println!("\n=== Examples completed ===");
    Ok(())
}
