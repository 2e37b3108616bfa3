// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: Apache-2.0
//! Parsing and grading of model-generated study material
//!
//! Models are instructed to answer with bare JSON but routinely wrap it in
//! Markdown fences or add prose around it, so everything here goes through
//! [`extract_json_payload`] first. Parse failures surface as
//! [`SenseiError::MalformedModelOutput`] with a snippet of the payload.

use crate::error::{Result, SenseiError};
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde::Deserialize;

/// Fenced code block, with or without a language tag
static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json)?\s*(.+?)\s*```").unwrap());

/// First run of digits in a grading reply
static SCORE_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{1,3}").unwrap());

const SNIPPET_LEN: usize = 120;

// =============================================================================
// Payload Extraction
// =============================================================================

/// Pull the JSON payload out of a model reply.
///
/// Prefers the first fenced code block; failing that, slices from the first
/// opening bracket to the last matching closer. Returns the trimmed reply
/// unchanged when neither applies.
pub fn extract_json_payload(raw: &str) -> &str {
    if let Some(caps) = JSON_FENCE.captures(raw) {
        if let Some(m) = caps.get(1) {
            return m.as_str().trim();
        }
    }

    let trimmed = raw.trim();
    let array = trimmed.find('[').zip(trimmed.rfind(']'));
    let object = trimmed.find('{').zip(trimmed.rfind('}'));
    let span = match (array, object) {
        (Some((a, b)), Some((c, _))) if a < c => Some((a, b)),
        (Some(span), None) => Some(span),
        (_, Some(span)) => Some(span),
        (None, None) => None,
    };

    match span {
        Some((start, end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

fn snippet(payload: &str) -> String {
    if payload.chars().count() <= SNIPPET_LEN {
        return payload.to_string();
    }
    let mut s: String = payload.chars().take(SNIPPET_LEN).collect();
    s.push_str("...");
    s
}

fn malformed(expected: &str, payload: &str, detail: impl std::fmt::Display) -> SenseiError {
    SenseiError::MalformedModelOutput {
        expected: expected.to_string(),
        detail: format!("{} (payload: {})", detail, snippet(payload)),
    }
}

// =============================================================================
// Quiz Material
// =============================================================================

/// Answer key as models actually emit it: an index, a letter, or option text
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawAnswer {
    Index(usize),
    Text(String),
}

fn resolve_answer(answer: &RawAnswer, options: &[String]) -> Option<usize> {
    match answer {
        RawAnswer::Index(i) if *i < options.len() => Some(*i),
        RawAnswer::Index(_) => None,
        RawAnswer::Text(text) => {
            let text = text.trim();
            // Letter keys like "B", "b." or "c)"
            if text.len() <= 2 {
                if let Some(first) = text.chars().next() {
                    if first.is_ascii_alphabetic() {
                        let idx = (first.to_ascii_uppercase() as u8 - b'A') as usize;
                        if idx < options.len() {
                            return Some(idx);
                        }
                    }
                }
            }
            options
                .iter()
                .position(|o| o.trim().eq_ignore_ascii_case(text))
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawQuizQuestion {
    question: String,
    options: Vec<String>,
    answer: RawAnswer,
    #[serde(default)]
    explanation: String,
}

/// One validated multiple-choice question
#[derive(Debug, Clone)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index of the correct option
    pub answer: usize,
    pub explanation: String,
}

impl QuizQuestion {
    pub fn correct_option(&self) -> &str {
        &self.options[self.answer]
    }

    /// Randomize option order, keeping the answer index in step
    pub fn shuffle_options<R: Rng>(&mut self, rng: &mut R) {
        let mut order: Vec<usize> = (0..self.options.len()).collect();
        order.shuffle(rng);
        self.options = order.iter().map(|&i| self.options[i].clone()).collect();
        self.answer = order.iter().position(|&i| i == self.answer).unwrap_or(0);
    }
}

fn validate_question(raw: RawQuizQuestion, payload: &str) -> Result<QuizQuestion> {
    if raw.options.len() < 2 {
        return Err(malformed(
            "quiz JSON",
            payload,
            format!("question has {} options", raw.options.len()),
        ));
    }
    let answer = resolve_answer(&raw.answer, &raw.options).ok_or_else(|| {
        malformed(
            "quiz JSON",
            payload,
            format!("answer key does not match any option in '{}'", raw.question),
        )
    })?;
    Ok(QuizQuestion {
        question: raw.question,
        options: raw.options,
        answer,
        explanation: raw.explanation,
    })
}

/// Parse a quiz reply into validated questions
pub fn parse_quiz(raw: &str) -> Result<Vec<QuizQuestion>> {
    let payload = extract_json_payload(raw);
    let parsed: Vec<RawQuizQuestion> =
        serde_json::from_str(payload).map_err(|e| malformed("quiz JSON", payload, e))?;
    if parsed.is_empty() {
        return Err(malformed("quiz JSON", payload, "empty question array"));
    }
    parsed
        .into_iter()
        .map(|q| validate_question(q, payload))
        .collect()
}

// =============================================================================
// Exam Material
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum RawExamQuestion {
    MultipleChoice {
        question: String,
        options: Vec<String>,
        answer: RawAnswer,
        #[serde(default)]
        explanation: String,
    },
    ShortAnswer {
        question: String,
        reference: String,
    },
}

/// One exam question, either auto-graded or model-graded
#[derive(Debug, Clone)]
pub enum ExamQuestion {
    MultipleChoice(QuizQuestion),
    ShortAnswer { question: String, reference: String },
}

impl ExamQuestion {
    pub fn question_text(&self) -> &str {
        match self {
            Self::MultipleChoice(q) => &q.question,
            Self::ShortAnswer { question, .. } => question,
        }
    }
}

/// Parse an exam reply into validated questions
pub fn parse_exam(raw: &str) -> Result<Vec<ExamQuestion>> {
    let payload = extract_json_payload(raw);
    let parsed: Vec<RawExamQuestion> =
        serde_json::from_str(payload).map_err(|e| malformed("exam JSON", payload, e))?;
    if parsed.is_empty() {
        return Err(malformed("exam JSON", payload, "empty question array"));
    }
    parsed
        .into_iter()
        .map(|q| match q {
            RawExamQuestion::MultipleChoice {
                question,
                options,
                answer,
                explanation,
            } => validate_question(
                RawQuizQuestion {
                    question,
                    options,
                    answer,
                    explanation,
                },
                payload,
            )
            .map(ExamQuestion::MultipleChoice),
            RawExamQuestion::ShortAnswer {
                question,
                reference,
            } => Ok(ExamQuestion::ShortAnswer {
                question,
                reference,
            }),
        })
        .collect()
}

// =============================================================================
// Grading
// =============================================================================

/// Outcome of grading one set of quiz responses locally
#[derive(Debug, Clone)]
pub struct QuizReport {
    pub total: u32,
    pub correct: u32,
    /// Indices of the missed questions
    pub missed: Vec<usize>,
}

impl QuizReport {
    /// Score as a rounded 0-100 percentage
    pub fn score(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (f64::from(self.correct) / f64::from(self.total) * 100.0).round() as u32
    }

    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}

/// Grade the user's option picks against the answer key
pub fn grade_quiz(questions: &[QuizQuestion], responses: &[usize]) -> QuizReport {
    let mut correct = 0;
    let mut missed = Vec::new();
    for (i, q) in questions.iter().enumerate() {
        match responses.get(i) {
            Some(&pick) if pick == q.answer => correct += 1,
            _ => missed.push(i),
        }
    }
    QuizReport {
        total: questions.len() as u32,
        correct,
        missed,
    }
}

/// A model-graded short answer
#[derive(Debug, Clone, Deserialize)]
pub struct GradedAnswer {
    pub score: u32,
    #[serde(default)]
    pub feedback: String,
}

/// Parse a grading reply into a clamped 0-100 score.
///
/// Falls back to the first number in the reply when the model skips the
/// JSON wrapper and answers with the bare score.
pub fn parse_grade(raw: &str) -> Result<GradedAnswer> {
    let payload = extract_json_payload(raw);
    if let Ok(mut graded) = serde_json::from_str::<GradedAnswer>(payload) {
        graded.score = graded.score.min(100);
        return Ok(graded);
    }

    SCORE_DIGITS
        .find(payload)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .map(|score| GradedAnswer {
            score: score.min(100),
            feedback: String::new(),
        })
        .ok_or_else(|| malformed("grade JSON", payload, "no 0-100 score found"))
}
