// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: Apache-2.0
//! Study material generation and grading
//!
//! Prompt builders produce the conversations sent through the router;
//! session parsing turns the replies into validated quiz and exam
//! questions and grades them.

pub mod prompts;
pub mod session;

// Re-export main types
pub use session::{
    extract_json_payload, grade_quiz, parse_exam, parse_grade, parse_quiz, ExamQuestion,
    GradedAnswer, QuizQuestion, QuizReport,
};
