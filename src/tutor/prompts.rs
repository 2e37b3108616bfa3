// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: Apache-2.0
//! Prompt construction for tutoring, assessment, and grading calls

use crate::models::{ChatMessage, Difficulty};

/// System prompt for free-form explanations
const TUTOR_SYSTEM_PROMPT: &str = r#"You are Sensei, a patient expert tutor.
Explain the requested topic clearly and accurately. Use a short concrete
example where one helps. Keep the answer focused; do not pad it with
filler or restate the question."#;

/// System prompt for quiz generation
const QUIZ_SYSTEM_PROMPT: &str = r#"You are Sensei, a tutor that writes multiple-choice quizzes.
Respond with ONLY a JSON array, no prose before or after it. Each element:
{
  "question": "the question text",
  "options": ["option A", "option B", "option C", "option D"],
  "answer": 0,
  "explanation": "one sentence on why the answer is correct"
}
"answer" is the zero-based index into "options". Exactly one option is
correct. Wrong options must be plausible."#;

/// System prompt for exam generation
const EXAM_SYSTEM_PROMPT: &str = r#"You are Sensei, a tutor that writes exams.
Respond with ONLY a JSON array, no prose before or after it. Two element shapes:
{
  "type": "multiple-choice",
  "question": "the question text",
  "options": ["option A", "option B", "option C", "option D"],
  "answer": 0,
  "explanation": "one sentence on why the answer is correct"
}
{
  "type": "short-answer",
  "question": "the question text",
  "reference": "a model answer used for grading"
}
"answer" is the zero-based index into "options"."#;

/// System prompt for grading a short answer against a reference
const GRADING_SYSTEM_PROMPT: &str = r#"You are Sensei, grading one short exam answer.
Compare the student's answer to the reference answer for factual accuracy
and completeness. Wording differences do not matter. Respond with ONLY a
JSON object, no prose before or after it:
{
  "score": 0,
  "feedback": "one or two sentences for the student"
}
"score" is an integer from 0 to 100."#;

/// Messages for an explanation request
pub fn explain(topic: &str, difficulty: Difficulty) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(TUTOR_SYSTEM_PROMPT),
        ChatMessage::system(format!(
            "Pitch the explanation at a student studying at {difficulty} difficulty."
        )),
        ChatMessage::user(topic),
    ]
}

/// Messages for a quiz of `count` questions on `subject`
pub fn quiz(subject: &str, count: usize, difficulty: Difficulty) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(QUIZ_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Write a {count}-question {difficulty} quiz on: {subject}"
        )),
    ]
}

/// Messages for a mixed exam on `subject`
pub fn exam(
    subject: &str,
    choice_count: usize,
    short_count: usize,
    difficulty: Difficulty,
) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(EXAM_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Write a {difficulty} exam on: {subject}. \
             Include {choice_count} multiple-choice questions and \
             {short_count} short-answer questions, in that order."
        )),
    ]
}

/// Messages asking the model to grade one short answer
pub fn grade_short_answer(question: &str, reference: &str, response: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(GRADING_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Question: {question}\n\nReference answer: {reference}\n\nStudent answer: {response}"
        )),
    ]
}
