//! Tests for model-output parsing and local grading
//!
//! Covers:
//! - Pulling JSON payloads out of chatty, fenced, or bare replies
//! - Quiz parsing with the answer-key shapes models actually emit
//! - Exam parsing across its tagged question kinds
//! - Local quiz grading and short-answer grade parsing

use rand::rngs::StdRng;
use rand::SeedableRng;
use sensei::error::SenseiError;
use sensei::tutor::{
    extract_json_payload, grade_quiz, parse_exam, parse_grade, parse_quiz, ExamQuestion,
    QuizQuestion,
};

// ============================================================================
// Payload Extraction Tests
// ============================================================================

mod payload_tests {
    use super::*;

    #[test]
    fn test_fenced_block_wins_over_surrounding_prose() {
        let raw = "Sure, here is your quiz:\n```json\n[{\"x\": 1}]\n```\nHave fun!";
        assert_eq!(extract_json_payload(raw), "[{\"x\": 1}]");
    }

    #[test]
    fn test_unlabelled_fence_is_accepted() {
        let raw = "```\n{\"score\": 90}\n```";
        assert_eq!(extract_json_payload(raw), "{\"score\": 90}");
    }

    #[test]
    fn test_bare_array_is_sliced_out_of_prose() {
        let raw = "Of course! [1, 2] should do it.";
        assert_eq!(extract_json_payload(raw), "[1, 2]");
    }

    #[test]
    fn test_object_before_array_picks_the_object() {
        let raw = "{\"options\": [\"a\", \"b\"]}";
        assert_eq!(extract_json_payload(raw), raw);
    }

    #[test]
    fn test_plain_text_comes_back_trimmed() {
        assert_eq!(extract_json_payload("  85  "), "85");
    }
}

// ============================================================================
// Quiz Parsing Tests
// ============================================================================

mod quiz_parsing_tests {
    use super::*;

    const QUIZ_REPLY: &str = r#"Here is the quiz:
```json
[
  {
    "question": "What does ownership guarantee?",
    "options": ["Memory safety", "Faster builds", "Smaller binaries", "Garbage collection"],
    "answer": 0,
    "explanation": "Each value has a single owner."
  },
  {
    "question": "Which keyword borrows?",
    "options": ["move", "ref", "&", "box"],
    "answer": "C"
  },
  {
    "question": "Which type is heap allocated?",
    "options": ["i32", "String"],
    "answer": "string"
  }
]
```"#;

    #[test]
    fn test_parses_index_letter_and_text_answer_keys() {
        let questions = parse_quiz(QUIZ_REPLY).unwrap();
        assert_eq!(questions.len(), 3);

        assert_eq!(questions[0].answer, 0);
        assert_eq!(questions[0].correct_option(), "Memory safety");
        assert_eq!(questions[0].explanation, "Each value has a single owner.");

        // "C" maps to the third option, "string" matches by text
        assert_eq!(questions[1].answer, 2);
        assert_eq!(questions[2].answer, 1);
        // Missing explanation defaults to empty
        assert!(questions[1].explanation.is_empty());
    }

    #[test]
    fn test_out_of_range_answer_is_rejected() {
        let raw = r#"[{"question": "Q", "options": ["a", "b"], "answer": 5}]"#;
        let err = parse_quiz(raw).unwrap_err();
        assert!(matches!(err, SenseiError::MalformedModelOutput { .. }));
    }

    #[test]
    fn test_empty_array_is_rejected() {
        let err = parse_quiz("[]").unwrap_err();
        assert!(matches!(err, SenseiError::MalformedModelOutput { .. }));
    }

    #[test]
    fn test_single_option_question_is_rejected() {
        let raw = r#"[{"question": "Q", "options": ["only"], "answer": 0}]"#;
        assert!(parse_quiz(raw).is_err());
    }

    #[test]
    fn test_prose_without_json_is_rejected() {
        let err = parse_quiz("I cannot produce a quiz right now.").unwrap_err();
        assert!(matches!(err, SenseiError::MalformedModelOutput { .. }));
    }

    #[test]
    fn test_shuffle_keeps_the_answer_in_step() {
        let mut question = QuizQuestion {
            question: "Pick the even number".to_string(),
            options: vec!["1".into(), "2".into(), "3".into(), "5".into()],
            answer: 1,
            explanation: String::new(),
        };
        let before: Vec<String> = question.options.clone();

        let mut rng = StdRng::seed_from_u64(42);
        question.shuffle_options(&mut rng);

        assert_eq!(question.correct_option(), "2");
        let mut after = question.options.clone();
        after.sort();
        let mut sorted_before = before;
        sorted_before.sort();
        assert_eq!(after, sorted_before);
    }
}

// ============================================================================
// Exam Parsing Tests
// ============================================================================

mod exam_parsing_tests {
    use super::*;

    const EXAM_REPLY: &str = r#"[
  {
    "type": "multiple-choice",
    "question": "Which trait enables printing with {}?",
    "options": ["Debug", "Display", "Clone", "Copy"],
    "answer": 1,
    "explanation": "Display backs the {} format specifier."
  },
  {
    "type": "short-answer",
    "question": "Explain what a lifetime annotation expresses.",
    "reference": "It relates the lifetimes of references so borrows never outlive their data."
  }
]"#;

    #[test]
    fn test_parses_both_question_kinds() {
        let questions = parse_exam(EXAM_REPLY).unwrap();
        assert_eq!(questions.len(), 2);

        match &questions[0] {
            ExamQuestion::MultipleChoice(q) => {
                assert_eq!(q.answer, 1);
                assert_eq!(q.correct_option(), "Display");
            }
            other => panic!("expected multiple choice, got {:?}", other),
        }
        match &questions[1] {
            ExamQuestion::ShortAnswer { question, reference } => {
                assert!(question.starts_with("Explain"));
                assert!(reference.contains("borrows"));
            }
            other => panic!("expected short answer, got {:?}", other),
        }
    }

    #[test]
    fn test_question_text_reads_through_both_kinds() {
        let questions = parse_exam(EXAM_REPLY).unwrap();
        assert!(questions[0].question_text().contains("trait"));
        assert!(questions[1].question_text().contains("lifetime"));
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let raw = r#"[{"type": "essay", "question": "Q"}]"#;
        assert!(parse_exam(raw).is_err());
    }

    #[test]
    fn test_empty_exam_is_rejected() {
        assert!(parse_exam("[]").is_err());
    }
}

// ============================================================================
// Grading Tests
// ============================================================================

mod grading_tests {
    use super::*;

    fn three_questions() -> Vec<QuizQuestion> {
        (0..3)
            .map(|i| QuizQuestion {
                question: format!("Q{}", i),
                options: vec!["a".into(), "b".into(), "c".into()],
                answer: i,
                explanation: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_two_of_three_rounds_to_67() {
        let questions = three_questions();
        let report = grade_quiz(&questions, &[0, 0, 2]);
        assert_eq!(report.correct, 2);
        assert_eq!(report.total, 3);
        assert_eq!(report.score(), 67);
        assert_eq!(report.missed, vec![1]);
        assert!(!report.is_perfect());
    }

    #[test]
    fn test_all_correct_is_perfect() {
        let questions = three_questions();
        let report = grade_quiz(&questions, &[0, 1, 2]);
        assert_eq!(report.score(), 100);
        assert!(report.is_perfect());
        assert!(report.missed.is_empty());
    }

    #[test]
    fn test_unanswered_questions_count_as_missed() {
        let questions = three_questions();
        let report = grade_quiz(&questions, &[0]);
        assert_eq!(report.correct, 1);
        assert_eq!(report.missed, vec![1, 2]);
    }

    #[test]
    fn test_parse_grade_reads_json() {
        let graded = parse_grade("{\"score\": 85, \"feedback\": \"Close enough\"}").unwrap();
        assert_eq!(graded.score, 85);
        assert_eq!(graded.feedback, "Close enough");
    }

    #[test]
    fn test_parse_grade_clamps_overshoot() {
        let graded = parse_grade("{\"score\": 150, \"feedback\": \"generous\"}").unwrap();
        assert_eq!(graded.score, 100);
    }

    #[test]
    fn test_parse_grade_falls_back_to_bare_number() {
        let graded = parse_grade("I would give this answer 72 out of 100.").unwrap();
        assert_eq!(graded.score, 72);
        assert!(graded.feedback.is_empty());
    }

    #[test]
    fn test_parse_grade_rejects_scoreless_prose() {
        let err = parse_grade("no numeric grade here").unwrap_err();
        assert!(matches!(err, SenseiError::MalformedModelOutput { .. }));
    }
}
