// Copyright (c) 2024-2028 Nervosys LLC
// SPDX-License-Identifier: Apache-2.0
//! Sensei - Library
//!
//! An AI study tutor built on a failover chain of LLM providers.
//!
//! ## Provider Chain
//!
//! Text requests try each configured provider in a fixed order until one
//! answers:
//!
//! - **OpenAI** - gpt-4o-mini
//! - **Anthropic** - claude-3-5-haiku
//! - **Gemini** - gemini-2.5-flash
//!
//! Image requests run through a parallel two-entry chain (OpenAI Images,
//! Together FLUX). Providers without an API key in the environment are
//! skipped silently; a preferred provider moves to the front without
//! disturbing the order of the rest.
//!
//! ## Study Loop
//!
//! ```rust,ignore
//! use sensei::config::AiConfig;
//! use sensei::models::{ChatMessage, DispatchOptions};
//! use sensei::router::AiRouter;
//!
//! let router = AiRouter::new(&AiConfig::from_env());
//! let messages = [ChatMessage::user("Explain ownership in Rust")];
//! let completion = router.dispatch(&messages, &DispatchOptions::default()).await?;
//! println!("{} (via {})", completion.text, completion.provider);
//! ```
//!
//! Quiz scores feed a SuperMemo-2 scheduler (`scheduler`), an XP/level/streak
//! tracker (`progress`), and a local SQLite store (`storage`).

// Library modules export public APIs for external use - suppress dead_code warnings
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod cli;
pub mod colors;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod progress;
pub mod providers;
pub mod router;
pub mod scheduler;
pub mod storage;
pub mod tutor;

// Re-export commonly used items
pub use cli::{Cli, Commands, ConfigCommands, ProviderCommands};
pub use config::{AiConfig, SenseiConfig};
pub use error::{Result, SenseiError};
pub use models::{
    ChatMessage, Completion, Difficulty, DispatchOptions, MessageRole, ProviderKind,
};
pub use progress::{level_for_xp, updated_streak, Achievement, ProgressSnapshot};
pub use providers::{ImageProvider, TextProvider};
pub use router::{AiRouter, GeneratedImage, ImageRouter};
pub use scheduler::{quality_from_score, ReviewState};
pub use storage::{Attempt, AttemptKind, Card, Profile, StudyStore, SubjectRecord};
pub use tutor::{ExamQuestion, QuizQuestion, QuizReport};
