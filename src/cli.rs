// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! CLI argument definitions using clap derive macros

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sensei - AI study tutor in the terminal
#[derive(Parser)]
#[command(name = "sensei")]
#[command(author = "Nervosys")]
#[command(version)]
#[command(about = "Study with an AI tutor that fails over across OpenAI, Anthropic, and Gemini", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    // ============================================================================
    // Study Commands
    // ============================================================================
    /// Ask for an explanation of a topic
    Ask {
        /// Topic or question to explain
        #[arg(required = true, num_args = 1..)]
        topic: Vec<String>,

        /// Provider to try first (openai, anthropic, gemini)
        #[arg(long, short = 'p')]
        provider: Option<String>,

        /// Maximum output tokens
        #[arg(long, short = 't')]
        tokens: Option<u32>,

        /// Subject whose stored difficulty pitches the answer
        #[arg(long, short = 's')]
        subject: Option<String>,
    },

    /// Take a multiple-choice quiz and earn XP
    Quiz {
        /// Subject to quiz on
        subject: String,

        /// Number of questions
        #[arg(long, short = 'n', default_value = "5")]
        count: usize,

        /// Override the stored difficulty (easy, medium, hard)
        #[arg(long, short = 'd')]
        difficulty: Option<String>,

        /// Provider to try first (openai, anthropic, gemini)
        #[arg(long, short = 'p')]
        provider: Option<String>,

        /// Keep option order exactly as generated
        #[arg(long)]
        no_shuffle: bool,
    },

    /// Take a mixed multiple-choice and short-answer exam
    Exam {
        /// Subject to examine
        subject: String,

        /// Number of multiple-choice questions
        #[arg(long, default_value = "4")]
        choice: usize,

        /// Number of short-answer questions
        #[arg(long, default_value = "2")]
        short: usize,

        /// Provider to try first (openai, anthropic, gemini)
        #[arg(long, short = 'p')]
        provider: Option<String>,
    },

    /// Review flashcards that are due today
    #[command(visible_alias = "rev")]
    Review {
        /// Restrict the session to one subject
        #[arg(long, short = 's')]
        subject: Option<String>,

        /// Maximum cards in this session
        #[arg(long, short = 'n', default_value = "10")]
        limit: usize,
    },

    /// Generate an illustration for a concept
    Illustrate {
        /// What to draw
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,

        /// Output file
        #[arg(long, short = 'o', default_value = "sensei.png")]
        output: PathBuf,

        /// Image size as WIDTHxHEIGHT (defaults to the configured size)
        #[arg(long)]
        size: Option<String>,
    },

    // ============================================================================
    // Progress Commands
    // ============================================================================
    /// Show XP, level, streak, subjects, and achievements
    Profile,

    // ============================================================================
    // Provider Commands
    // ============================================================================
    /// Inspect and test the AI provider chain
    Provider {
        #[command(subcommand)]
        command: Option<ProviderCommands>,
    },

    // ============================================================================
    // Config Commands
    // ============================================================================
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    // ============================================================================
    // Easter Egg
    // ============================================================================
    /// Show banner
    #[command(hide = true)]
    Banner,
}

// ============================================================================
// Provider Subcommands
// ============================================================================

#[derive(Subcommand)]
pub enum ProviderCommands {
    /// List providers in failover order with their configuration state
    #[command(visible_alias = "ls")]
    List,

    /// Send a test prompt through the failover chain
    Test {
        /// Provider to try first (openai, anthropic, gemini)
        #[arg(long, short = 'p')]
        provider: Option<String>,
    },
}

// ============================================================================
// Config Subcommands
// ============================================================================

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key (preferred-provider, max-tokens, image-size, database-path)
        key: String,

        /// New value
        value: String,
    },

    /// Print the configuration file path
    Path,
}
