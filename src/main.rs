// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: Apache-2.0
//! Sensei - Main entry point
//!
//! An AI study tutor in the terminal, with failover across LLM providers.

mod cli;
mod colors;
mod commands;
mod config;
mod error;
mod models;
mod progress;
mod providers;
mod router;
mod scheduler;
mod storage;
mod tutor;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, ConfigCommands, ProviderCommands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // ====================================================================
        // Study Commands
        // ====================================================================
        Commands::Ask {
            topic,
            provider,
            tokens,
            subject,
        } => commands::ask(&topic, provider.as_deref(), tokens, subject.as_deref()),

        Commands::Quiz {
            subject,
            count,
            difficulty,
            provider,
            no_shuffle,
        } => commands::quiz(
            &subject,
            count,
            difficulty.as_deref(),
            provider.as_deref(),
            no_shuffle,
        ),

        Commands::Exam {
            subject,
            choice,
            short,
            provider,
        } => commands::exam(&subject, choice, short, provider.as_deref()),

        Commands::Review { subject, limit } => commands::review(subject.as_deref(), limit),

        Commands::Illustrate {
            prompt,
            output,
            size,
        } => commands::illustrate(&prompt, &output, size.as_deref()),

        // ====================================================================
        // Progress Commands
        // ====================================================================
        Commands::Profile => commands::profile(),

        // ====================================================================
        // Provider Commands
        // ====================================================================
        Commands::Provider { command } => match command {
            Some(ProviderCommands::Test { provider }) => {
                commands::test_providers(provider.as_deref())
            }
            Some(ProviderCommands::List) | None => commands::list_providers(),
        },

        // ====================================================================
        // Config Commands
        // ====================================================================
        Commands::Config { command } => match command {
            Some(ConfigCommands::Set { key, value }) => commands::set_config(&key, &value),
            Some(ConfigCommands::Path) => commands::config_path(),
            Some(ConfigCommands::Show) | None => commands::show_config(),
        },

        // ====================================================================
        // Easter Egg
        // ====================================================================
        Commands::Banner => {
            print_banner();
            Ok(())
        }
    }
}

fn print_banner() {
    use colored::Colorize;

    let banner = r#"
     .d8888b.  8888888888 888b    888  .d8888b.  8888888888 8888888
    d88P  Y88b 888        8888b   888 d88P  Y88b 888          888
    Y88b.      888        88888b  888 Y88b.      888          888
     "Y888b.   8888888    888Y88b 888  "Y888b.   8888888      888
        "Y88b. 888        888 Y88b888     "Y88b. 888          888
          "888 888        888  Y88888       "888 888          888
    Y88b  d88P 888        888   Y8888 Y88b  d88P 888          888
     "Y8888P"  8888888888 888    Y888  "Y8888P"  8888888888 8888888
    "#;

    let subtitle = "Sensei - The AI Study Master that Outlasts Provider Outages";
    let tagline = "     Ask, quiz, review: knowledge that compounds";
    let version = format!("                       v{}", env!("CARGO_PKG_VERSION"));

    println!("{}", banner.cyan().bold());
    println!("{}", subtitle.white().bold());
    println!("{}", tagline.bright_black());
    println!("{}", version.bright_black());
    println!();

    // Random fun messages
    let messages = [
        "[*] Wax on, wax off, level up",
        "[*] Repetition is the mother of learning",
        "[*] When one model stumbles, the next one answers",
        "[*] Your streak misses you already",
        "[*] Cards come due, knowledge compounds",
        "[*] Built with Rust, graded without mercy",
        "[*] Every master was once a beginner",
        "[*] Ask better questions, earn better answers",
    ];

    let idx = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as usize % messages.len())
        .unwrap_or(0);

    println!("    {}", messages[idx].bright_yellow());
    println!();
}
