// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Terminal color scheme - Tokyo Night inspired
//!
//! Provides consistent styling across all CLI output.
//!
//! ## Tokyo Night Palette
//! - Blue (#7aa2f7) - prompts, indicators
//! - Green (#9ece6a) - success, OK, correct answers
//! - Purple (#bb9af7) - headers, labels
//! - Cyan (#7dcfff) - ids, providers, info
//! - Orange (#ff9e64) - counts, XP numbers
//! - Text (#c0caf5) - default text
//! - Dim (#565f89) - separators, borders

use colored::{ColoredString, Colorize};

/// Status indicators with consistent colors
pub struct Status;

impl Status {
    /// Success indicator: `[OK]` in green
    pub fn ok() -> ColoredString {
        "[OK]".green()
    }

    /// Info indicator: `[i]` in cyan
    pub fn info() -> ColoredString {
        "[i]".cyan()
    }

    /// Warning indicator: `[!]` in yellow/orange
    pub fn warn() -> ColoredString {
        "[!]".yellow()
    }

    /// Error indicator: `[X]` in red
    pub fn error() -> ColoredString {
        "[X]".red()
    }

    /// Model-waiting indicator: `[~]` in blue
    pub fn think() -> ColoredString {
        "[~]".blue()
    }

    /// Question indicator: `[?]` in blue bold
    pub fn question() -> ColoredString {
        "[?]".blue().bold()
    }

    /// Correct-answer indicator: `[+]` in green bold
    pub fn correct() -> ColoredString {
        "[+]".green().bold()
    }

    /// Missed-answer indicator: `[-]` in red
    pub fn miss() -> ColoredString {
        "[-]".red()
    }

    /// XP/reward indicator: `[*]` in yellow
    pub fn xp() -> ColoredString {
        "[*]".yellow()
    }

    /// Achievement indicator: `[A]` in magenta bold
    pub fn achievement() -> ColoredString {
        "[A]".magenta().bold()
    }

    /// Review-due indicator: `[R]` in blue
    pub fn review() -> ColoredString {
        "[R]".blue()
    }
}

/// Text styling helpers
pub trait StyledText {
    /// Style as a header/label (purple/magenta bold)
    fn header(&self) -> ColoredString;
    /// Style as a provider/model name (cyan)
    fn provider(&self) -> ColoredString;
    /// Style as an identifier (cyan)
    fn ident(&self) -> ColoredString;
    /// Style as a count/number (yellow/orange)
    fn count(&self) -> ColoredString;
    /// Style as success value (green)
    fn success(&self) -> ColoredString;
    /// Style as a separator (dim gray)
    fn separator(&self) -> ColoredString;
    /// Style as an error (red)
    fn err(&self) -> ColoredString;
    /// Style as a warning (yellow)
    fn warning(&self) -> ColoredString;
    /// Style as branding (cyan bold)
    fn brand(&self) -> ColoredString;
}

impl StyledText for str {
    fn header(&self) -> ColoredString {
        self.magenta().bold()
    }

    fn provider(&self) -> ColoredString {
        self.cyan()
    }

    fn ident(&self) -> ColoredString {
        self.cyan()
    }

    fn count(&self) -> ColoredString {
        self.yellow()
    }

    fn success(&self) -> ColoredString {
        self.green()
    }

    fn separator(&self) -> ColoredString {
        self.dimmed()
    }

    fn err(&self) -> ColoredString {
        self.red()
    }

    fn warning(&self) -> ColoredString {
        self.yellow()
    }

    fn brand(&self) -> ColoredString {
        self.cyan().bold()
    }
}

impl StyledText for String {
    fn header(&self) -> ColoredString {
        self.as_str().magenta().bold()
    }

    fn provider(&self) -> ColoredString {
        self.as_str().cyan()
    }

    fn ident(&self) -> ColoredString {
        self.as_str().cyan()
    }

    fn count(&self) -> ColoredString {
        self.as_str().yellow()
    }

    fn success(&self) -> ColoredString {
        self.as_str().green()
    }

    fn separator(&self) -> ColoredString {
        self.as_str().dimmed()
    }

    fn err(&self) -> ColoredString {
        self.as_str().red()
    }

    fn warning(&self) -> ColoredString {
        self.as_str().yellow()
    }

    fn brand(&self) -> ColoredString {
        self.as_str().cyan().bold()
    }
}

/// Create a horizontal separator line
pub fn separator(width: usize) -> ColoredString {
    "═".repeat(width).dimmed()
}

/// Create a simple separator line
pub fn line(width: usize) -> ColoredString {
    "=".repeat(width).dimmed()
}
