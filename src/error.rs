// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Error types for sensei

use thiserror::Error;

#[derive(Error, Debug)]
#[allow(dead_code)]
pub enum SenseiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Provider '{0}' is not configured (missing API key)")]
    ProviderDisabled(String),

    #[error("Provider '{provider}' request failed: {reason}")]
    ProviderFailed { provider: String, reason: String },

    #[error("Provider '{0}' returned an empty completion")]
    EmptyCompletion(String),

    #[error("All AI providers exhausted ({} attempted)", .attempts.len())]
    AllProvidersExhausted { attempts: Vec<String> },

    #[error("Model returned malformed {expected}: {detail}")]
    MalformedModelOutput { expected: String, detail: String },

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Unknown difficulty: {0} (expected easy, medium, or hard)")]
    UnknownDifficulty(String),

    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Invalid image size '{0}' (expected WIDTHxHEIGHT, e.g. 1024x1024)")]
    InvalidImageSize(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Base64 decode error: {0}")]
    DecodeError(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, SenseiError>;
