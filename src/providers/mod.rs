// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! AI provider integrations
//!
//! Text-generation providers, in failover declaration order:
//! - OpenAI (`OPENAI_API_KEY`)
//! - Anthropic (`ANTHROPIC_API_KEY`)
//! - Google Gemini (`GEMINI_API_KEY` or `GOOGLE_API_KEY`)
//!
//! Image-generation providers:
//! - OpenAI Images (`OPENAI_API_KEY`)
//! - Together FLUX (`TOGETHER_API_KEY`)
//!
//! A provider with no credential in the startup config counts as disabled
//! and is skipped by the router without consuming an attempt.

pub mod anthropic;
pub mod gemini;
pub mod image;
pub mod openai;

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use image::{ImageProvider, OpenAiImageProvider, TogetherImageProvider};
pub use openai::OpenAiProvider;

use crate::config::AiConfig;
use crate::error::Result;
use crate::models::{ChatMessage, ProviderKind};
use async_trait::async_trait;

/// Trait for text-generation providers
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Get the provider kind
    fn kind(&self) -> ProviderKind;

    /// Get the provider name for display and provenance
    fn name(&self) -> &'static str;

    /// Fixed model identifier this provider completes with
    fn model_id(&self) -> &'static str;

    /// Check if this provider has a credential configured
    fn is_enabled(&self) -> bool;

    /// Perform exactly one completion call.
    ///
    /// Fails on transport errors, non-success HTTP status, and empty
    /// completions so the router's catch-and-continue logic can act.
    async fn complete(&self, messages: &[ChatMessage], max_tokens: u32) -> Result<String>;
}

/// Build the text provider chain in declaration order
pub fn default_text_providers(config: &AiConfig) -> Vec<Box<dyn TextProvider>> {
    vec![
        Box::new(OpenAiProvider::new(config)),
        Box::new(AnthropicProvider::new(config)),
        Box::new(GeminiProvider::new(config)),
    ]
}

/// Build the image provider chain in declaration order
pub fn default_image_providers(config: &AiConfig) -> Vec<Box<dyn ImageProvider>> {
    vec![
        Box::new(OpenAiImageProvider::new(config)),
        Box::new(TogetherImageProvider::new(config)),
    ]
}
