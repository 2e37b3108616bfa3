// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! OpenAI chat completions provider

use super::TextProvider;
use crate::config::AiConfig;
use crate::error::{Result, SenseiError};
use crate::models::{ChatMessage, ProviderKind};
use async_trait::async_trait;

const OPENAI_CHAT_API: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_MODEL: &str = "gpt-4o-mini";

/// OpenAI provider. Roles pass through inline; the chat completions
/// endpoint accepts `system` entries directly in the message list.
pub struct OpenAiProvider {
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            api_key: config.openai_api_key.clone(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TextProvider for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAI
    }

    fn name(&self) -> &'static str {
        "OpenAI"
    }

    fn model_id(&self) -> &'static str {
        OPENAI_MODEL
    }

    fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, messages: &[ChatMessage], max_tokens: u32) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SenseiError::ProviderDisabled(self.name().to_string()))?;

        let request_body = serde_json::json!({
            "model": OPENAI_MODEL,
            "messages": messages,
            "max_tokens": max_tokens,
        });

        let response = self
            .client
            .post(OPENAI_CHAT_API)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| SenseiError::ProviderFailed {
                provider: self.name().to_string(),
                reason: format!("HTTP request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body: String = response.text().await.unwrap_or_default();
            return Err(SenseiError::ProviderFailed {
                provider: self.name().to_string(),
                reason: format!("API error ({}): {}", status, body),
            });
        }

        let response_body: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| SenseiError::ProviderFailed {
                    provider: self.name().to_string(),
                    reason: format!("Failed to parse response: {}", e),
                })?;

        let text = response_body["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(SenseiError::EmptyCompletion(self.name().to_string()));
        }

        Ok(text)
    }
}
