// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Anthropic messages provider
//!
//! The messages endpoint rejects inline `system` entries, so they are
//! lifted into the top-level `system` field before sending.

use super::TextProvider;
use crate::config::AiConfig;
use crate::error::{Result, SenseiError};
use crate::models::{ChatMessage, MessageRole, ProviderKind};
use async_trait::async_trait;

const ANTHROPIC_API: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const ANTHROPIC_MODEL: &str = "claude-3-5-haiku-20241022";

pub struct AnthropicProvider {
    api_key: Option<String>,
    client: reqwest::Client,
}

impl AnthropicProvider {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            api_key: config.anthropic_api_key.clone(),
            client: reqwest::Client::new(),
        }
    }
}

/// Build the request payload, separating system entries from the turn list
fn build_payload(messages: &[ChatMessage], max_tokens: u32) -> serde_json::Value {
    let mut system_prompt = String::new();
    let mut turns = Vec::new();

    for msg in messages {
        match msg.role {
            MessageRole::System => {
                if !system_prompt.is_empty() {
                    system_prompt.push_str("\n\n");
                }
                system_prompt.push_str(&msg.content);
            }
            MessageRole::User | MessageRole::Assistant => {
                turns.push(serde_json::json!({
                    "role": msg.role,
                    "content": [{"type": "text", "text": msg.content}],
                }));
            }
        }
    }

    let mut payload = serde_json::json!({
        "model": ANTHROPIC_MODEL,
        "max_tokens": max_tokens,
        "messages": turns,
    });
    if !system_prompt.is_empty() {
        payload["system"] = serde_json::Value::String(system_prompt);
    }
    payload
}

#[async_trait]
impl TextProvider for AnthropicProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    fn name(&self) -> &'static str {
        "Anthropic"
    }

    fn model_id(&self) -> &'static str {
        ANTHROPIC_MODEL
    }

    fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, messages: &[ChatMessage], max_tokens: u32) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SenseiError::ProviderDisabled(self.name().to_string()))?;

        let request_body = build_payload(messages, max_tokens);

        let response = self
            .client
            .post(ANTHROPIC_API)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
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

        let text = response_body["content"][0]["text"]
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
