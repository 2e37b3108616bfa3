// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Google Gemini provider
//!
//! Gemini takes no inline system role: a leading run of `system` entries
//! becomes the `systemInstruction` field and the remaining history is sent
//! as alternating `user`/`model` turns.

use super::TextProvider;
use crate::config::AiConfig;
use crate::error::{Result, SenseiError};
use crate::models::{ChatMessage, MessageRole, ProviderKind};
use async_trait::async_trait;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_MODEL: &str = "gemini-2.5-flash";

pub struct GeminiProvider {
    api_key: Option<String>,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            api_key: config.gemini_api_key.clone(),
            client: reqwest::Client::new(),
        }
    }
}

/// Map a role onto Gemini's two-role turn scheme
fn turn_role(role: MessageRole) -> &'static str {
    match role {
        MessageRole::Assistant => "model",
        // Stray system entries after the leading run have no native slot
        MessageRole::User | MessageRole::System => "user",
    }
}

/// Build the request payload with the system split described above
fn build_payload(messages: &[ChatMessage], max_tokens: u32) -> serde_json::Value {
    let leading_system = messages
        .iter()
        .take_while(|m| m.role == MessageRole::System)
        .count();

    let instruction = messages[..leading_system]
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    let contents: Vec<serde_json::Value> = messages[leading_system..]
        .iter()
        .map(|m| {
            serde_json::json!({
                "role": turn_role(m.role),
                "parts": [{"text": m.content}],
            })
        })
        .collect();

    let mut payload = serde_json::json!({
        "contents": contents,
        "generationConfig": { "maxOutputTokens": max_tokens },
    });
    if !instruction.is_empty() {
        payload["systemInstruction"] = serde_json::json!({ "parts": [{"text": instruction}] });
    }
    payload
}

#[async_trait]
impl TextProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn name(&self) -> &'static str {
        "Gemini"
    }

    fn model_id(&self) -> &'static str {
        GEMINI_MODEL
    }

    fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, messages: &[ChatMessage], max_tokens: u32) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SenseiError::ProviderDisabled(self.name().to_string()))?;

        let endpoint = format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_API_BASE, GEMINI_MODEL, api_key
        );
        let request_body = build_payload(messages, max_tokens);

        let response = self
            .client
            .post(&endpoint)
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

        let text = response_body["candidates"][0]["content"]["parts"][0]["text"]
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
