// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Image-generation providers
//!
//! Image backends are slower than text completion, so each attempt carries
//! an explicit per-call timeout; a timed-out attempt fails that provider
//! and falls through to the next one in the chain.

use crate::config::AiConfig;
use crate::error::{Result, SenseiError};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::time::Duration;

const OPENAI_IMAGE_API: &str = "https://api.openai.com/v1/images/generations";
const OPENAI_IMAGE_MODEL: &str = "dall-e-3";
const OPENAI_IMAGE_TIMEOUT_SECS: u64 = 30;

const TOGETHER_IMAGE_API: &str = "https://api.together.xyz/v1/images/generations";
const TOGETHER_IMAGE_MODEL: &str = "black-forest-labs/FLUX.1-schnell";
const TOGETHER_IMAGE_TIMEOUT_SECS: u64 = 25;

/// Trait for image-generation providers
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Get the provider name for display and provenance
    fn name(&self) -> &'static str;

    /// Fixed model identifier this provider renders with
    fn model_id(&self) -> &'static str;

    /// Environment variable holding this provider's API key
    fn key_env_var(&self) -> &'static str;

    /// Check if this provider has a credential configured
    fn is_enabled(&self) -> bool;

    /// Render one image and return the PNG bytes
    async fn generate(&self, prompt: &str, size: &str) -> Result<Vec<u8>>;
}

/// Parse a `WIDTHxHEIGHT` size string
pub fn parse_size(size: &str) -> Result<(u32, u32)> {
    let mut parts = size.splitn(2, 'x');
    let width = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    let height = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    match (width, height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(SenseiError::InvalidImageSize(size.to_string())),
    }
}

/// Pull the base64 payload out of a `data[0].b64_json` response and decode it
fn decode_b64_image(provider: &str, response_body: &serde_json::Value) -> Result<Vec<u8>> {
    let b64 = response_body["data"][0]["b64_json"]
        .as_str()
        .ok_or_else(|| SenseiError::ProviderFailed {
            provider: provider.to_string(),
            reason: "response contained no image payload".to_string(),
        })?;
    Ok(BASE64.decode(b64)?)
}

// =============================================================================
// OpenAI Images
// =============================================================================

pub struct OpenAiImageProvider {
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAiImageProvider {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            api_key: config.openai_api_key.clone(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ImageProvider for OpenAiImageProvider {
    fn name(&self) -> &'static str {
        "OpenAI Images"
    }

    fn model_id(&self) -> &'static str {
        OPENAI_IMAGE_MODEL
    }

    fn key_env_var(&self) -> &'static str {
        "OPENAI_API_KEY"
    }

    fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, prompt: &str, size: &str) -> Result<Vec<u8>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SenseiError::ProviderDisabled(self.name().to_string()))?;
        let (width, height) = parse_size(size)?;

        let request_body = serde_json::json!({
            "model": OPENAI_IMAGE_MODEL,
            "prompt": prompt,
            "n": 1,
            "size": format!("{}x{}", width, height),
            "response_format": "b64_json",
        });

        let response = self
            .client
            .post(OPENAI_IMAGE_API)
            .timeout(Duration::from_secs(OPENAI_IMAGE_TIMEOUT_SECS))
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

        decode_b64_image(self.name(), &response_body)
    }
}

// =============================================================================
// Together FLUX
// =============================================================================

pub struct TogetherImageProvider {
    api_key: Option<String>,
    client: reqwest::Client,
}

impl TogetherImageProvider {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            api_key: config.together_api_key.clone(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ImageProvider for TogetherImageProvider {
    fn name(&self) -> &'static str {
        "Together"
    }

    fn model_id(&self) -> &'static str {
        TOGETHER_IMAGE_MODEL
    }

    fn key_env_var(&self) -> &'static str {
        "TOGETHER_API_KEY"
    }

    fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, prompt: &str, size: &str) -> Result<Vec<u8>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SenseiError::ProviderDisabled(self.name().to_string()))?;
        let (width, height) = parse_size(size)?;

        let request_body = serde_json::json!({
            "model": TOGETHER_IMAGE_MODEL,
            "prompt": prompt,
            "width": width,
            "height": height,
            "n": 1,
            "response_format": "b64_json",
        });

        let response = self
            .client
            .post(TOGETHER_IMAGE_API)
            .timeout(Duration::from_secs(TOGETHER_IMAGE_TIMEOUT_SECS))
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

        decode_b64_image(self.name(), &response_body)
    }
}
