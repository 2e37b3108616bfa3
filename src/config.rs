// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: Apache-2.0
//! Configuration: env-sourced provider credentials and the user config file

use crate::models::ProviderKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Read an environment variable, treating blank values as unset
fn env_key(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Provider credentials, read once at process start.
///
/// The router receives this struct at construction and never consults the
/// environment afterwards, so dispatch behavior stays deterministic.
#[derive(Debug, Clone, Default)]
pub struct AiConfig {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub together_api_key: Option<String>,
}

impl AiConfig {
    /// Snapshot credentials from the environment
    pub fn from_env() -> Self {
        Self {
            openai_api_key: env_key("OPENAI_API_KEY"),
            anthropic_api_key: env_key("ANTHROPIC_API_KEY"),
            // Both spellings are in the wild for Gemini keys
            gemini_api_key: env_key("GEMINI_API_KEY").or_else(|| env_key("GOOGLE_API_KEY")),
            together_api_key: env_key("TOGETHER_API_KEY"),
        }
    }

    /// Check whether a text provider has a credential present
    pub fn has_key(&self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::OpenAI => self.openai_api_key.is_some(),
            ProviderKind::Anthropic => self.anthropic_api_key.is_some(),
            ProviderKind::Gemini => self.gemini_api_key.is_some(),
        }
    }
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_image_size() -> String {
    "1024x1024".to_string()
}

/// Persisted user preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenseiConfig {
    /// Provider to try first on every dispatch
    pub preferred_provider: Option<ProviderKind>,

    /// Default output bound for generated text
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Default size for generated illustrations
    #[serde(default = "default_image_size")]
    pub image_size: String,

    /// Override for the study database location
    pub database_path: Option<PathBuf>,
}

impl Default for SenseiConfig {
    fn default() -> Self {
        Self {
            preferred_provider: None,
            max_tokens: default_max_tokens(),
            image_size: default_image_size(),
            database_path: None,
        }
    }
}

impl SenseiConfig {
    /// Load configuration from the default location
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Self = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join("sensei").join("config.json"))
    }

    /// Resolve the study database path (explicit override or platform default)
    pub fn database_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find local data directory"))?;
        Ok(data_dir.join("sensei").join("sensei.db"))
    }
}
