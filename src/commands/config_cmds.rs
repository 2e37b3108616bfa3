// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Configuration commands

use std::path::PathBuf;

use anyhow::Result;

use crate::colors::{Status, StyledText};
use crate::config::{AiConfig, SenseiConfig};
use crate::models::ProviderKind;
use crate::providers::image::parse_size;

/// Show the current configuration and credential visibility
pub fn show_config() -> Result<()> {
    let config = SenseiConfig::load()?;
    let ai = AiConfig::from_env();

    println!("{}", "Configuration".header());
    println!(
        "  preferred-provider: {}",
        config
            .preferred_provider
            .map(|p| p.display_name().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    );
    println!("  max-tokens:         {}", config.max_tokens);
    println!("  image-size:         {}", config.image_size);
    println!("  database-path:      {}", config.database_path()?.display());

    println!();
    println!("{}", "Credentials (from environment)".header());
    for kind in ProviderKind::all() {
        let state = if ai.has_key(kind) {
            "set".success()
        } else {
            "missing".warning()
        };
        println!("  {:<20} {}", kind.api_key_env_var(), state);
    }
    let together = if ai.together_api_key.is_some() {
        "set".success()
    } else {
        "missing".warning()
    };
    println!("  {:<20} {}", "TOGETHER_API_KEY", together);

    Ok(())
}

/// Set one configuration value
pub fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = SenseiConfig::load()?;

    match key {
        "preferred-provider" | "provider" => {
            if value.eq_ignore_ascii_case("none") {
                config.preferred_provider = None;
            } else {
                let kind = ProviderKind::from_name(value).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Unknown provider: {} (expected openai, anthropic, gemini, or none)",
                        value
                    )
                })?;
                config.preferred_provider = Some(kind);
            }
        }
        "max-tokens" | "tokens" => {
            let tokens: u32 = value
                .parse()
                .map_err(|_| anyhow::anyhow!("max-tokens must be a positive integer"))?;
            if tokens == 0 {
                anyhow::bail!("max-tokens must be greater than zero");
            }
            config.max_tokens = tokens;
        }
        "image-size" => {
            parse_size(value)?;
            config.image_size = value.to_string();
        }
        "database-path" => {
            if value.eq_ignore_ascii_case("default") {
                config.database_path = None;
            } else {
                config.database_path = Some(PathBuf::from(value));
            }
        }
        _ => anyhow::bail!(
            "Unknown key: {} (expected preferred-provider, max-tokens, image-size, or database-path)",
            key
        ),
    }

    config.save()?;
    println!("{} Set {} = {}", Status::ok(), key.ident(), value);
    Ok(())
}

/// Print the configuration file path
pub fn config_path() -> Result<()> {
    println!("{}", SenseiConfig::config_path()?.display());
    Ok(())
}
