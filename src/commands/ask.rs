// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Topic explanation command

use anyhow::Result;

use crate::colors::{Status, StyledText};
use crate::config::{AiConfig, SenseiConfig};
use crate::models::{Difficulty, DispatchOptions};
use crate::router::AiRouter;
use crate::tutor::prompts;

/// Explain a topic through the provider chain
pub fn ask(
    topic: &[String],
    provider: Option<&str>,
    tokens: Option<u32>,
    subject: Option<&str>,
) -> Result<()> {
    let topic = topic.join(" ");
    let config = SenseiConfig::load()?;
    let preferred = super::parse_provider_flag(provider)?.or(config.preferred_provider);

    // Pitch the answer at the subject's stored difficulty when one is named
    let difficulty = match subject {
        Some(subject) => super::open_store(&config)?.difficulty(subject)?,
        None => Difficulty::Medium,
    };

    let router = AiRouter::new(&AiConfig::from_env());
    let options = DispatchOptions::default()
        .with_max_tokens(tokens.unwrap_or(config.max_tokens))
        .with_preferred(preferred);

    println!("{} Thinking...", Status::think());
    let rt = super::runtime()?;
    let completion = rt.block_on(router.dispatch(&prompts::explain(&topic, difficulty), &options))?;

    println!();
    println!("{}", completion.text.trim());
    println!();
    println!(
        "{}",
        format!("via {}/{}", completion.provider, completion.model).separator()
    );

    Ok(())
}
