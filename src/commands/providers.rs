// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Provider chain inspection and testing

use anyhow::Result;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use crate::colors::{Status, StyledText};
use crate::config::{AiConfig, SenseiConfig};
use crate::models::{ChatMessage, DispatchOptions, ProviderKind};
use crate::router::{AiRouter, ImageRouter};

#[derive(Tabled)]
struct ProviderRow {
    #[tabled(rename = "Order")]
    order: usize,
    #[tabled(rename = "Provider")]
    provider: String,
    #[tabled(rename = "Role")]
    role: &'static str,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Key Env")]
    key_env: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
}

fn yes_no(enabled: bool) -> String {
    if enabled { "yes" } else { "no" }.to_string()
}

/// List text and image providers in failover order with their state
pub fn list_providers() -> Result<()> {
    let ai = AiConfig::from_env();
    let router = AiRouter::new(&ai);
    let image_router = ImageRouter::new(&ai);

    let mut rows = Vec::new();
    for (i, provider) in router.providers().iter().enumerate() {
        rows.push(ProviderRow {
            order: i + 1,
            provider: provider.name().to_string(),
            role: "text",
            model: provider.model_id().to_string(),
            key_env: provider.kind().api_key_env_var().to_string(),
            enabled: yes_no(provider.is_enabled()),
        });
    }
    for (i, provider) in image_router.providers().iter().enumerate() {
        rows.push(ProviderRow {
            order: i + 1,
            provider: provider.name().to_string(),
            role: "image",
            model: provider.model_id().to_string(),
            key_env: provider.key_env_var().to_string(),
            enabled: yes_no(provider.is_enabled()),
        });
    }

    let table = Table::new(rows)
        .with(TableStyle::ascii_rounded())
        .to_string();
    println!("{}", table);

    let enabled = router.enabled_providers().len();
    println!(
        "\n{} text provider(s) enabled. Disabled providers are skipped during failover.",
        enabled.to_string().count()
    );
    Ok(())
}

/// Dispatch a trivial prompt and report which provider answered
pub fn test_providers(provider: Option<&str>) -> Result<()> {
    let config = SenseiConfig::load()?;
    let preferred = super::parse_provider_flag(provider)?.or(config.preferred_provider);
    let router = AiRouter::new(&AiConfig::from_env());

    if router.enabled_providers().is_empty() {
        println!(
            "{} No providers are configured. Set at least one of:",
            Status::warn()
        );
        for kind in ProviderKind::all() {
            println!("  - {}", kind.api_key_env_var().ident());
        }
        return Ok(());
    }

    println!("{} Dispatching a test prompt...", Status::think());
    let messages = [ChatMessage::user("Reply with the single word: ready")];
    let options = DispatchOptions::default()
        .with_max_tokens(50)
        .with_preferred(preferred);

    let rt = super::runtime()?;
    let completion = rt.block_on(router.dispatch(&messages, &options))?;
    println!(
        "{} {} answered with {}: {}",
        Status::ok(),
        completion.provider.provider(),
        completion.model,
        completion.text.trim()
    );
    Ok(())
}
