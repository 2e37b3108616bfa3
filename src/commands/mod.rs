// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: Apache-2.0
//! Command implementations

mod ask;
mod config_cmds;
mod exam;
mod illustrate;
mod profile;
mod providers;
mod quiz;
mod review;

pub use ask::*;
pub use config_cmds::*;
pub use exam::*;
pub use illustrate::*;
pub use profile::*;
pub use providers::*;
pub use quiz::*;
pub use review::*;

use anyhow::Result;

use crate::colors::{Status, StyledText};
use crate::config::SenseiConfig;
use crate::models::ProviderKind;
use crate::progress;
use crate::storage::StudyStore;

/// Runtime for bridging into async provider dispatch
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

/// Open the study store at the configured location
pub(crate) fn open_store(config: &SenseiConfig) -> Result<StudyStore> {
    let path = config.database_path()?;
    Ok(StudyStore::open(&path)?)
}

/// Parse a `--provider` flag value
pub(crate) fn parse_provider_flag(flag: Option<&str>) -> Result<Option<ProviderKind>> {
    match flag {
        None => Ok(None),
        Some(name) => ProviderKind::from_name(name).map(Some).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown provider: {} (expected openai, anthropic, or gemini)",
                name
            )
        }),
    }
}

/// Unlock and announce any achievements the latest totals have earned
pub(crate) fn announce_new_achievements(store: &StudyStore) -> Result<()> {
    let snapshot = store.progress_snapshot()?;
    for achievement in progress::earned_achievements(&snapshot) {
        if store.unlock_achievement(achievement.id())? {
            println!(
                "{} Achievement unlocked: {} - {}",
                Status::achievement(),
                achievement.title().header(),
                achievement.description()
            );
        }
    }
    Ok(())
}
