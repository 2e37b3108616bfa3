// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Concept illustration command

use std::path::Path;

use anyhow::Result;

use crate::colors::{Status, StyledText};
use crate::config::{AiConfig, SenseiConfig};
use crate::router::ImageRouter;

/// Generate an illustration and write it to disk
pub fn illustrate(prompt: &[String], output: &Path, size: Option<&str>) -> Result<()> {
    let prompt = prompt.join(" ");
    let config = SenseiConfig::load()?;
    let size = size.unwrap_or(&config.image_size);

    let router = ImageRouter::new(&AiConfig::from_env());
    println!(
        "{} Painting {} at {}...",
        Status::think(),
        prompt.ident(),
        size
    );

    let rt = super::runtime()?;
    let image = rt.block_on(router.generate(&prompt, size))?;
    std::fs::write(output, &image.bytes)?;

    println!(
        "{} Wrote {} ({} bytes) via {}/{}",
        Status::ok(),
        output.display(),
        image.bytes.len(),
        image.provider.provider(),
        image.model
    );
    Ok(())
}
