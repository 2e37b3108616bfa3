// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Provider failover routing
//!
//! The router walks a static, ordered provider chain and returns the first
//! successful completion together with its provenance. Providers without a
//! credential are skipped silently; a failed invocation is logged and the
//! next provider is tried. Each enabled provider gets exactly one attempt
//! per dispatch, with no retries or backoff, so failover stays fast and
//! callers never see a partial result.
//!
//! A dispatch call is stateless: the router holds nothing but the read-only
//! provider chain built at construction, so concurrent calls need no
//! locking.

use crate::config::AiConfig;
use crate::error::{Result, SenseiError};
use crate::models::{ChatMessage, Completion, DispatchOptions, ProviderKind};
use crate::providers::{
    default_image_providers, default_text_providers, ImageProvider, TextProvider,
};
use log::{debug, warn};

// =============================================================================
// Text Routing
// =============================================================================

/// Failover router over the text-generation provider chain
pub struct AiRouter {
    providers: Vec<Box<dyn TextProvider>>,
}

impl AiRouter {
    /// Build the router with the default provider chain
    pub fn new(config: &AiConfig) -> Self {
        Self {
            providers: default_text_providers(config),
        }
    }

    /// Build the router over an explicit provider chain
    pub fn with_providers(providers: Vec<Box<dyn TextProvider>>) -> Self {
        Self { providers }
    }

    /// Get the full provider chain in declaration order
    pub fn providers(&self) -> &[Box<dyn TextProvider>] {
        &self.providers
    }

    /// Get providers with a credential configured
    pub fn enabled_providers(&self) -> Vec<&dyn TextProvider> {
        self.providers
            .iter()
            .filter(|p| p.is_enabled())
            .map(|p| p.as_ref())
            .collect()
    }

    /// Stable partition: the preferred provider moves to the front, every
    /// other entry keeps its declaration order.
    fn attempt_order(&self, preferred: Option<ProviderKind>) -> Vec<&dyn TextProvider> {
        let mut order: Vec<&dyn TextProvider> = Vec::with_capacity(self.providers.len());
        if let Some(kind) = preferred {
            for provider in &self.providers {
                if provider.kind() == kind {
                    order.push(provider.as_ref());
                }
            }
            for provider in &self.providers {
                if provider.kind() != kind {
                    order.push(provider.as_ref());
                }
            }
        } else {
            for provider in &self.providers {
                order.push(provider.as_ref());
            }
        }
        order
    }

    /// Attempt delivery through the provider chain, first success wins.
    ///
    /// Fails with [`SenseiError::AllProvidersExhausted`] when no enabled
    /// provider produced a completion; the error carries the per-provider
    /// failure reasons gathered during the sweep.
    pub async fn dispatch(
        &self,
        messages: &[ChatMessage],
        options: &DispatchOptions,
    ) -> Result<Completion> {
        let mut attempts: Vec<String> = Vec::new();

        for provider in self.attempt_order(options.preferred) {
            if !provider.is_enabled() {
                debug!("skipping {} (no credential configured)", provider.name());
                continue;
            }

            match provider.complete(messages, options.max_tokens).await {
                Ok(text) => {
                    debug!("{} answered with {}", provider.name(), provider.model_id());
                    return Ok(Completion {
                        text,
                        provider: provider.name().to_string(),
                        model: provider.model_id().to_string(),
                    });
                }
                Err(e) => {
                    warn!("provider {} failed: {}", provider.name(), e);
                    attempts.push(format!("{}: {}", provider.name(), e));
                }
            }
        }

        Err(SenseiError::AllProvidersExhausted { attempts })
    }
}

// =============================================================================
// Image Routing
// =============================================================================

/// A rendered image with its provenance
pub struct GeneratedImage {
    /// PNG bytes
    pub bytes: Vec<u8>,
    /// Name of the provider that rendered it
    pub provider: String,
    /// Specific model identifier used
    pub model: String,
}

/// Failover router over the image-generation provider chain.
///
/// Same policy as [`AiRouter`]: ordered chain, skip disabled, one attempt
/// per provider, first success wins.
pub struct ImageRouter {
    providers: Vec<Box<dyn ImageProvider>>,
}

impl ImageRouter {
    /// Build the router with the default image provider chain
    pub fn new(config: &AiConfig) -> Self {
        Self {
            providers: default_image_providers(config),
        }
    }

    /// Build the router over an explicit provider chain
    pub fn with_providers(providers: Vec<Box<dyn ImageProvider>>) -> Self {
        Self { providers }
    }

    /// Get the full provider chain in declaration order
    pub fn providers(&self) -> &[Box<dyn ImageProvider>] {
        &self.providers
    }

    /// Render one image through the chain, first success wins
    pub async fn generate(&self, prompt: &str, size: &str) -> Result<GeneratedImage> {
        let mut attempts: Vec<String> = Vec::new();

        for provider in &self.providers {
            if !provider.is_enabled() {
                debug!("skipping {} (no credential configured)", provider.name());
                continue;
            }

            match provider.generate(prompt, size).await {
                Ok(bytes) => {
                    return Ok(GeneratedImage {
                        bytes,
                        provider: provider.name().to_string(),
                        model: provider.model_id().to_string(),
                    });
                }
                Err(e) => {
                    warn!("image provider {} failed: {}", provider.name(), e);
                    attempts.push(format!("{}: {}", provider.name(), e));
                }
            }
        }

        Err(SenseiError::AllProvidersExhausted { attempts })
    }
}
