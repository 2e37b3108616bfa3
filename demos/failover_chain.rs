//! Provider failover examples for the sensei library
//!
//! Demonstrates the text-provider chain:
//! - Listing providers in failover order with credential status
//! - Steering dispatch with a preferred provider
//! - Sending a prompt through the chain (only when a key is configured)
//!
//! Run with: cargo run --example failover_chain

use sensei::config::AiConfig;
use sensei::models::{ChatMessage, DispatchOptions, ProviderKind};
use sensei::router::AiRouter;

fn main() -> anyhow::Result<()> {
    println!("=== Sensei Failover Chain Examples ===\n");

    // ========================================================================
    // Example 1: The chain in failover order
    // ========================================================================
    println!("1. Text providers, tried top to bottom:");

    let config = AiConfig::from_env();
    let router = AiRouter::new(&config);

    for (i, provider) in router.providers().iter().enumerate() {
        let status = if provider.is_enabled() { "+" } else { "o" };
        println!(
            "   {} {}. {} ({}) via {}",
            status,
            i + 1,
            provider.name(),
            provider.model_id(),
            provider.kind().api_key_env_var()
        );
    }

    let enabled = router.enabled_providers().len();
    println!("   {} of {} enabled", enabled, router.providers().len());

    // ========================================================================
    // Example 2: Steering with a preference
    // ========================================================================
    println!("\n2. Preferring a provider:");

    let options = DispatchOptions::default()
        .with_max_tokens(100)
        .with_preferred(Some(ProviderKind::Gemini));
    println!("   max_tokens = {}", options.max_tokens);
    println!(
        "   preferred  = {}",
        options
            .preferred
            .map(|k| k.display_name())
            .unwrap_or("none")
    );
    println!("   The preferred provider moves to the front; the rest keep their order.");

    // ========================================================================
    // Example 3: Dispatching through the chain
    // ========================================================================
    println!("\n3. Dispatching a prompt:");

    if enabled == 0 {
        println!("   No API keys configured, skipping the live call.");
        println!("   Set OPENAI_API_KEY, ANTHROPIC_API_KEY, or GEMINI_API_KEY to try it.");
    } else {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let messages = [ChatMessage::user("Reply with the single word: ready")];
        match rt.block_on(router.dispatch(&messages, &DispatchOptions::default())) {
            Ok(completion) => {
                println!(
                    "   {} ({}) answered: {}",
                    completion.provider,
                    completion.model,
                    completion.text.trim()
                );
            }
            Err(e) => println!("   Every provider failed: {}", e),
        }
    }

    println!("\n=== Examples completed ===");
    Ok(())
}
