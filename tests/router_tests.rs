//! Tests for provider failover routing
//!
//! Covers the dispatch policy with instrumented in-memory providers:
//! - Declaration-order failover and first-success-wins
//! - Silent skipping of providers without credentials
//! - Preference override as a stable partition
//! - Exhaustion reporting when every attempt fails
//!
//! No test in this file touches the network except the one marked ignored.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sensei::config::AiConfig;
use sensei::error::{Result, SenseiError};
use sensei::models::{ChatMessage, DispatchOptions, ProviderKind};
use sensei::providers::TextProvider;
use sensei::router::AiRouter;

// ============================================================================
// Instrumented Provider
// ============================================================================

/// Provider double that records every invocation
struct ScriptedProvider {
    kind: ProviderKind,
    enabled: bool,
    /// `Ok` text to return, or `Err` failure reason
    reply: std::result::Result<&'static str, &'static str>,
    calls: Arc<AtomicUsize>,
    log: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait]
impl TextProvider for ScriptedProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn name(&self) -> &'static str {
        self.kind.display_name()
    }

    fn model_id(&self) -> &'static str {
        "scripted-model"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn complete(&self, _messages: &[ChatMessage], _max_tokens: u32) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push(self.kind.display_name());
        match self.reply {
            Ok(text) => Ok(text.to_string()),
            Err(reason) => Err(SenseiError::ProviderFailed {
                provider: self.kind.display_name().to_string(),
                reason: reason.to_string(),
            }),
        }
    }
}

/// A three-provider chain plus its per-provider call counters and the
/// shared invocation log
struct Chain {
    router: AiRouter,
    calls: [Arc<AtomicUsize>; 3],
    log: Arc<Mutex<Vec<&'static str>>>,
}

/// Build an OpenAI/Anthropic/Gemini chain from `(enabled, reply)` scripts
fn chain(specs: [(bool, std::result::Result<&'static str, &'static str>); 3]) -> Chain {
    let log = Arc::new(Mutex::new(Vec::new()));
    let kinds = ProviderKind::all();
    let calls = [
        Arc::new(AtomicUsize::new(0)),
        Arc::new(AtomicUsize::new(0)),
        Arc::new(AtomicUsize::new(0)),
    ];

    let providers = kinds
        .into_iter()
        .zip(specs)
        .zip(calls.iter())
        .map(|((kind, (enabled, reply)), counter)| {
            Box::new(ScriptedProvider {
                kind,
                enabled,
                reply,
                calls: Arc::clone(counter),
                log: Arc::clone(&log),
            }) as Box<dyn TextProvider>
        })
        .collect();

    Chain {
        router: AiRouter::with_providers(providers),
        calls,
        log,
    }
}

fn messages() -> Vec<ChatMessage> {
    vec![ChatMessage::user("ping")]
}

// ============================================================================
// Failover Order Tests
// ============================================================================

mod failover_tests {
    use super::*;

    #[tokio::test]
    async fn test_first_success_stops_the_chain() {
        let chain = chain([(true, Ok("first")), (true, Ok("second")), (true, Ok("third"))]);

        let completion = chain
            .router
            .dispatch(&messages(), &DispatchOptions::default())
            .await
            .unwrap();

        assert_eq!(completion.text, "first");
        assert_eq!(completion.provider, "OpenAI");
        assert_eq!(chain.calls[0].load(Ordering::SeqCst), 1);
        assert_eq!(chain.calls[1].load(Ordering::SeqCst), 0);
        assert_eq!(chain.calls[2].load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failures_walk_the_declaration_order() {
        let chain = chain([(true, Err("boom")), (true, Err("down")), (true, Ok("late"))]);

        let completion = chain
            .router
            .dispatch(&messages(), &DispatchOptions::default())
            .await
            .unwrap();

        assert_eq!(completion.text, "late");
        assert_eq!(completion.provider, "Gemini");
        assert_eq!(
            *chain.log.lock().unwrap(),
            vec!["OpenAI", "Anthropic", "Gemini"]
        );
        // Exactly one attempt each, no retries
        for counter in &chain.calls {
            assert_eq!(counter.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_disabled_providers_are_skipped_silently() {
        // Only the middle provider has a credential
        let chain = chain([(false, Ok("unseen")), (true, Ok("answer")), (false, Ok("unseen"))]);

        let completion = chain
            .router
            .dispatch(&messages(), &DispatchOptions::default())
            .await
            .unwrap();

        assert_eq!(completion.text, "answer");
        assert_eq!(completion.provider, "Anthropic");
        assert_eq!(completion.model, "scripted-model");
        assert_eq!(chain.calls[0].load(Ordering::SeqCst), 0);
        assert_eq!(chain.calls[2].load(Ordering::SeqCst), 0);
    }
}

// ============================================================================
// Preference Override Tests
// ============================================================================

mod preference_tests {
    use super::*;

    #[tokio::test]
    async fn test_preferred_provider_is_tried_first() {
        let chain = chain([(true, Ok("first")), (true, Ok("second")), (true, Ok("third"))]);
        let options = DispatchOptions::default().with_preferred(Some(ProviderKind::Gemini));

        let completion = chain.router.dispatch(&messages(), &options).await.unwrap();

        assert_eq!(completion.provider, "Gemini");
        assert_eq!(chain.calls[0].load(Ordering::SeqCst), 0);
        assert_eq!(chain.calls[1].load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_preference_falls_back_in_declaration_order() {
        // Preferred Gemini fails; the rest must keep OpenAI-then-Anthropic order
        let chain = chain([(true, Err("no")), (true, Ok("fallback")), (true, Err("no"))]);
        let options = DispatchOptions::default().with_preferred(Some(ProviderKind::Gemini));

        let completion = chain.router.dispatch(&messages(), &options).await.unwrap();

        assert_eq!(completion.provider, "Anthropic");
        assert_eq!(
            *chain.log.lock().unwrap(),
            vec!["Gemini", "OpenAI", "Anthropic"]
        );
    }

    #[tokio::test]
    async fn test_preferring_a_disabled_provider_changes_nothing() {
        let chain = chain([(true, Ok("first")), (true, Ok("second")), (false, Ok("off"))]);
        let options = DispatchOptions::default().with_preferred(Some(ProviderKind::Gemini));

        let completion = chain.router.dispatch(&messages(), &options).await.unwrap();

        assert_eq!(completion.provider, "OpenAI");
        assert_eq!(chain.calls[2].load(Ordering::SeqCst), 0);
    }
}

// ============================================================================
// Exhaustion Tests
// ============================================================================

mod exhaustion_tests {
    use super::*;

    #[tokio::test]
    async fn test_total_failure_reports_every_attempt() {
        let chain = chain([(true, Err("a")), (true, Err("b")), (true, Err("c"))]);

        let err = chain
            .router
            .dispatch(&messages(), &DispatchOptions::default())
            .await
            .unwrap_err();

        match err {
            SenseiError::AllProvidersExhausted { attempts } => {
                assert_eq!(attempts.len(), 3);
                assert!(attempts[0].starts_with("OpenAI"));
                assert!(attempts[1].starts_with("Anthropic"));
                assert!(attempts[2].starts_with("Gemini"));
            }
            other => panic!("expected AllProvidersExhausted, got {:?}", other),
        }
        for counter in &chain.calls {
            assert_eq!(counter.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_empty_chain_exhausts_without_any_calls() {
        let chain = chain([(false, Ok("x")), (false, Ok("y")), (false, Ok("z"))]);

        let err = chain
            .router
            .dispatch(&messages(), &DispatchOptions::default())
            .await
            .unwrap_err();

        match err {
            SenseiError::AllProvidersExhausted { attempts } => assert!(attempts.is_empty()),
            other => panic!("expected AllProvidersExhausted, got {:?}", other),
        }
        for counter in &chain.calls {
            assert_eq!(counter.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_exhaustion_message_names_the_attempt_count() {
        let chain = chain([(true, Err("a")), (false, Ok("x")), (true, Err("c"))]);

        let err = chain
            .router
            .dispatch(&messages(), &DispatchOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "All AI providers exhausted (2 attempted)");
    }
}

// ============================================================================
// Live Integration
// ============================================================================

#[tokio::test]
#[ignore = "Integration test - requires API credentials"]
async fn test_live_dispatch_through_configured_chain() {
    let router = AiRouter::new(&AiConfig::from_env());
    let messages = [ChatMessage::user("Reply with the single word: ready")];

    let completion = router
        .dispatch(&messages, &DispatchOptions::default().with_max_tokens(50))
        .await
        .unwrap();

    assert!(!completion.text.trim().is_empty());
    assert!(!completion.provider.is_empty());
}
