//! End-to-end pipeline tests with stubbed encoder and engine.
//!
//! These prove the wiring: classify → resolve → compose → execute, without
//! touching the network or a real model.

use async_trait::async_trait;
use chrono::Utc;
use courtside::embedding::Encoder;
use courtside::llm::CompletionEngine;
use courtside::tools::Capability;
use courtside::{
    AppError, CapabilitySet, Dispatcher, Result, RouteRegistry, Router, WorkerProfile,
    WorkerRegistry,
};
use std::sync::Arc;

/// Deterministic toy encoder: hashed bag of words over a fixed dimension.
struct HashEncoder {
    dims: usize,
}

impl HashEncoder {
    fn new() -> Self {
        Self { dims: 256 }
    }
}

#[async_trait]
impl Encoder for HashEncoder {
    async fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dims];
        for word in text.to_lowercase().split_whitespace() {
            let mut hash: usize = 5381;
            for byte in word.bytes() {
                hash = hash.wrapping_mul(33) ^ byte as usize;
            }
            vector[hash % self.dims] += 1.0;
        }
        Ok(vector)
    }
}

/// Returns a fixed reply and records what it was asked to run.
struct StubEngine {
    reply: String,
    seen: parking_lot::Mutex<Vec<(String, String, Vec<String>)>>,
}

impl StubEngine {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            seen: parking_lot::Mutex::new(Vec::new()),
        }
    }

    fn last_run(&self) -> (String, String, Vec<String>) {
        self.seen.lock().last().cloned().expect("engine never ran")
    }
}

#[async_trait]
impl CompletionEngine for StubEngine {
    async fn run(
        &self,
        profile: &WorkerProfile,
        task_description: &str,
        capabilities: &[Capability],
    ) -> Result<String> {
        let names = capabilities.iter().map(|c| c.name().to_string()).collect();
        self.seen
            .lock()
            .push((profile.role.clone(), task_description.to_string(), names));
        Ok(self.reply.clone())
    }
}

async fn build_dispatcher(engine: Arc<StubEngine>, threshold: f32) -> Dispatcher {
    let encoder = Arc::new(HashEncoder::new());
    let router = Router::new(encoder, &RouteRegistry::nba_default(), threshold)
        .await
        .unwrap();
    Dispatcher::new(
        router,
        WorkerRegistry::nba_default(),
        engine,
        CapabilitySet::new().unwrap(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_research_routes_roster_request_to_stats_worker() {
    let engine = Arc::new(StubEngine::new("stubbed findings"));
    let dispatcher = build_dispatcher(Arc::clone(&engine), 0.3).await;

    let answer = dispatcher.research("team roster for Lakers").await.unwrap();
    assert_eq!(answer, "stubbed findings");

    let (role, description, capabilities) = engine.last_run();
    assert_eq!(role, "NBA Stats Researcher");
    assert!(description.contains("team roster for Lakers"));
    assert!(capabilities.contains(&"fetch_nba_stats".to_string()));
}

#[tokio::test]
async fn test_composed_description_contains_dispatch_date() {
    let engine = Arc::new(StubEngine::new("ok"));
    let dispatcher = build_dispatcher(Arc::clone(&engine), 0.3).await;

    let before = Utc::now().format("%Y-%m-%d").to_string();
    dispatcher
        .research("player injury updates for the Celtics")
        .await
        .unwrap();
    let after = Utc::now().format("%Y-%m-%d").to_string();

    let (_, description, _) = engine.last_run();
    assert!(
        description.contains(&format!("Today's date is {}", before))
            || description.contains(&format!("Today's date is {}", after))
    );
}

#[tokio::test]
async fn test_injury_request_routes_to_injury_worker() {
    let engine = Arc::new(StubEngine::new("ok"));
    let dispatcher = build_dispatcher(Arc::clone(&engine), 0.3).await;

    dispatcher.research("team injury report").await.unwrap();

    let (role, description, capabilities) = engine.last_run();
    assert_eq!(role, "NBA Injury Researcher");
    assert!(capabilities.contains(&"fetch_nba_injuries".to_string()));
    // The injuries route carries its dedicated checklist template.
    assert!(description.contains("Who's hurt"));
}

#[tokio::test]
async fn test_research_is_deterministic_across_calls() {
    let engine = Arc::new(StubEngine::new("ok"));
    let dispatcher = build_dispatcher(Arc::clone(&engine), 0.3).await;

    dispatcher.research("NBA betting odds").await.unwrap();
    let (first_role, _, _) = engine.last_run();

    dispatcher.research("NBA betting odds").await.unwrap();
    let (second_role, _, _) = engine.last_run();

    assert_eq!(first_role, second_role);
    assert_eq!(first_role, "Betting Market Analyst");
}

#[tokio::test]
async fn test_empty_and_whitespace_requests_rejected() {
    let engine = Arc::new(StubEngine::new("unused"));
    let dispatcher = build_dispatcher(Arc::clone(&engine), 0.3).await;

    for request in ["", "   "] {
        let err = dispatcher.dispatch(request).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }
    assert!(engine.seen.lock().is_empty());
}

#[tokio::test]
async fn test_off_domain_request_is_unroutable() {
    let engine = Arc::new(StubEngine::new("unused"));
    let dispatcher = build_dispatcher(Arc::clone(&engine), 0.95).await;

    let err = dispatcher
        .dispatch("best sourdough starter hydration ratio")
        .await
        .unwrap_err();
    match err {
        AppError::Unroutable { best_score, .. } => assert!(best_score < 0.95),
        other => panic!("expected Unroutable, got {}", other),
    }
    assert!(engine.seen.lock().is_empty());
}

#[tokio::test]
async fn test_failing_encoder_wraps_as_execution_error() {
    struct FailingEncoder {
        fail_after: usize,
        calls: parking_lot::Mutex<usize>,
    }

    #[async_trait]
    impl Encoder for FailingEncoder {
        async fn encode(&self, text: &str) -> Result<Vec<f32>> {
            let mut calls = self.calls.lock();
            *calls += 1;
            if *calls > self.fail_after {
                return Err(AppError::Encoding("model unavailable".to_string()));
            }
            HashEncoder::new().encode(text).await
        }
    }

    let utterance_count: usize = RouteRegistry::nba_default()
        .routes()
        .iter()
        .map(|r| r.utterances().len())
        .sum();

    // Healthy while priming, failing for every request embedding after it.
    let encoder = Arc::new(FailingEncoder {
        fail_after: utterance_count,
        calls: parking_lot::Mutex::new(0),
    });
    let router = Router::new(encoder, &RouteRegistry::nba_default(), 0.3)
        .await
        .unwrap();
    let dispatcher = Dispatcher::new(
        router,
        WorkerRegistry::nba_default(),
        Arc::new(StubEngine::new("unused")),
        CapabilitySet::new().unwrap(),
    )
    .unwrap();

    let err = dispatcher.dispatch("team roster for Lakers").await.unwrap_err();
    match err {
        AppError::Execution { source, .. } => {
            assert!(matches!(*source, AppError::Encoding(_)))
        }
        other => panic!("expected Execution, got {}", other),
    }
}

#[tokio::test]
async fn test_failing_engine_wraps_with_route_context() {
    struct FailingEngine;

    #[async_trait]
    impl CompletionEngine for FailingEngine {
        async fn run(
            &self,
            _profile: &WorkerProfile,
            _task_description: &str,
            _capabilities: &[Capability],
        ) -> Result<String> {
            Err(AppError::Completion("engine offline".to_string()))
        }
    }

    let encoder = Arc::new(HashEncoder::new());
    let router = Router::new(encoder, &RouteRegistry::nba_default(), 0.3)
        .await
        .unwrap();
    let dispatcher = Dispatcher::new(
        router,
        WorkerRegistry::nba_default(),
        Arc::new(FailingEngine),
        CapabilitySet::new().unwrap(),
    )
    .unwrap();

    let err = dispatcher.dispatch("team roster for Lakers").await.unwrap_err();
    match err {
        AppError::Execution { context, source } => {
            assert!(context.contains("stats"));
            assert!(matches!(*source, AppError::Completion(_)));
        }
        other => panic!("expected Execution, got {}", other),
    }
}
