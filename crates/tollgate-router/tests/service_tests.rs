// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the routing pipeline: classify, select, dispatch,
//! account, and record feedback.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use tollgate_config::{ConfigHandle, TollgateConfig};
use tollgate_core::{CreditTier, Rating, TaskType, TollgateError};
use tollgate_cost::BudgetState;
use tollgate_feedback::FeedbackRecorder;
use tollgate_router::{RouteReason, RouterService};
use tollgate_test_utils::{MockBackend, MockRegistry};

fn backend(id: &str, family: &str, vendor: &str) -> Arc<MockBackend> {
    Arc::new(MockBackend::new(id, family, vendor))
}

fn service_with(
    backends: Vec<Arc<MockBackend>>,
    config: TollgateConfig,
) -> (RouterService, Arc<FeedbackRecorder>) {
    let registry = Arc::new(MockRegistry::with_backends(backends));
    let recorder = Arc::new(FeedbackRecorder::default());
    let service = RouterService::new(registry, Arc::new(ConfigHandle::new(config)), recorder.clone());
    (service, recorder)
}

#[tokio::test]
async fn unit_test_prompt_routes_to_the_tests_model_and_charges_it() {
    // No classifier backend: the keyword tier labels the prompt.
    let sonnet = backend("claude-sonnet-4", "claude-sonnet-4", "anthropic");
    let (service, _) = service_with(vec![sonnet.clone()], TollgateConfig::default());

    let response = service
        .handle("write unit tests for UserService", CancellationToken::new())
        .await
        .expect("request should succeed");

    assert_eq!(response.task, TaskType::Test);
    assert_eq!(response.model.id, "claude-sonnet-4");
    assert_eq!(response.reason, RouteReason::DefaultRoute);
    assert_eq!(sonnet.call_count(), 1);

    let usage = service.usage().await;
    assert_eq!(usage.request_count, 1);
    assert_eq!(usage.credits_by_model.get("claude-sonnet-4"), Some(&1.0));
    assert_eq!(usage.total_credits_used, 1.0);
    assert_eq!(usage.task_types.get(&TaskType::Test), Some(&1));
}

#[tokio::test]
async fn forced_alias_strips_prefix_and_never_calls_the_primary_classifier() {
    let classifier = backend("gpt-4.1", "gpt-4.1", "openai");
    let opus = Arc::new(MockBackend::with_responses(
        "claude-opus-4",
        "claude-opus-4",
        "anthropic",
        vec!["a layered design".into()],
    ));
    let (service, _) = service_with(
        vec![classifier.clone(), opus.clone()],
        TollgateConfig::default(),
    );

    let response = service
        .handle("@opus analyze this architecture", CancellationToken::new())
        .await
        .expect("request should succeed");

    assert_eq!(response.model.id, "claude-opus-4");
    assert_eq!(response.reason, RouteReason::Forced);
    // The keyword tier still labels the task for bookkeeping.
    assert_eq!(response.task, TaskType::Architecture);
    assert_eq!(response.text, "a layered design");
    // The classifier capability was never consulted.
    assert_eq!(classifier.call_count(), 0);
    assert_eq!(opus.call_count(), 1);

    let last = service.last_request().await.expect("last request recorded");
    assert_eq!(last.prompt, "analyze this architecture");
    assert_eq!(last.model_id, "claude-opus-4");
}

#[tokio::test]
async fn primary_classifier_label_drives_the_auto_path() {
    let classifier = Arc::new(MockBackend::with_responses(
        "gpt-4.1",
        "gpt-4.1",
        "openai",
        vec!["TASK:architecture".into()],
    ));
    let opus = backend("claude-opus-4", "claude-opus-4", "anthropic");
    let (service, _) = service_with(
        vec![classifier.clone(), opus.clone()],
        TollgateConfig::default(),
    );

    // No keyword vocabulary at all; only the capability labels it.
    let response = service
        .handle("make the thing nicer", CancellationToken::new())
        .await
        .expect("request should succeed");

    assert_eq!(response.task, TaskType::Architecture);
    assert_eq!(response.model.id, "claude-opus-4");
    assert_eq!(classifier.call_count(), 1);
}

#[tokio::test]
async fn forced_blocked_model_charges_the_substituted_default() {
    let mut config = TollgateConfig::default();
    config.router.blocked_models.insert("claude-opus-4".to_string());
    let free = backend("gpt-4.1", "gpt-4.1", "openai");
    let (service, _) = service_with(vec![free], config);

    let response = service
        .handle("@opus analyze this architecture", CancellationToken::new())
        .await
        .expect("request should succeed");

    assert_eq!(response.model.id, "gpt-4.1");
    assert!(response.notice.is_some(), "restriction notice expected");

    let usage = service.usage().await;
    assert_eq!(usage.credits_by_model.get("gpt-4.1"), Some(&0.0));
    assert!(!usage.credits_by_model.contains_key("claude-opus-4"));
}

#[tokio::test]
async fn forcing_a_different_model_emits_exactly_one_override() {
    let sonnet = backend("claude-sonnet-4", "claude-sonnet-4", "anthropic");
    let opus = backend("claude-opus-4", "claude-opus-4", "anthropic");
    let (service, recorder) = service_with(vec![sonnet, opus], TollgateConfig::default());

    // First request: nothing to override against.
    service
        .handle("@sonnet review this diff", CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(recorder.len().await, 0);

    // Switching models is an implicit override signal.
    service
        .handle("@opus review this diff", CancellationToken::new())
        .await
        .unwrap();
    let entries = recorder.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].selected_model, "claude-sonnet-4");
    assert_eq!(
        entries[0].rating,
        Rating::Override {
            overridden_to: "claude-opus-4".to_string()
        }
    );

    // Forcing the same model again must not emit another record.
    service
        .handle("@opus review it once more", CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(recorder.len().await, 1);
}

#[tokio::test]
async fn missing_family_walks_the_fallback_chain() {
    // No o4-mini backend; the chain lands on gpt-4o.
    let gpt4o = backend("gpt-4o", "gpt-4o", "openai");
    let (service, _) = service_with(vec![gpt4o.clone()], TollgateConfig::default());

    let response = service
        .handle("optimize this algorithm", CancellationToken::new())
        .await
        .expect("request should succeed");

    // The routing decision still names the intended model; only execution fell
    // back, and the intended model is what gets charged.
    assert_eq!(response.task, TaskType::Algorithm);
    assert_eq!(response.model.id, "o4-mini");
    assert_eq!(gpt4o.call_count(), 1);

    let usage = service.usage().await;
    assert_eq!(usage.credits_by_model.get("o4-mini"), Some(&0.33));
}

#[tokio::test]
async fn same_vendor_backend_is_the_last_resort() {
    // Nothing from the fallback chain; an off-family anthropic backend exists.
    let haiku = backend("claude-haiku", "claude-haiku", "anthropic");
    let (service, _) = service_with(vec![haiku.clone()], TollgateConfig::default());

    let response = service
        .handle("write unit tests for UserService", CancellationToken::new())
        .await
        .expect("request should succeed");

    assert_eq!(response.model.id, "claude-sonnet-4");
    assert_eq!(haiku.call_count(), 1);
}

#[tokio::test]
async fn exhausted_fallback_chain_is_a_terminal_error() {
    let (service, _) = service_with(vec![], TollgateConfig::default());

    let err = service
        .handle("write unit tests for UserService", CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, TollgateError::NoBackendAvailable { .. }));

    // Nothing was charged for the failed request.
    assert_eq!(service.usage().await.request_count, 0);
    assert!(service.last_request().await.is_none());
}

#[tokio::test]
async fn cancelled_execution_charges_nothing() {
    let sonnet = backend("claude-sonnet-4", "claude-sonnet-4", "anthropic");
    let (service, _) = service_with(vec![sonnet], TollgateConfig::default());

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = service
        .handle("write unit tests for UserService", cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, TollgateError::Cancelled));
    assert_eq!(service.usage().await.request_count, 0);
}

#[tokio::test]
async fn backend_execution_error_surfaces_as_response_text() {
    let broken = Arc::new(MockBackend::failing(
        "claude-sonnet-4",
        "claude-sonnet-4",
        "anthropic",
    ));
    let (service, _) = service_with(vec![broken], TollgateConfig::default());

    let response = service
        .handle("write unit tests for UserService", CancellationToken::new())
        .await
        .expect("domain execution errors are reported, not raised");

    assert!(response.text.contains("error"));
    // No response was fully read, so nothing is charged.
    assert_eq!(service.usage().await.request_count, 0);
    assert!(service.last_request().await.is_none());
}

#[tokio::test]
async fn budget_reporting_tracks_configured_monthly_budget() {
    let mut config = TollgateConfig::default();
    config.cost.monthly_budget_credits = 4.0;
    let sonnet = backend("claude-sonnet-4", "claude-sonnet-4", "anthropic");
    let (service, _) = service_with(vec![sonnet], config);

    let (percent, state) = service.budget().await;
    assert_eq!(percent, 0.0);
    assert_eq!(state, BudgetState::Normal);

    for _ in 0..3 {
        service
            .handle("write unit tests for UserService", CancellationToken::new())
            .await
            .unwrap();
    }

    let (percent, state) = service.budget().await;
    assert_eq!(percent, 75.0);
    assert_eq!(state, BudgetState::SoftWarning);
}

#[tokio::test]
async fn rating_a_response_records_feedback_with_timing() {
    let sonnet = backend("claude-sonnet-4", "claude-sonnet-4", "anthropic");
    let (service, recorder) = service_with(vec![sonnet], TollgateConfig::default());

    let response = service
        .handle("write unit tests for UserService", CancellationToken::new())
        .await
        .unwrap();
    service.rate(&response, true).await;

    let stats = recorder.stats().await;
    assert_eq!(stats.positive, 1);
    let entries = recorder.entries().await;
    assert_eq!(entries[0].request_id, response.request_id);
    assert_eq!(entries[0].prompt_length, Some(response.prompt_length));
}

#[tokio::test]
async fn config_replacement_applies_to_the_next_request() {
    let sonnet = backend("claude-sonnet-4", "claude-sonnet-4", "anthropic");
    let free = backend("gpt-4.1", "gpt-4.1", "openai");
    let registry = Arc::new(MockRegistry::with_backends(vec![sonnet, free]));
    let handle = Arc::new(ConfigHandle::new(TollgateConfig::default()));
    let recorder = Arc::new(FeedbackRecorder::default());
    let service = RouterService::new(registry, handle.clone(), recorder);

    let before = service
        .handle("write unit tests for UserService", CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(before.model.id, "claude-sonnet-4");

    // Admin lowers the ceiling; the replacement is wholesale and atomic.
    let mut next = TollgateConfig::default();
    next.router.max_credit_tier = CreditTier::Free;
    handle.replace(next);

    let after = service
        .handle("write unit tests for UserService", CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(after.model.id, "gpt-4.1");
    assert_eq!(after.reason, RouteReason::FreeFallback);
}
