// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end request handling: route, dispatch, account, remember.
//!
//! One request is processed end-to-end before the next begins; the only
//! suspension points are the classifier call and the execution call, both
//! cancellable. Shared counters sit behind single async mutexes so a
//! parallelized embedding of this service stays serialized on its accounting.

use std::sync::Arc;
use std::time::Instant;

use futures::StreamExt;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use tollgate_catalog::{ModelDefinition, BACKEND_FALLBACK_CHAIN};
use tollgate_config::{ConfigHandle, TollgateConfig};
use tollgate_core::{
    BackendRegistry, ChatBackend, ChatMessage, RequestId, TaskType, TollgateError,
};
use tollgate_cost::{budget_percent, check_budget, BudgetState, SessionAccountant, SessionStats};
use tollgate_feedback::FeedbackRecorder;

use crate::router::{RouteDecision, RouteReason, Router};

/// Single-slot memory of the most recently completed request.
#[derive(Debug, Clone)]
pub struct LastRequest {
    pub prompt: String,
    pub request_id: RequestId,
    pub model_id: String,
    pub task: TaskType,
}

/// A completed routed request.
#[derive(Debug, Clone)]
pub struct RoutedResponse {
    pub request_id: RequestId,
    pub model: &'static ModelDefinition,
    pub task: TaskType,
    pub reason: RouteReason,
    /// Restriction notice when policy substituted the free default.
    pub notice: Option<String>,
    pub text: String,
    pub prompt_length: u32,
    pub response_ms: u64,
}

/// Composition of catalog, classifier, policy, accounting, and feedback.
pub struct RouterService {
    registry: Arc<dyn BackendRegistry>,
    config: Arc<ConfigHandle>,
    accountant: Mutex<SessionAccountant>,
    recorder: Arc<FeedbackRecorder>,
    last_request: Mutex<Option<LastRequest>>,
}

impl RouterService {
    pub fn new(
        registry: Arc<dyn BackendRegistry>,
        config: Arc<ConfigHandle>,
        recorder: Arc<FeedbackRecorder>,
    ) -> Self {
        Self {
            registry,
            config,
            accountant: Mutex::new(SessionAccountant::new()),
            recorder,
            last_request: Mutex::new(None),
        }
    }

    /// Handle one request end-to-end.
    ///
    /// A leading `@alias` token forces the named model and is stripped from
    /// the prompt handed to the backend. Execution errors from the backend are
    /// reported as response text; [`TollgateError::NoBackendAvailable`] and
    /// cancellation are returned as errors. A cancelled or failed execution
    /// charges nothing.
    pub async fn handle(
        &self,
        prompt: &str,
        cancel: CancellationToken,
    ) -> Result<RoutedResponse, TollgateError> {
        let config = self.config.snapshot();
        let (forced, clean_prompt) = tollgate_catalog::parse_forced_model(prompt);

        let decision = Router::route(
            clean_prompt,
            forced,
            &config.router,
            self.registry.as_ref(),
            cancel.clone(),
        )
        .await;

        let request_id = RequestId(uuid::Uuid::new_v4().to_string());
        info!(
            request_id = %request_id,
            model = decision.model.id,
            task = %decision.task,
            reason = %decision.reason,
            "routing decision"
        );

        // A forced switch away from the previous model is an implicit
        // override signal against that previous choice.
        if let Some(forced_model) = forced {
            self.maybe_record_override(&config, forced_model, decision.task)
                .await;
        }

        let started = Instant::now();
        let text = match self.execute(&decision, clean_prompt, cancel).await {
            Ok(text) => text,
            Err(TollgateError::Backend { message, .. }) => {
                // Domain execution errors surface as response text; nothing is
                // charged because no response was fully read.
                warn!(model = decision.model.id, %message, "execution backend error");
                return Ok(RoutedResponse {
                    request_id,
                    model: decision.model,
                    task: decision.task,
                    reason: decision.reason,
                    notice: decision.notice,
                    text: format!("The selected model reported an error: {message}"),
                    prompt_length: clean_prompt.len() as u32,
                    response_ms: started.elapsed().as_millis() as u64,
                });
            }
            Err(other) => return Err(other),
        };
        let response_ms = started.elapsed().as_millis() as u64;

        {
            let mut accountant = self.accountant.lock().await;
            accountant.record_completion(
                decision.model,
                decision.task,
                clean_prompt.len(),
                text.len(),
            );
            check_budget(
                accountant.total_credits_used(),
                config.cost.monthly_budget_credits,
            );
        }

        *self.last_request.lock().await = Some(LastRequest {
            prompt: clean_prompt.to_string(),
            request_id: request_id.clone(),
            model_id: decision.model.id.to_string(),
            task: decision.task,
        });

        Ok(RoutedResponse {
            request_id,
            model: decision.model,
            task: decision.task,
            reason: decision.reason,
            notice: decision.notice,
            text,
            prompt_length: clean_prompt.len() as u32,
            response_ms,
        })
    }

    /// Acquire a backend for the decision and fully drain its response stream.
    async fn execute(
        &self,
        decision: &RouteDecision,
        prompt: &str,
        cancel: CancellationToken,
    ) -> Result<String, TollgateError> {
        let backend = self.acquire_backend(decision.model).await?;
        let mut stream = backend
            .stream(&[ChatMessage::user(prompt)], cancel)
            .await?;

        let mut text = String::new();
        while let Some(chunk) = stream.next().await {
            text.push_str(&chunk?);
        }
        Ok(text)
    }

    /// Resolve an executable backend: the chosen family first, then the fixed
    /// fallback chain of generalist families, then any backend from the same
    /// vendor. Exhaustion is terminal for the request.
    async fn acquire_backend(
        &self,
        model: &'static ModelDefinition,
    ) -> Result<Arc<dyn ChatBackend>, TollgateError> {
        if let Some(backend) = self.registry.by_family(model.family).await.into_iter().next() {
            return Ok(backend);
        }

        for family in BACKEND_FALLBACK_CHAIN {
            if *family == model.family {
                continue;
            }
            if let Some(backend) = self.registry.by_family(family).await.into_iter().next() {
                warn!(
                    requested = model.family,
                    fallback = family,
                    "no backend for requested family, using fallback chain"
                );
                return Ok(backend);
            }
        }

        if let Some(backend) = self.registry.by_vendor(model.vendor).await.into_iter().next() {
            warn!(
                requested = model.family,
                vendor = model.vendor,
                "falling back to same-vendor backend"
            );
            return Ok(backend);
        }

        Err(TollgateError::NoBackendAvailable {
            model: model.id.to_string(),
        })
    }

    async fn maybe_record_override(
        &self,
        config: &TollgateConfig,
        forced_model: &'static ModelDefinition,
        task: TaskType,
    ) {
        let previous = self.last_request.lock().await.clone();
        let Some(previous) = previous else {
            return;
        };
        if previous.model_id == forced_model.id {
            return;
        }
        self.recorder
            .record_override(
                &config.feedback,
                previous.request_id.clone(),
                &previous.model_id,
                forced_model.id,
                task,
            )
            .await;
    }

    /// Record an explicit rating for a completed response.
    pub async fn rate(&self, response: &RoutedResponse, positive: bool) {
        let config = self.config.snapshot();
        self.recorder
            .record_rating(
                &config.feedback,
                response.request_id.clone(),
                response.model.id,
                response.task,
                positive,
                Some(response.prompt_length),
                Some(response.response_ms),
            )
            .await;
    }

    /// Point-in-time copy of the session counters.
    pub async fn usage(&self) -> SessionStats {
        self.accountant.lock().await.snapshot()
    }

    /// Budget utilization against the configured monthly budget.
    pub async fn budget(&self) -> (f64, BudgetState) {
        let config = self.config.snapshot();
        let total = self.accountant.lock().await.total_credits_used();
        let percent = budget_percent(total, config.cost.monthly_budget_credits);
        (percent, tollgate_cost::state_for(percent))
    }

    /// The most recently completed request, if any.
    pub async fn last_request(&self) -> Option<LastRequest> {
        self.last_request.lock().await.clone()
    }

    pub fn recorder(&self) -> &FeedbackRecorder {
        &self.recorder
    }

    /// Snapshot of the live configuration.
    pub fn config(&self) -> Arc<TollgateConfig> {
        self.config.snapshot()
    }
}
