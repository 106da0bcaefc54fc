// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model selection: classification, admin overrides, defaults, policy guard.
//!
//! Selection priority: forced selection > admin task routing > built-in default
//! routing > free default. Policy filtering takes precedence over every routing
//! preference, including forced selection.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use tollgate_catalog::ModelDefinition;
use tollgate_config::RouterConfig;
use tollgate_core::{BackendRegistry, TaskType};

use crate::classifier::TaskClassifier;
use crate::policy::is_allowed;

/// How the final model was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteReason {
    /// Explicit caller selection.
    Forced,
    /// Admin `task_routing` override matched the classified task.
    TaskOverride,
    /// Built-in default routing table entry.
    DefaultRoute,
    /// Neither override nor default survived policy; designated free default.
    FreeFallback,
    /// Routing disabled by configuration; free default for everything.
    RoutingDisabled,
}

impl std::fmt::Display for RouteReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteReason::Forced => write!(f, "forced selection"),
            RouteReason::TaskOverride => write!(f, "admin task routing"),
            RouteReason::DefaultRoute => write!(f, "default routing"),
            RouteReason::FreeFallback => write!(f, "free fallback"),
            RouteReason::RoutingDisabled => write!(f, "routing disabled"),
        }
    }
}

/// Outcome of model selection for one request.
#[derive(Debug, Clone)]
pub struct RouteDecision {
    pub model: &'static ModelDefinition,
    pub task: TaskType,
    pub reason: RouteReason,
    /// Present when policy substituted the free default for a restricted choice.
    pub notice: Option<String>,
}

/// Stateless model selection over catalog, classifier, and policy.
pub struct Router;

impl Router {
    /// Select a model for the prompt.
    ///
    /// The forced path classifies with the keyword tier only -- the caller has
    /// already decided the model, so no capability call is spent on it -- but
    /// the label is still assigned for bookkeeping. The automatic path runs
    /// the full two-tier classifier.
    pub async fn route(
        prompt: &str,
        forced: Option<&'static ModelDefinition>,
        config: &RouterConfig,
        registry: &dyn BackendRegistry,
        cancel: CancellationToken,
    ) -> RouteDecision {
        if let Some(model) = forced {
            let task = TaskClassifier::classify_fallback(prompt);
            return Self::guard(model, task, RouteReason::Forced, config);
        }

        if !config.enabled {
            let task = TaskClassifier::classify_fallback(prompt);
            return Self::guard(free_default(), task, RouteReason::RoutingDisabled, config);
        }

        let task = TaskClassifier::classify(prompt, config, registry, cancel).await;

        // (a) Admin routing override, gated on catalog presence and policy.
        if let Some(id) = config.task_routing.get(&task) {
            match tollgate_catalog::lookup(id) {
                Some(model) if is_allowed(model, config) => {
                    return Self::guard(model, task, RouteReason::TaskOverride, config);
                }
                Some(model) => {
                    debug!(model = model.id, %task, "task routing override denied by policy");
                }
                None => {
                    warn!(
                        model = id.as_str(),
                        suggestion = tollgate_catalog::suggest(id),
                        "task routing names a model absent from the catalog"
                    );
                }
            }
        }

        // (b) Built-in default routing, gated the same way.
        let default_id = tollgate_catalog::default_route(task);
        if let Some(model) = tollgate_catalog::lookup(default_id) {
            if is_allowed(model, config) {
                return Self::guard(model, task, RouteReason::DefaultRoute, config);
            }
        }

        // (c) Last resort: the designated zero-cost default.
        Self::guard(free_default(), task, RouteReason::FreeFallback, config)
    }

    /// Final policy re-check after selection, against configuration races.
    /// A now-disallowed model is replaced by the free default with a notice.
    fn guard(
        model: &'static ModelDefinition,
        task: TaskType,
        reason: RouteReason,
        config: &RouterConfig,
    ) -> RouteDecision {
        if is_allowed(model, config) {
            return RouteDecision {
                model,
                task,
                reason,
                notice: None,
            };
        }
        let substitute = free_default();
        RouteDecision {
            model: substitute,
            task,
            reason,
            notice: Some(format!(
                "{} is restricted by the current policy; using {} instead",
                model.name, substitute.name
            )),
        }
    }
}

/// The designated zero-cost default model.
pub(crate) fn free_default() -> &'static ModelDefinition {
    tollgate_catalog::lookup(tollgate_catalog::FREE_DEFAULT_MODEL)
        .unwrap_or(&tollgate_catalog::all()[0])
}
