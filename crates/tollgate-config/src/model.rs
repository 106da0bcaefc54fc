// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Tollgate router.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup. The `[router]` section is the administrator policy
//! consulted on every routing decision; it is replaced wholesale on every
//! configuration change, never field-mutated.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tollgate_core::{CreditTier, TaskType};

/// Top-level Tollgate configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TollgateConfig {
    /// Routing policy: classification, overrides, block-list, tier ceiling.
    #[serde(default)]
    pub router: RouterConfig,

    /// Credit budget settings.
    #[serde(default)]
    pub cost: CostConfig,

    /// Outcome feedback collection settings.
    #[serde(default)]
    pub feedback: FeedbackConfig,

    /// Per-department allow-lists. Part of the policy schema; not consulted by
    /// the core routing path.
    #[serde(default)]
    pub departments: Vec<DepartmentRule>,
}

/// Administrator routing policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Enable classification-based routing. When false, every request routes
    /// to the free default model.
    #[serde(default = "default_router_enabled")]
    pub enabled: bool,

    /// Catalog id of the model used for the classification pre-pass.
    #[serde(default = "default_classifier_model")]
    pub classifier_model: String,

    /// Admin overrides of the built-in task-to-model routing table.
    #[serde(default)]
    pub task_routing: BTreeMap<TaskType, String>,

    /// Model ids that must never be selected.
    #[serde(default)]
    pub blocked_models: BTreeSet<String>,

    /// Ceiling tier: models above this tier are never selected.
    #[serde(default = "default_max_credit_tier")]
    pub max_credit_tier: CreditTier,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            enabled: default_router_enabled(),
            classifier_model: default_classifier_model(),
            task_routing: BTreeMap::new(),
            blocked_models: BTreeSet::new(),
            max_credit_tier: default_max_credit_tier(),
        }
    }
}

fn default_router_enabled() -> bool {
    true
}

fn default_classifier_model() -> String {
    tollgate_catalog::DEFAULT_CLASSIFIER_MODEL.to_string()
}

fn default_max_credit_tier() -> CreditTier {
    CreditTier::Premium
}

/// Credit budget configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CostConfig {
    /// Monthly credit budget. Zero disables budget percentage reporting.
    #[serde(default)]
    pub monthly_budget_credits: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            monthly_budget_credits: 0.0,
        }
    }
}

/// Outcome feedback collection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FeedbackConfig {
    /// Record outcome feedback. Delivery additionally requires an endpoint.
    #[serde(default = "default_collect")]
    pub collect: bool,

    /// Collector endpoint receiving feedback records via HTTP POST.
    /// `None` disables delivery; records are still kept locally.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Team identity attached to every delivered record.
    #[serde(default)]
    pub team_id: Option<String>,

    /// Department identity attached to every delivered record.
    #[serde(default)]
    pub department_id: Option<String>,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            collect: default_collect(),
            endpoint: None,
            team_id: None,
            department_id: None,
        }
    }
}

fn default_collect() -> bool {
    true
}

/// Per-department allow-list and default model.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DepartmentRule {
    /// Department key matched against the configured department identity.
    pub name: String,

    /// Model ids this department may use. Empty means unrestricted.
    #[serde(default)]
    pub allowed_models: Vec<String>,

    /// Default model for this department.
    #[serde(default)]
    pub default_model: Option<String>,
}
