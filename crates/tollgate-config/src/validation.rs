// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. Policy fields naming unknown model ids are hard errors with
//! fuzzy-match suggestions; the routing path must never have to guess what the
//! administrator meant.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::TollgateConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TollgateConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.cost.monthly_budget_credits < 0.0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "cost.monthly_budget_credits must be non-negative, got {}",
                config.cost.monthly_budget_credits
            ),
        });
    }

    check_model(&mut errors, "router.classifier_model", &config.router.classifier_model);

    for (task, model) in &config.router.task_routing {
        check_model(&mut errors, &format!("router.task_routing.{task}"), model);
    }

    // Blocked models are matched by id at routing time; an unknown id here is
    // almost always a typo that silently blocks nothing.
    for model in &config.router.blocked_models {
        check_model(&mut errors, "router.blocked_models", model);
    }

    if let Some(endpoint) = &config.feedback.endpoint {
        if endpoint.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "feedback.endpoint must not be empty when set".to_string(),
            });
        }
    }

    let mut seen_names = HashSet::new();
    for (i, dept) in config.departments.iter().enumerate() {
        if dept.name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("departments[{i}].name must not be empty"),
            });
        } else if !seen_names.insert(&dept.name) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "duplicate department name `{}` in [[departments]] array",
                    dept.name
                ),
            });
        }
        for model in &dept.allowed_models {
            check_model(&mut errors, &format!("departments[{i}].allowed_models"), model);
        }
        if let Some(model) = &dept.default_model {
            check_model(&mut errors, &format!("departments[{i}].default_model"), model);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_model(errors: &mut Vec<ConfigError>, key: &str, model: &str) {
    if tollgate_catalog::lookup(model).is_none() {
        errors.push(ConfigError::UnknownModel {
            key: key.to_string(),
            model: model.to_string(),
            suggestion: tollgate_catalog::suggest(model).map(str::to_string),
        });
    }
}
