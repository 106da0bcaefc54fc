// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin policy filtering.

use tollgate_catalog::ModelDefinition;
use tollgate_config::RouterConfig;

/// Whether policy admits the model: not on the block-list and at or below the
/// configured credit-tier ceiling. Pure function of its inputs.
pub fn is_allowed(model: &ModelDefinition, config: &RouterConfig) -> bool {
    !config.blocked_models.contains(model.id) && model.credit_tier <= config.max_credit_tier
}
