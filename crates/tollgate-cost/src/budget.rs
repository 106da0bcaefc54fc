// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Budget utilization derivation.
//!
//! Budget state is purely observational signaling for reports and warnings.
//! It never feeds back into routing decisions.

use tracing::warn;

/// Soft warning threshold in percent of the monthly budget.
pub const SOFT_WARNING_PERCENT: f64 = 70.0;

/// Hard warning threshold in percent of the monthly budget.
pub const HARD_WARNING_PERCENT: f64 = 90.0;

/// Observational budget utilization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetState {
    Normal,
    SoftWarning,
    HardWarning,
}

impl std::fmt::Display for BudgetState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetState::Normal => write!(f, "normal"),
            BudgetState::SoftWarning => write!(f, "soft-warning"),
            BudgetState::HardWarning => write!(f, "hard-warning"),
        }
    }
}

/// Percentage of the monthly budget consumed, clamped to 100.
///
/// Returns 0 when no budget is configured (`monthly_budget <= 0`).
pub fn budget_percent(total_credits_used: f64, monthly_budget: f64) -> f64 {
    if monthly_budget > 0.0 {
        (total_credits_used / monthly_budget * 100.0).min(100.0)
    } else {
        0.0
    }
}

/// State for a utilization percentage.
pub fn state_for(percent: f64) -> BudgetState {
    if percent >= HARD_WARNING_PERCENT {
        BudgetState::HardWarning
    } else if percent >= SOFT_WARNING_PERCENT {
        BudgetState::SoftWarning
    } else {
        BudgetState::Normal
    }
}

/// Derive the budget state and emit a warning when a threshold is crossed.
pub fn check_budget(total_credits_used: f64, monthly_budget: f64) -> BudgetState {
    let percent = budget_percent(total_credits_used, monthly_budget);
    let state = state_for(percent);
    match state {
        BudgetState::HardWarning => warn!(
            percent,
            monthly_budget, "monthly credit budget nearly exhausted (90%+)"
        ),
        BudgetState::SoftWarning => warn!(
            percent,
            monthly_budget, "approaching monthly credit budget (70%+)"
        ),
        BudgetState::Normal => {}
    }
    state
}
