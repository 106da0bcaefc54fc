// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session usage accounting and budget state for the Tollgate router.
//!
//! This crate provides:
//! - [`SessionAccountant`]: cumulative request/token/credit counters with the
//!   char-length token heuristic
//! - [`BudgetState`]: observational budget utilization with 70%/90% thresholds

pub mod budget;
pub mod stats;

pub use budget::{budget_percent, check_budget, state_for, BudgetState};
pub use stats::{estimate_tokens, SessionAccountant, SessionStats, TokenCount, CHARS_PER_TOKEN};
