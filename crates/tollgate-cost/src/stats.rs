// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cumulative session usage counters.
//!
//! All counters are monotonic for the lifetime of the process. Token counts are
//! approximate, derived from character lengths rather than real tokenization.

use std::collections::BTreeMap;

use serde::Serialize;
use tollgate_catalog::ModelDefinition;
use tollgate_core::TaskType;
use tracing::info;

/// Character-to-token conversion divisor for the length heuristic.
pub const CHARS_PER_TOKEN: usize = 4;

/// Approximate token count for a text of the given character length.
pub fn estimate_tokens(chars: usize) -> u64 {
    (chars / CHARS_PER_TOKEN) as u64
}

/// Approximate input/output token totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenCount {
    pub input: u64,
    pub output: u64,
}

/// Mutable, process-lifetime usage accumulator.
///
/// Invariant: `total_credits_used` equals the sum of `credits_by_model` values
/// at all times; both are updated together in [`SessionAccountant::record_completion`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionStats {
    pub request_count: u64,
    pub token_count: TokenCount,
    /// Cumulative credit spend per model id. Keys appear lazily on first use.
    pub credits_by_model: BTreeMap<String, f64>,
    /// Completed request count per task type. Same lazy-key policy.
    pub task_types: BTreeMap<TaskType, u64>,
    pub total_credits_used: f64,
}

/// Owner of the session counters.
///
/// Updates are read-modify-write on shared state: callers processing requests
/// concurrently must serialize access (the dispatch service holds the
/// accountant behind a single async mutex).
#[derive(Debug, Default)]
pub struct SessionAccountant {
    stats: SessionStats,
}

impl SessionAccountant {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed execution.
    ///
    /// Applies all four effects together: request count, token estimates,
    /// per-model credit spend, and per-task count. Callers must not observe
    /// the stats between any two of these updates.
    pub fn record_completion(
        &mut self,
        model: &ModelDefinition,
        task: TaskType,
        input_chars: usize,
        output_chars: usize,
    ) {
        self.stats.request_count += 1;
        self.stats.token_count.input += estimate_tokens(input_chars);
        self.stats.token_count.output += estimate_tokens(output_chars);
        *self
            .stats
            .credits_by_model
            .entry(model.id.to_string())
            .or_insert(0.0) += model.credit_multiplier;
        self.stats.total_credits_used += model.credit_multiplier;
        *self.stats.task_types.entry(task).or_insert(0) += 1;

        info!(
            model = model.id,
            task = %task,
            credits = model.credit_multiplier,
            total_credits = self.stats.total_credits_used,
            "completion recorded"
        );
    }

    /// A point-in-time copy of the counters for reporting.
    pub fn snapshot(&self) -> SessionStats {
        self.stats.clone()
    }

    /// Cumulative credit spend.
    pub fn total_credits_used(&self) -> f64 {
        self.stats.total_credits_used
    }
}
