// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feedback persistence and delivery traits.

use async_trait::async_trait;

use crate::error::TollgateError;
use crate::types::{FeedbackEntry, FeedbackPayload};

/// Persistence for the capped feedback log.
///
/// The log is stored under a namespaced key as an ordered sequence: loaded once
/// at startup and rewritten in full on every append. Concrete backends live
/// outside the routing core.
#[async_trait]
pub trait FeedbackStore: Send + Sync + 'static {
    /// Loads the persisted log, oldest entry first.
    async fn load(&self) -> Result<Vec<FeedbackEntry>, TollgateError>;

    /// Rewrites the persisted log with the given entries.
    async fn save(&self, entries: &[FeedbackEntry]) -> Result<(), TollgateError>;
}

/// Best-effort delivery of feedback records to an admin-configured collector.
///
/// Delivery is fire-and-forget: callers swallow errors and never block or fail
/// the primary request on them.
#[async_trait]
pub trait FeedbackSink: Send + Sync + 'static {
    /// Delivers one payload to the collector.
    async fn deliver(&self, payload: &FeedbackPayload) -> Result<(), TollgateError>;
}
