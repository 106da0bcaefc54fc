// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory feedback collaborators for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tollgate_core::{
    FeedbackEntry, FeedbackPayload, FeedbackSink, FeedbackStore, TollgateError,
};

/// A `FeedbackStore` holding the persisted log in memory.
///
/// Counts rewrites so tests can assert the log is persisted on every append.
#[derive(Default)]
pub struct MemoryFeedbackStore {
    entries: Mutex<Vec<FeedbackEntry>>,
    saves: AtomicUsize,
}

impl MemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with persisted entries.
    pub fn with_entries(entries: Vec<FeedbackEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Current persisted entries.
    pub async fn persisted(&self) -> Vec<FeedbackEntry> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl FeedbackStore for MemoryFeedbackStore {
    async fn load(&self) -> Result<Vec<FeedbackEntry>, TollgateError> {
        Ok(self.entries.lock().await.clone())
    }

    async fn save(&self, entries: &[FeedbackEntry]) -> Result<(), TollgateError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.entries.lock().await = entries.to_vec();
        Ok(())
    }
}

/// A `FeedbackSink` that records every delivered payload.
#[derive(Default)]
pub struct RecordingSink {
    payloads: Arc<Mutex<Vec<FeedbackPayload>>>,
    fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink whose every delivery fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Payloads delivered so far.
    pub async fn delivered(&self) -> Vec<FeedbackPayload> {
        self.payloads.lock().await.clone()
    }
}

#[async_trait]
impl FeedbackSink for RecordingSink {
    async fn deliver(&self, payload: &FeedbackPayload) -> Result<(), TollgateError> {
        if self.fail {
            return Err(TollgateError::Delivery {
                message: "recording sink is configured to fail".to_string(),
            });
        }
        self.payloads.lock().await.push(payload.clone());
        Ok(())
    }
}
