// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only feedback log with capped retention and aggregate statistics.
//!
//! Ratings arrive asynchronously after a request completes; overrides are
//! inferred when the caller forces a switch away from the previously used
//! model. The log keeps the most recent [`FEEDBACK_LOG_CAP`] entries, rewrites
//! the persistent store on every append, and hands each entry to the delivery
//! sink without waiting for it.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tollgate_config::FeedbackConfig;
use tollgate_core::{
    FeedbackEntry, FeedbackPayload, FeedbackSink, FeedbackStore, Rating, RequestId, TaskType,
    TollgateError,
};
use tracing::{debug, warn};

/// Maximum number of retained feedback entries. Oldest entries are dropped
/// silently on overflow.
pub const FEEDBACK_LOG_CAP: usize = 1000;

/// Per-model aggregate counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelFeedback {
    pub positive: usize,
    pub negative: usize,
    pub overrides: usize,
}

/// Aggregate view over the current log, recomputed on demand.
#[derive(Debug, Clone, Default)]
pub struct FeedbackStats {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub overrides: usize,
    pub by_model: BTreeMap<String, ModelFeedback>,
    pub by_task: BTreeMap<TaskType, usize>,
}

/// Owner of the feedback log.
pub struct FeedbackRecorder {
    entries: Mutex<Vec<FeedbackEntry>>,
    store: Option<Arc<dyn FeedbackStore>>,
    sink: Option<Arc<dyn FeedbackSink>>,
}

impl FeedbackRecorder {
    /// Create a recorder with optional persistence and delivery collaborators.
    pub fn new(
        store: Option<Arc<dyn FeedbackStore>>,
        sink: Option<Arc<dyn FeedbackSink>>,
    ) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            store,
            sink,
        }
    }

    /// Populate the log from the persistent store. Called once at startup.
    pub async fn load(&self) -> Result<(), TollgateError> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        let mut loaded = store.load().await?;
        if loaded.len() > FEEDBACK_LOG_CAP {
            let excess = loaded.len() - FEEDBACK_LOG_CAP;
            loaded.drain(..excess);
        }
        *self.entries.lock().await = loaded;
        Ok(())
    }

    /// Append an explicit rating for a completed request.
    #[allow(clippy::too_many_arguments)]
    pub async fn record_rating(
        &self,
        config: &FeedbackConfig,
        request_id: RequestId,
        model: &str,
        task: TaskType,
        positive: bool,
        prompt_length: Option<u32>,
        response_time: Option<u64>,
    ) {
        let rating = if positive {
            Rating::Positive
        } else {
            Rating::Negative
        };
        let entry = FeedbackEntry {
            timestamp: Utc::now(),
            request_id,
            selected_model: model.to_string(),
            task_type: task,
            rating,
            prompt_length,
            response_time,
        };
        self.append(config, entry).await;
    }

    /// Append an implicit override record: the caller switched from the model
    /// used for the previous request to a different forced model.
    pub async fn record_override(
        &self,
        config: &FeedbackConfig,
        request_id: RequestId,
        from_model: &str,
        to_model: &str,
        task: TaskType,
    ) {
        let entry = FeedbackEntry {
            timestamp: Utc::now(),
            request_id,
            selected_model: from_model.to_string(),
            task_type: task,
            rating: Rating::Override {
                overridden_to: to_model.to_string(),
            },
            prompt_length: None,
            response_time: None,
        };
        self.append(config, entry).await;
    }

    async fn append(&self, config: &FeedbackConfig, entry: FeedbackEntry) {
        if !config.collect {
            return;
        }

        {
            let mut entries = self.entries.lock().await;
            entries.push(entry.clone());
            if entries.len() > FEEDBACK_LOG_CAP {
                let excess = entries.len() - FEEDBACK_LOG_CAP;
                entries.drain(..excess);
            }

            if let Some(store) = &self.store {
                if let Err(error) = store.save(&entries).await {
                    warn!(%error, "failed to persist feedback log");
                }
            }
        }

        // Delivery is fire-and-forget: never blocks or fails the request.
        if let (Some(sink), Some(_)) = (&self.sink, &config.endpoint) {
            let sink = Arc::clone(sink);
            let payload = FeedbackPayload {
                entry,
                team_id: config.team_id.clone(),
                department_id: config.department_id.clone(),
            };
            tokio::spawn(async move {
                if let Err(error) = sink.deliver(&payload).await {
                    debug!(%error, "feedback delivery failed");
                }
            });
        }
    }

    /// Number of retained entries.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// The retained entries, oldest first. For reports and tests.
    pub async fn entries(&self) -> Vec<FeedbackEntry> {
        self.entries.lock().await.clone()
    }

    /// Aggregate counts over the current log.
    ///
    /// A pure fold recomputed each call; the log is bounded so this stays cheap.
    pub async fn stats(&self) -> FeedbackStats {
        let entries = self.entries.lock().await;
        let mut stats = FeedbackStats {
            total: entries.len(),
            ..FeedbackStats::default()
        };
        for entry in entries.iter() {
            let model = stats
                .by_model
                .entry(entry.selected_model.clone())
                .or_default();
            match &entry.rating {
                Rating::Positive => {
                    stats.positive += 1;
                    model.positive += 1;
                }
                Rating::Negative => {
                    stats.negative += 1;
                    model.negative += 1;
                }
                Rating::Override { .. } => {
                    stats.overrides += 1;
                    model.overrides += 1;
                }
            }
            *stats.by_task.entry(entry.task_type).or_insert(0) += 1;
        }
        stats
    }
}

impl Default for FeedbackRecorder {
    fn default() -> Self {
        Self::new(None, None)
    }
}
