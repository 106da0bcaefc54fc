// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP delivery of feedback payloads to an admin-configured collector.

use async_trait::async_trait;
use tollgate_core::{FeedbackPayload, FeedbackSink, TollgateError};

/// Delivers feedback records as JSON over HTTP POST.
///
/// Non-2xx responses are reported as [`TollgateError::Delivery`]; the recorder
/// swallows them, so delivery never affects request success.
pub struct HttpFeedbackSink {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFeedbackSink {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl FeedbackSink for HttpFeedbackSink {
    async fn deliver(&self, payload: &FeedbackPayload) -> Result<(), TollgateError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| TollgateError::Delivery {
                message: format!("POST {} failed: {e}", self.endpoint),
            })?;

        if !response.status().is_success() {
            return Err(TollgateError::Delivery {
                message: format!(
                    "collector returned {} for {}",
                    response.status(),
                    self.endpoint
                ),
            });
        }
        Ok(())
    }
}
