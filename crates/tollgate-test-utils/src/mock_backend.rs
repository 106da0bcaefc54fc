// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat backend and registry for deterministic testing.
//!
//! `MockBackend` implements `ChatBackend` with pre-configured responses,
//! enabling fast, CI-runnable tests without external capability calls.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use tollgate_core::{BackendRegistry, ChatBackend, ChatMessage, TextStream, TollgateError};

/// A mock chat backend that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue. When the queue is empty, a default
/// "mock response" text is returned. Every `stream` invocation is counted so
/// tests can assert which backends were consulted.
pub struct MockBackend {
    id: String,
    family: String,
    vendor: String,
    responses: Arc<Mutex<VecDeque<String>>>,
    calls: AtomicUsize,
    fail: bool,
}

impl MockBackend {
    /// Create a healthy mock backend with an empty response queue.
    pub fn new(
        id: impl Into<String>,
        family: impl Into<String>,
        vendor: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            family: family.into(),
            vendor: vendor.into(),
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// Create a mock backend pre-loaded with the given responses.
    pub fn with_responses(
        id: impl Into<String>,
        family: impl Into<String>,
        vendor: impl Into<String>,
        responses: Vec<String>,
    ) -> Self {
        let backend = Self::new(id, family, vendor);
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            ..backend
        }
    }

    /// Create a mock backend whose every stream call fails.
    pub fn failing(
        id: impl Into<String>,
        family: impl Into<String>,
        vendor: impl Into<String>,
    ) -> Self {
        Self {
            fail: true,
            ..Self::new(id, family, vendor)
        }
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.responses.lock().await.push_back(text.into());
    }

    /// Number of `stream` invocations so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn next_response(&self) -> String {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock response".to_string())
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    fn id(&self) -> &str {
        &self.id
    }

    fn family(&self) -> &str {
        &self.family
    }

    fn vendor(&self) -> &str {
        &self.vendor
    }

    async fn stream(
        &self,
        _messages: &[ChatMessage],
        cancel: CancellationToken,
    ) -> Result<TextStream, TollgateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(TollgateError::Backend {
                message: format!("mock backend {} is configured to fail", self.id),
                source: None,
            });
        }
        if cancel.is_cancelled() {
            return Err(TollgateError::Cancelled);
        }

        let text = self.next_response().await;
        Ok(Box::pin(stream::iter(vec![Ok(text)])))
    }
}

/// A registry over a fixed set of mock backends.
#[derive(Default)]
pub struct MockRegistry {
    backends: Vec<Arc<MockBackend>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backends(backends: Vec<Arc<MockBackend>>) -> Self {
        Self { backends }
    }

    pub fn push(&mut self, backend: Arc<MockBackend>) {
        self.backends.push(backend);
    }
}

#[async_trait]
impl BackendRegistry for MockRegistry {
    async fn by_family(&self, family: &str) -> Vec<Arc<dyn ChatBackend>> {
        self.backends
            .iter()
            .filter(|b| b.family() == family)
            .map(|b| Arc::clone(b) as Arc<dyn ChatBackend>)
            .collect()
    }

    async fn by_vendor(&self, vendor: &str) -> Vec<Arc<dyn ChatBackend>> {
        self.backends
            .iter()
            .filter(|b| b.vendor() == vendor)
            .map(|b| Arc::clone(b) as Arc<dyn ChatBackend>)
            .collect()
    }
}
