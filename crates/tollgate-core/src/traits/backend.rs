// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability selection and execution traits for chat backends.

use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use futures_core::Stream;
use tokio_util::sync::CancellationToken;

use crate::error::TollgateError;
use crate::types::ChatMessage;

/// A streamed text response. The core fully drains the stream before any
/// output-length accounting happens.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, TollgateError>> + Send>>;

/// An executable chat backend resolved from a capability selector.
#[async_trait]
pub trait ChatBackend: Send + Sync + 'static {
    /// Identifier of the backing model this backend executes.
    fn id(&self) -> &str;

    /// Capability-selector family this backend was resolved for.
    fn family(&self) -> &str;

    /// Vendor owning this backend, used for last-resort fallback selection.
    fn vendor(&self) -> &str;

    /// Sends an ordered message history and returns a stream of response text.
    ///
    /// Cancelling the token aborts the stream; partially read output must not
    /// be charged by callers.
    async fn stream(
        &self,
        messages: &[ChatMessage],
        cancel: CancellationToken,
    ) -> Result<TextStream, TollgateError>;
}

/// Capability selection: given a selector, obtain zero or more executable backends.
///
/// Returning an empty vector is not an error; the router owns the fallback walk
/// and reports exhaustion as [`TollgateError::NoBackendAvailable`].
#[async_trait]
pub trait BackendRegistry: Send + Sync + 'static {
    /// Backends matching a family selector.
    async fn by_family(&self, family: &str) -> Vec<Arc<dyn ChatBackend>>;

    /// Backends owned by a vendor, irrespective of family.
    async fn by_vendor(&self, vendor: &str) -> Vec<Arc<dyn ChatBackend>>;
}
