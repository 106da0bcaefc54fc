// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Tollgate router.

use thiserror::Error;

/// The primary error type used across all Tollgate adapter traits and core operations.
///
/// Classification failures are deliberately absent: the classifier is total by
/// construction and always recovers to its keyword fallback. Policy violations are
/// also not errors; they produce a substitution plus a user-visible notice.
#[derive(Debug, Error)]
pub enum TollgateError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Execution backend errors (API failure, stream abort, malformed response).
    #[error("backend error: {message}")]
    Backend {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No executable backend was found after walking the full fallback chain.
    /// Terminal for the request; never retried.
    #[error("no backend available for model `{model}`")]
    NoBackendAvailable { model: String },

    /// The request was cancelled by the caller during execution.
    #[error("request cancelled")]
    Cancelled,

    /// Feedback persistence errors (load or rewrite of the stored log).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Feedback sink delivery errors (unreachable endpoint, non-2xx response).
    #[error("delivery error: {message}")]
    Delivery { message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
