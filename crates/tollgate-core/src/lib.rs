// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Tollgate model router.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Tollgate workspace. External collaborators
//! (backend registries, feedback stores and sinks) implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TollgateError;
pub use types::{
    ChatMessage, ChatRole, CreditTier, FeedbackEntry, FeedbackPayload, Rating, RequestId,
    TaskType,
};

// Re-export all adapter traits at crate root.
pub use traits::{BackendRegistry, ChatBackend, FeedbackSink, FeedbackStore, TextStream};
