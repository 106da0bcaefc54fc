// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outcome feedback for the Tollgate router.
//!
//! This crate provides:
//! - [`FeedbackRecorder`]: the capped append-only log with on-demand aggregates
//! - [`HttpFeedbackSink`]: best-effort JSON delivery to an admin-configured
//!   collector endpoint
//!
//! Feedback is recorded, not yet consumed: nothing here feeds back into
//! routing decisions.

pub mod recorder;
pub mod sink;

pub use recorder::{FeedbackRecorder, FeedbackStats, ModelFeedback, FEEDBACK_LOG_CAP};
pub use sink::HttpFeedbackSink;
