// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock collaborators for deterministic Tollgate tests.
//!
//! This crate provides:
//! - [`MockBackend`] / [`MockRegistry`]: scripted chat backends with call counting
//! - [`MemoryFeedbackStore`]: in-memory persistence with rewrite counting
//! - [`RecordingSink`]: captures delivered feedback payloads

pub mod feedback;
pub mod mock_backend;

pub use feedback::{MemoryFeedbackStore, RecordingSink};
pub use mock_backend::{MockBackend, MockRegistry};
