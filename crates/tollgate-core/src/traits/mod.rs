// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for Tollgate's external collaborators.
//!
//! The routing core consumes capability selection/execution and produces
//! feedback records; everything behind these traits lives outside the core.
//! All traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod backend;
pub mod feedback;

pub use backend::{BackendRegistry, ChatBackend, TextStream};
pub use feedback::{FeedbackSink, FeedbackStore};
