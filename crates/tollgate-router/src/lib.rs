// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task classification and policy-filtered model routing for Tollgate.
//!
//! This crate provides:
//! - [`TaskClassifier`]: two-tier classification (external capability with a
//!   strict `TASK:<label>` contract, deterministic keyword fallback)
//! - [`Router`]: model selection under admin overrides, defaults, and policy
//! - [`RouterService`]: the end-to-end pipeline -- route, acquire a backend
//!   through the fallback chain, drain the response, account the spend, and
//!   remember the request for override detection
//!
//! The router intercepts every request before execution, selecting the most
//! cost-appropriate catalog model for the classified task under the current
//! administrator policy.

pub mod classifier;
pub mod policy;
pub mod router;
pub mod service;

pub use classifier::{TaskClassifier, LONG_CONTEXT_CHARS};
pub use policy::is_allowed;
pub use router::{RouteDecision, RouteReason, Router};
pub use service::{LastRequest, RoutedResponse, RouterService};
