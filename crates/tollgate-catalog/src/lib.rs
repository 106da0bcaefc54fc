// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static model catalog and default routing tables for the Tollgate router.
//!
//! This crate provides:
//! - [`ModelDefinition`]: the immutable registry of routable models
//! - [`default_route`]: the built-in task-to-model routing table
//! - [`parse_forced_model`] / [`resolve_forced`]: `@alias` forced selection
//!
//! Everything here is read-only data with lookup helpers; it is thread-safe by
//! construction and makes no routing decisions of its own.

pub mod models;
pub mod routing;

pub use models::{Capabilities, ModelDefinition};
pub use routing::{
    default_route, parse_forced_model, resolve_forced, suggest, BACKEND_FALLBACK_CHAIN,
    DEFAULT_CLASSIFIER_MODEL, FREE_DEFAULT_MODEL,
};

use tollgate_core::CreditTier;

/// The full catalog, in declaration order.
pub fn all() -> &'static [ModelDefinition] {
    models::CATALOG
}

/// Look up a model definition by its unique id.
pub fn lookup(id: &str) -> Option<&'static ModelDefinition> {
    models::CATALOG.iter().find(|m| m.id == id)
}

/// Models of the given tier, in catalog declaration order.
///
/// Stable order is used for display grouping, never for routing decisions.
pub fn by_tier(tier: CreditTier) -> Vec<&'static ModelDefinition> {
    models::CATALOG
        .iter()
        .filter(|m| m.credit_tier == tier)
        .collect()
}
