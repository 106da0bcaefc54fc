// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The fixed catalog of routable model definitions.
//!
//! Pure data with lookup helpers; no routing decisions are made here.
//! Catalog-authoring invariants (unique ids, tier consistent with multiplier
//! ordering) are asserted by tests rather than enforced at runtime.

use tollgate_core::CreditTier;

/// Numeric capability scores (1-10) plus context window size in thousands of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub code: u8,
    pub reasoning: u8,
    pub speed: u8,
    pub context_k: u32,
}

/// Immutable catalog entry for one routable model.
#[derive(Debug, Clone, Copy)]
pub struct ModelDefinition {
    /// Globally unique catalog key.
    pub id: &'static str,
    /// Capability-selector string used to resolve an executable backend.
    pub family: &'static str,
    /// Vendor owning the backend, used for last-resort fallback.
    pub vendor: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Non-negative cost factor charged per completed request.
    pub credit_multiplier: f64,
    /// Ordinal cost class, consistent with the multiplier ordering.
    pub credit_tier: CreditTier,
    /// Preview models may be withdrawn without notice.
    pub preview: bool,
    pub capabilities: Capabilities,
    /// Informal task tags for display grouping.
    pub best_for: &'static [&'static str],
    /// Force-selection tokens recognized in `@alias` prompt prefixes.
    pub aliases: &'static [&'static str],
}

/// Declaration order is the stable order reported by [`by_tier`](super::by_tier).
pub(crate) static CATALOG: &[ModelDefinition] = &[
    ModelDefinition {
        id: "gpt-4.1",
        family: "gpt-4.1",
        vendor: "openai",
        name: "GPT-4.1",
        credit_multiplier: 0.0,
        credit_tier: CreditTier::Free,
        preview: false,
        capabilities: Capabilities {
            code: 7,
            reasoning: 6,
            speed: 8,
            context_k: 128,
        },
        best_for: &["autocomplete", "simple", "documentation"],
        aliases: &["gpt", "4.1"],
    },
    ModelDefinition {
        id: "gpt-4o",
        family: "gpt-4o",
        vendor: "openai",
        name: "GPT-4o",
        credit_multiplier: 0.0,
        credit_tier: CreditTier::Free,
        preview: false,
        capabilities: Capabilities {
            code: 7,
            reasoning: 6,
            speed: 9,
            context_k: 128,
        },
        best_for: &["function", "conversion"],
        aliases: &["4o"],
    },
    ModelDefinition {
        id: "o4-mini",
        family: "o4-mini",
        vendor: "openai",
        name: "o4-mini",
        credit_multiplier: 0.33,
        credit_tier: CreditTier::Cheap,
        preview: false,
        capabilities: Capabilities {
            code: 8,
            reasoning: 9,
            speed: 7,
            context_k: 200,
        },
        best_for: &["algorithm", "debug"],
        aliases: &["o4"],
    },
    ModelDefinition {
        id: "claude-sonnet-4",
        family: "claude-sonnet-4",
        vendor: "anthropic",
        name: "Claude Sonnet 4",
        credit_multiplier: 1.0,
        credit_tier: CreditTier::Standard,
        preview: false,
        capabilities: Capabilities {
            code: 9,
            reasoning: 8,
            speed: 7,
            context_k: 200,
        },
        best_for: &["test", "refactor", "review"],
        aliases: &["sonnet"],
    },
    ModelDefinition {
        id: "gemini-2.5-pro",
        family: "gemini-2.5-pro",
        vendor: "google",
        name: "Gemini 2.5 Pro",
        credit_multiplier: 1.0,
        credit_tier: CreditTier::Standard,
        preview: false,
        capabilities: Capabilities {
            code: 8,
            reasoning: 8,
            speed: 6,
            context_k: 1000,
        },
        best_for: &["long-context", "documentation"],
        aliases: &["gemini"],
    },
    ModelDefinition {
        id: "o3",
        family: "o3",
        vendor: "openai",
        name: "OpenAI o3",
        credit_multiplier: 5.0,
        credit_tier: CreditTier::Premium,
        preview: false,
        capabilities: Capabilities {
            code: 9,
            reasoning: 10,
            speed: 4,
            context_k: 200,
        },
        best_for: &["algorithm", "architecture"],
        aliases: &[],
    },
    ModelDefinition {
        id: "claude-opus-4",
        family: "claude-opus-4",
        vendor: "anthropic",
        name: "Claude Opus 4",
        credit_multiplier: 10.0,
        credit_tier: CreditTier::Premium,
        preview: false,
        capabilities: Capabilities {
            code: 10,
            reasoning: 10,
            speed: 3,
            context_k: 200,
        },
        best_for: &["architecture", "security"],
        aliases: &["opus"],
    },
    ModelDefinition {
        id: "gpt-4.5",
        family: "gpt-4.5",
        vendor: "openai",
        name: "GPT-4.5",
        credit_multiplier: 50.0,
        credit_tier: CreditTier::Premium,
        preview: true,
        capabilities: Capabilities {
            code: 8,
            reasoning: 9,
            speed: 5,
            context_k: 128,
        },
        best_for: &[],
        aliases: &["4.5"],
    },
];
