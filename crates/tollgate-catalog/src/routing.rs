// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in default routing table, fallback chain, and forced-selection helpers.

use tollgate_core::TaskType;

use crate::all;
use crate::models::ModelDefinition;

/// Zero-cost model substituted whenever policy or routing exhaustion demands
/// a last resort.
pub const FREE_DEFAULT_MODEL: &str = "gpt-4.1";

/// Default capability used for the classification pre-pass. Free tier, so the
/// classifier never spends credits.
pub const DEFAULT_CLASSIFIER_MODEL: &str = "gpt-4.1";

/// Known-good generalist families walked in order when the chosen model has no
/// executable backend.
pub const BACKEND_FALLBACK_CHAIN: &[&str] = &["gpt-4.1", "gpt-4o", "claude-sonnet-4"];

/// Minimum Jaro-Winkler similarity to offer a "did you mean" model id.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Built-in task-to-model routing, applied when no admin override matches.
///
/// Every target exists in the catalog (asserted by tests), so the free-default
/// branch of resolution is a guard, not a normal path.
pub fn default_route(task: TaskType) -> &'static str {
    match task {
        TaskType::Autocomplete => "gpt-4.1",
        TaskType::Simple => "gpt-4.1",
        TaskType::Function => "gpt-4o",
        TaskType::Algorithm => "o4-mini",
        TaskType::Test => "claude-sonnet-4",
        TaskType::Debug => "o4-mini",
        TaskType::Refactor => "claude-sonnet-4",
        TaskType::Architecture => "claude-opus-4",
        TaskType::Security => "claude-opus-4",
        TaskType::Documentation => "gpt-4o",
        TaskType::Conversion => "gpt-4o",
        TaskType::Review => "claude-sonnet-4",
        TaskType::LongContext => "gemini-2.5-pro",
    }
}

/// Resolve a forced-selection token (an `@alias` or a literal model id) to a
/// catalog entry. Case-insensitive.
pub fn resolve_forced(token: &str) -> Option<&'static ModelDefinition> {
    let lower = token.to_lowercase();
    all().iter().find(|m| {
        m.id.eq_ignore_ascii_case(&lower) || m.aliases.iter().any(|a| *a == lower)
    })
}

/// Fuzzy-match an unknown model id against the catalog for diagnostics.
pub fn suggest(id: &str) -> Option<&'static str> {
    let lower = id.to_lowercase();
    all()
        .iter()
        .map(|m| (m.id, strsim::jaro_winkler(&lower, m.id)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

/// Strip a leading `@token` force prefix from a prompt.
///
/// Returns `(Some(model), clean_prompt)` when the token resolves to a catalog
/// entry, `(None, original_prompt)` otherwise. An unresolvable `@token` is left
/// in place so the prompt reaches the backend unchanged.
pub fn parse_forced_model(prompt: &str) -> (Option<&'static ModelDefinition>, &str) {
    let trimmed = prompt.trim_start();
    let Some(rest) = trimmed.strip_prefix('@') else {
        return (None, prompt);
    };
    let token_end = rest
        .find(|c: char| c.is_whitespace())
        .unwrap_or(rest.len());
    let token = &rest[..token_end];
    match resolve_forced(token) {
        Some(model) => (Some(model), rest[token_end..].trim_start()),
        None => (None, prompt),
    }
}

#[cfg(test)]
mod tests {
    use tollgate_core::CreditTier;

    use crate::lookup;

    use super::*;

    #[test]
    fn every_default_route_target_exists() {
        for task in TaskType::ALL {
            let id = default_route(task);
            assert!(lookup(id).is_some(), "default route for {task} names unknown model {id}");
        }
    }

    #[test]
    fn free_default_is_free_tier() {
        let model = lookup(FREE_DEFAULT_MODEL).expect("free default must exist");
        assert_eq!(model.credit_tier, CreditTier::Free);
        assert_eq!(model.credit_multiplier, 0.0);
    }

    #[test]
    fn fallback_chain_members_exist() {
        for id in BACKEND_FALLBACK_CHAIN {
            assert!(lookup(id).is_some(), "fallback chain names unknown model {id}");
        }
        // The chain starts at the free default so exhaustion never upgrades cost.
        assert_eq!(BACKEND_FALLBACK_CHAIN[0], FREE_DEFAULT_MODEL);
    }

    #[test]
    fn classifier_model_is_free() {
        let model = lookup(DEFAULT_CLASSIFIER_MODEL).expect("classifier model must exist");
        assert_eq!(model.credit_tier, CreditTier::Free);
    }

    #[test]
    fn test_task_routes_to_one_x_model() {
        let model = lookup(default_route(TaskType::Test)).unwrap();
        assert_eq!(model.id, "claude-sonnet-4");
        assert_eq!(model.credit_multiplier, 1.0);
    }

    #[test]
    fn resolve_forced_by_alias_and_id() {
        assert_eq!(resolve_forced("opus").unwrap().id, "claude-opus-4");
        assert_eq!(resolve_forced("OPUS").unwrap().id, "claude-opus-4");
        assert_eq!(resolve_forced("claude-sonnet-4").unwrap().id, "claude-sonnet-4");
        assert!(resolve_forced("nonexistent").is_none());
    }

    #[test]
    fn parse_forced_strips_alias() {
        let (model, clean) = parse_forced_model("@opus analyze this architecture");
        assert_eq!(model.unwrap().id, "claude-opus-4");
        assert_eq!(clean, "analyze this architecture");
    }

    #[test]
    fn parse_forced_ignores_unknown_token() {
        let (model, clean) = parse_forced_model("@nobody hello there");
        assert!(model.is_none());
        assert_eq!(clean, "@nobody hello there");
    }

    #[test]
    fn parse_forced_without_prefix() {
        let (model, clean) = parse_forced_model("write unit tests");
        assert!(model.is_none());
        assert_eq!(clean, "write unit tests");
    }

    #[test]
    fn parse_forced_bare_alias() {
        let (model, clean) = parse_forced_model("@sonnet");
        assert_eq!(model.unwrap().id, "claude-sonnet-4");
        assert_eq!(clean, "");
    }

    #[test]
    fn suggest_catches_typos() {
        assert_eq!(suggest("claude-sonet-4"), Some("claude-sonnet-4"));
        assert_eq!(suggest("gpt4.1"), Some("gpt-4.1"));
        assert_eq!(suggest("zzzzzz"), None);
    }
}
