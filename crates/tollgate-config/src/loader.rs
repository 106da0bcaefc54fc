// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./tollgate.toml` > `~/.config/tollgate/tollgate.toml`
//! > `/etc/tollgate/tollgate.toml` with environment variable overrides via the
//! `TOLLGATE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TollgateConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/tollgate/tollgate.toml` (system-wide)
/// 3. `~/.config/tollgate/tollgate.toml` (user XDG config)
/// 4. `./tollgate.toml` (local directory)
/// 5. `TOLLGATE_*` environment variables
pub fn load_config() -> Result<TollgateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TollgateConfig::default()))
        .merge(Toml::file("/etc/tollgate/tollgate.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("tollgate/tollgate.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("tollgate.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<TollgateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TollgateConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TollgateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TollgateConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TOLLGATE_ROUTER_MAX_CREDIT_TIER` must map
/// to `router.max_credit_tier`, not `router.max.credit.tier`.
fn env_provider() -> Env {
    Env::prefixed("TOLLGATE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: TOLLGATE_ROUTER_CLASSIFIER_MODEL -> "router_classifier_model"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("router_", "router.", 1)
            .replacen("cost_", "cost.", 1)
            .replacen("feedback_", "feedback.", 1);
        mapped.into()
    })
}
