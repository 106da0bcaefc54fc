// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Tollgate router.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, environment variable
//! overrides, catalog-aware model id validation with typo suggestions, and an
//! atomic hot-reload handle.
//!
//! # Usage
//!
//! ```no_run
//! use tollgate_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("classifier: {}", config.router.classifier_model);
//! ```

pub mod diagnostic;
pub mod handle;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use handle::ConfigHandle;
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{CostConfig, DepartmentRule, FeedbackConfig, RouterConfig, TollgateConfig};

/// Load configuration from the XDG hierarchy and validate it.
///
/// This is the high-level entry point that:
/// 1. Loads config from TOML files + env vars via Figment
/// 2. On success: runs post-deserialization validation
/// 3. On Figment error: converts to a diagnostic error
///
/// Returns either a valid `TollgateConfig` or a list of diagnostic errors.
pub fn load_and_validate() -> Result<TollgateConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError::Parse {
            message: err.to_string(),
        }]),
    }
}

/// Load configuration from a specific TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<TollgateConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError::Parse {
            message: err.to_string(),
        }]),
    }
}
