// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Miette diagnostics for configuration load and validation failures.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error with diagnostic help text.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// Figment failed to parse or deserialize the configuration sources.
    #[error("failed to load configuration: {message}")]
    #[diagnostic(
        code(tollgate::config::parse),
        help("check tollgate.toml for unknown keys or wrong value types")
    )]
    Parse {
        /// The underlying figment error rendering.
        message: String,
    },

    /// A semantic constraint on a config value was violated.
    #[error("validation error: {message}")]
    #[diagnostic(code(tollgate::config::validation))]
    Validation {
        /// Description of the violated constraint.
        message: String,
    },

    /// A policy field names a model id absent from the catalog.
    #[error("unknown model `{model}` in `{key}`")]
    #[diagnostic(
        code(tollgate::config::unknown_model),
        help("{}", suggestion_help(suggestion.as_deref()))
    )]
    UnknownModel {
        /// The config key naming the model.
        key: String,
        /// The unrecognized model id.
        model: String,
        /// Closest catalog id by fuzzy match, if any.
        suggestion: Option<String>,
    },
}

fn suggestion_help(suggestion: Option<&str>) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`?"),
        None => "run `tollgate models` to list known model ids".to_string(),
    }
}

/// Render collected config errors to stderr as miette reports.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        let report = miette::Report::msg(format!("{error}"));
        eprintln!("{report:?}");
        if let Some(help) = error.help() {
            eprintln!("  help: {help}");
        }
    }
}
