// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-tier task classification.
//!
//! The primary tier asks an external capability to label the prompt and parses
//! its output against a strict `TASK:<label>` contract. Any failure -- missing
//! backend, stream error, cancellation, unparseable output -- falls through to
//! the deterministic keyword tier, which is total and performs no I/O. The
//! router therefore always has a usable classification.

use std::str::FromStr;
use std::sync::LazyLock;

use futures::StreamExt;
use regex::Regex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use tollgate_config::RouterConfig;
use tollgate_core::{BackendRegistry, ChatMessage, TaskType};

/// Prompts at or above this many characters classify as `long-context`
/// before any keyword rule runs.
pub const LONG_CONTEXT_CHARS: usize = 8_000;

/// Strict single-line output contract of the primary classifier.
static TASK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\btask:\s*([a-z-]+)").expect("static regex"));

/// Keyword rules checked in a fixed priority order; the first match wins.
///
/// The order is a policy decision: a prompt containing both "test" and "debug"
/// vocabulary classifies as `test` because it is checked first. Do not reorder.
static KEYWORD_RULES: LazyLock<Vec<(TaskType, Regex)>> = LazyLock::new(|| {
    [
        (
            TaskType::Test,
            r"\btests?\b|\btesting\b|\btest case|\bcoverage\b|\bmocks?\b|\bassert",
        ),
        (
            TaskType::Debug,
            r"\bdebug|\bfix\b|\bbug\b|\berror\b|\bcrash|\bstack trace\b|\bnot working\b|\bbroken\b|\bexception\b",
        ),
        (
            TaskType::Security,
            r"\bsecur|\bvulnerab|\bexploit|\bsanitiz|\binjection\b|\bxss\b|\bcsrf\b|\bauthenticat|\bencrypt",
        ),
        (
            TaskType::Architecture,
            r"\barchitect|\bdesign pattern|\bsystem design\b|\bmicroservice|\bscalab",
        ),
        (
            TaskType::Refactor,
            r"\brefactor|\bclean ?up\b|\bsimplify\b|\brestructur|\bextract (method|function)\b|\brename\b",
        ),
        (
            TaskType::Algorithm,
            r"\balgorithm|\boptimi[sz]e|\bcomplexity\b|\bbig[- ]?o\b|\bsorting\b|\bdynamic programming\b|\bperformance\b",
        ),
        (
            TaskType::Review,
            r"\breview\b|\bcritique\b|\bfeedback on\b|\blook over\b",
        ),
        (
            TaskType::Documentation,
            r"\bdocument|\bdocstring|\bcomments? for\b|\breadme\b|\bexplain\b",
        ),
        (
            TaskType::Conversion,
            r"\bconvert|\btranslate\b|\bmigrate\b|\brewrite .{0,20}\bin\b|\bport (this|it|to)\b",
        ),
        (
            TaskType::Function,
            r"\bfunction\b|\bmethod\b|\bimplement|\bwrite a\b|\bcreate a\b|\bclass\b",
        ),
        (
            TaskType::Simple,
            r"\bwhat (is|are)\b|\bhow (do|does|to)\b|\bwhy\b",
        ),
        (
            TaskType::Autocomplete,
            r"\bcomplete\b|\bfinish\b|\bcontinue\b|\bautocomplete\b",
        ),
    ]
    .into_iter()
    .map(|(task, pattern)| (task, Regex::new(pattern).expect("static regex")))
    .collect()
});

/// Two-tier prompt classifier.
pub struct TaskClassifier;

impl TaskClassifier {
    /// Classify a prompt, preferring the external capability and recovering
    /// locally on any failure. Always returns a label.
    pub async fn classify(
        prompt: &str,
        config: &RouterConfig,
        registry: &dyn BackendRegistry,
        cancel: CancellationToken,
    ) -> TaskType {
        match Self::classify_primary(prompt, config, registry, cancel).await {
            Ok(task) => task,
            Err(reason) => {
                debug!(reason, "primary classification unavailable, using keyword fallback");
                Self::classify_fallback(prompt)
            }
        }
    }

    /// Single-attempt external classification. No retries; fail-fast to the
    /// keyword tier on any error.
    async fn classify_primary(
        prompt: &str,
        config: &RouterConfig,
        registry: &dyn BackendRegistry,
        cancel: CancellationToken,
    ) -> Result<TaskType, &'static str> {
        let model = tollgate_catalog::lookup(&config.classifier_model)
            .ok_or("classifier model not in catalog")?;
        let backend = registry
            .by_family(model.family)
            .await
            .into_iter()
            .next()
            .ok_or("no backend for classifier model")?;

        let messages = [
            ChatMessage::system(Self::instruction()),
            ChatMessage::user(prompt),
        ];
        let mut stream = backend
            .stream(&messages, cancel)
            .await
            .map_err(|_| "classifier stream failed to open")?;

        // Read the full streamed response before parsing.
        let mut output = String::new();
        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(text) => output.push_str(&text),
                Err(_) => return Err("classifier stream errored"),
            }
        }

        let label = TASK_LINE
            .captures(&output)
            .and_then(|c| c.get(1))
            .ok_or("classifier output did not match TASK:<label>")?;
        TaskType::from_str(label.as_str()).map_err(|_| "classifier returned unknown label")
    }

    /// Deterministic keyword classification. Total; never performs I/O.
    pub fn classify_fallback(prompt: &str) -> TaskType {
        if prompt.len() >= LONG_CONTEXT_CHARS {
            return TaskType::LongContext;
        }
        let lower = prompt.to_lowercase();
        for (task, pattern) in KEYWORD_RULES.iter() {
            if pattern.is_match(&lower) {
                return *task;
            }
        }
        TaskType::Function
    }

    /// Fixed system instruction enumerating the 13 labels and their criteria.
    fn instruction() -> String {
        let mut text = String::from(
            "Classify the user's request into exactly one task label.\n\
             Labels and criteria:\n",
        );
        for task in TaskType::ALL {
            text.push_str("- ");
            text.push_str(&task.to_string());
            text.push_str(": ");
            text.push_str(Self::criteria(task));
            text.push('\n');
        }
        text.push_str("Respond with a single line of the form TASK:<label> and nothing else.");
        text
    }

    fn criteria(task: TaskType) -> &'static str {
        match task {
            TaskType::Autocomplete => "completing a partial snippet in place",
            TaskType::Simple => "a short factual or how-to question",
            TaskType::Function => "writing a single function, method, or class",
            TaskType::Algorithm => "algorithm design, optimization, or complexity analysis",
            TaskType::Test => "writing or extending tests, mocks, or coverage",
            TaskType::Debug => "diagnosing errors, crashes, or broken behavior",
            TaskType::Refactor => "restructuring existing code without changing behavior",
            TaskType::Architecture => "system design, patterns, or service decomposition",
            TaskType::Security => "vulnerabilities, sanitization, or authentication concerns",
            TaskType::Documentation => "writing docs, docstrings, or explanations",
            TaskType::Conversion => "converting code between languages or frameworks",
            TaskType::Review => "reviewing or critiquing provided code",
            TaskType::LongContext => "a request carrying a very large body of input text",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;
    use tollgate_test_utils::{MockBackend, MockRegistry};

    use super::*;

    fn config() -> RouterConfig {
        RouterConfig::default()
    }

    #[test]
    fn fallback_orders_test_before_debug() {
        // Contains both "test" and "debug" vocabulary; test is checked first.
        let task = TaskClassifier::classify_fallback("debug the failing unit tests");
        assert_eq!(task, TaskType::Test);
    }

    #[test]
    fn fallback_labels_common_prompts() {
        assert_eq!(
            TaskClassifier::classify_fallback("write unit tests for UserService"),
            TaskType::Test
        );
        assert_eq!(
            TaskClassifier::classify_fallback("analyze this architecture"),
            TaskType::Architecture
        );
        assert_eq!(
            TaskClassifier::classify_fallback("fix the crash in the login flow"),
            TaskType::Debug
        );
        assert_eq!(
            TaskClassifier::classify_fallback("sanitize user input against sql injection"),
            TaskType::Security
        );
        assert_eq!(
            TaskClassifier::classify_fallback("refactor this module"),
            TaskType::Refactor
        );
        assert_eq!(
            TaskClassifier::classify_fallback("what is the big-o complexity here"),
            TaskType::Algorithm
        );
        assert_eq!(
            TaskClassifier::classify_fallback("please review my pull request"),
            TaskType::Review
        );
        assert_eq!(
            TaskClassifier::classify_fallback("add docstrings to the parser"),
            TaskType::Documentation
        );
        assert_eq!(
            TaskClassifier::classify_fallback("convert this script to python"),
            TaskType::Conversion
        );
        assert_eq!(
            TaskClassifier::classify_fallback("implement a parser for csv rows"),
            TaskType::Function
        );
        assert_eq!(
            TaskClassifier::classify_fallback("continue the snippet"),
            TaskType::Autocomplete
        );
    }

    #[test]
    fn fallback_defaults_to_function() {
        assert_eq!(TaskClassifier::classify_fallback(""), TaskType::Function);
        assert_eq!(
            TaskClassifier::classify_fallback("lorem ipsum dolor sit amet"),
            TaskType::Function
        );
    }

    #[test]
    fn long_prompts_classify_as_long_context() {
        let prompt = "x".repeat(LONG_CONTEXT_CHARS);
        assert_eq!(TaskClassifier::classify_fallback(&prompt), TaskType::LongContext);
    }

    #[tokio::test]
    async fn primary_parses_task_line() {
        let backend = Arc::new(MockBackend::with_responses(
            "gpt-4.1",
            "gpt-4.1",
            "openai",
            vec!["TASK:security".into()],
        ));
        let registry = MockRegistry::with_backends(vec![backend]);

        let task = TaskClassifier::classify(
            "harden the endpoint",
            &config(),
            &registry,
            CancellationToken::new(),
        )
        .await;
        assert_eq!(task, TaskType::Security);
    }

    #[tokio::test]
    async fn primary_parse_is_case_insensitive_and_positional() {
        let backend = Arc::new(MockBackend::with_responses(
            "gpt-4.1",
            "gpt-4.1",
            "openai",
            vec!["Sure!\ntask: Refactor\n".into()],
        ));
        let registry = MockRegistry::with_backends(vec![backend]);

        let task = TaskClassifier::classify(
            "tidy this up",
            &config(),
            &registry,
            CancellationToken::new(),
        )
        .await;
        assert_eq!(task, TaskType::Refactor);
    }

    #[tokio::test]
    async fn unknown_label_falls_back_to_keywords() {
        let backend = Arc::new(MockBackend::with_responses(
            "gpt-4.1",
            "gpt-4.1",
            "openai",
            vec!["TASK:sorcery".into()],
        ));
        let registry = MockRegistry::with_backends(vec![backend]);

        let task = TaskClassifier::classify(
            "write unit tests for UserService",
            &config(),
            &registry,
            CancellationToken::new(),
        )
        .await;
        assert_eq!(task, TaskType::Test);
    }

    #[tokio::test]
    async fn missing_backend_falls_back_to_keywords() {
        let registry = MockRegistry::new();
        let task = TaskClassifier::classify(
            "debug this stack trace",
            &config(),
            &registry,
            CancellationToken::new(),
        )
        .await;
        assert_eq!(task, TaskType::Debug);
    }

    #[tokio::test]
    async fn backend_error_falls_back_to_keywords() {
        let backend = Arc::new(MockBackend::failing("gpt-4.1", "gpt-4.1", "openai"));
        let registry = MockRegistry::with_backends(vec![backend]);

        let task = TaskClassifier::classify(
            "review this diff",
            &config(),
            &registry,
            CancellationToken::new(),
        )
        .await;
        assert_eq!(task, TaskType::Review);
    }

    #[tokio::test]
    async fn cancellation_falls_back_to_keywords() {
        let backend = Arc::new(MockBackend::new("gpt-4.1", "gpt-4.1", "openai"));
        let registry = MockRegistry::with_backends(vec![Arc::clone(&backend)]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let task =
            TaskClassifier::classify("sanitize the form input", &config(), &registry, cancel)
                .await;
        assert_eq!(task, TaskType::Security);
        // The primary tier was attempted exactly once.
        assert_eq!(backend.call_count(), 1);
    }

    #[test]
    fn instruction_enumerates_all_labels() {
        let instruction = TaskClassifier::instruction();
        for task in TaskType::ALL {
            assert!(
                instruction.contains(&task.to_string()),
                "instruction missing label {task}"
            );
        }
        assert!(instruction.contains("TASK:<label>"));
    }

    proptest! {
        /// The fallback tier is total: any input yields a label without panicking.
        #[test]
        fn fallback_is_total(prompt in ".{0,400}") {
            let _ = TaskClassifier::classify_fallback(&prompt);
        }

        /// Keyword-free prompts always default to `function`.
        #[test]
        fn keyword_free_prompts_default_to_function(n in 1usize..60) {
            let prompt = "z ".repeat(n);
            prop_assert_eq!(TaskClassifier::classify_fallback(&prompt), TaskType::Function);
        }
    }
}
