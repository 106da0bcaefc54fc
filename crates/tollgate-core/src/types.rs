// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Tollgate workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier correlating a routing decision with its feedback records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classification label describing the nature of a request.
///
/// Exactly one label is assigned per request. Input that resolves to no label
/// defaults to `Function` at the classifier boundary; the enum itself has no
/// catch-all variant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum TaskType {
    Autocomplete,
    Simple,
    Function,
    Algorithm,
    Test,
    Debug,
    Refactor,
    Architecture,
    Security,
    Documentation,
    Conversion,
    Review,
    LongContext,
}

impl TaskType {
    /// All labels, in declaration order. Used for instruction building and tests.
    pub const ALL: [TaskType; 13] = [
        TaskType::Autocomplete,
        TaskType::Simple,
        TaskType::Function,
        TaskType::Algorithm,
        TaskType::Test,
        TaskType::Debug,
        TaskType::Refactor,
        TaskType::Architecture,
        TaskType::Security,
        TaskType::Documentation,
        TaskType::Conversion,
        TaskType::Review,
        TaskType::LongContext,
    ];
}

/// Ordinal cost class of a model. The derived `Ord` gives the fixed
/// free < cheap < standard < premium order used by policy ceiling checks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum CreditTier {
    Free,
    Cheap,
    Standard,
    Premium,
}

/// Role of a chat message sent to an execution backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One entry of the ordered message history handed to an execution backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Outcome signal attached to a feedback record.
///
/// Modeled as a tagged variant so `overridden_to` cannot exist on a
/// non-override record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rating", rename_all = "lowercase")]
pub enum Rating {
    Positive,
    Negative,
    #[serde(rename_all = "camelCase")]
    Override { overridden_to: String },
}

/// Append-only outcome record correlating to exactly one completed routing decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub timestamp: DateTime<Utc>,
    pub request_id: RequestId,
    pub selected_model: String,
    pub task_type: TaskType,
    #[serde(flatten)]
    pub rating: Rating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,
}

/// Wire body delivered to the feedback sink: the entry plus admin-configured
/// team and department identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackPayload {
    #[serde(flatten)]
    pub entry: FeedbackEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
}
