//! Shared message and enrichment types for the LegalAI client.
//!
//! These types form the vocabulary every other crate speaks: chat messages,
//! the optional structured enrichments the Query Service attaches to
//! assistant answers, and the request language selector.

use chrono::Utc;
use serde::{Deserialize, Serialize};

mod enrichment;

pub use enrichment::{BalancedArguments, Citation, Judgment, NeutralAnalysis};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
}

/// A single message in a conversation history.
///
/// Messages are immutable once created. The enrichment fields are only ever
/// populated on assistant messages, and only when the Query Service returned
/// the corresponding structures; they stay `None` otherwise so that a plain
/// chat bubble serializes to the same flat shape it always had.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The rendered markdown body of the message.
    pub content: String,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
    /// Related court judgments attached to an assistant answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub judgments: Option<Vec<Judgment>>,
    /// Balanced for/against argument lists attached to an assistant answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<BalancedArguments>,
    /// Neutral factor/interpretation analysis attached to an assistant answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neutral_analysis: Option<NeutralAnalysis>,
    /// Statute and judgment citations backing an assistant answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<Vec<Citation>>,
}

impl Message {
    /// Creates a user message stamped with the current time.
    pub fn user(content: impl Into<String>) -> Self {
        Self::plain(MessageRole::User, content)
    }

    /// Creates an assistant message stamped with the current time.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::plain(MessageRole::Assistant, content)
    }

    fn plain(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now().to_rfc3339(),
            judgments: None,
            arguments: None,
            neutral_analysis: None,
            citations: None,
        }
    }

    /// Returns true if any enrichment field is populated.
    pub fn has_enrichments(&self) -> bool {
        self.judgments.is_some()
            || self.arguments.is_some()
            || self.neutral_analysis.is_some()
            || self.citations.is_some()
    }
}

/// The answer language requested from the Query Service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    /// English.
    #[default]
    #[serde(rename = "en")]
    English,
    /// Hindi.
    #[serde(rename = "hi")]
    Hindi,
}

impl Language {
    /// The wire value sent to the Query Service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
