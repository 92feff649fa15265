//! Structured enrichments attached to assistant answers.
//!
//! Shapes mirror what the Query Service puts on the wire, so these types
//! double as response fragments in the interaction layer and as persisted
//! message fields in the conversation snapshot.

use serde::{Deserialize, Serialize};

/// A statute or judgment citation backing part of an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Human-readable source, e.g. "Indian Penal Code" or
    /// "Supreme Court Judgment".
    pub source: String,
    /// Section number or case title within the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Link to the source text when the backend has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Short excerpt of the cited passage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A related court judgment surfaced alongside an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgment {
    /// Case title.
    pub title: String,
    /// Short summary of the judgment.
    pub summary: String,
    /// Backend-internal case identifier, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
}

/// Balanced argument lists produced when arguments mode is on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancedArguments {
    /// Points arguing for the position.
    #[serde(rename = "for")]
    pub for_points: Vec<String>,
    /// Points arguing against the position.
    #[serde(rename = "against")]
    pub against_points: Vec<String>,
}

/// Neutral analysis produced when analysis mode is on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeutralAnalysis {
    /// Factors a court would weigh.
    pub factors: Vec<String>,
    /// Possible interpretations of those factors.
    pub interpretations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn citation_tolerates_missing_optionals() {
        let json = r#"{"source":"General Legal Guidance","section":null}"#;
        let citation: Citation = serde_json::from_str(json).unwrap();
        assert_eq!(citation.source, "General Legal Guidance");
        assert!(citation.section.is_none());
        assert!(citation.url.is_none());
    }

    #[test]
    fn judgment_roundtrip() {
        let judgment = Judgment {
            title: "K.S. Puttaswamy v. Union of India".to_string(),
            summary: "Privacy is a fundamental right under Article 21...".to_string(),
            case_id: Some("2017-10-scc-1".to_string()),
        };
        let json = serde_json::to_string(&judgment).unwrap();
        assert_eq!(serde_json::from_str::<Judgment>(&json).unwrap(), judgment);
    }
}
