//! Request and response shapes for the Query Service endpoints.

use legalai_types::{BalancedArguments, Citation, Judgment, Language, NeutralAnalysis};
use serde::{Deserialize, Serialize};

/// Body of `POST /query`.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    /// The user's question, verbatim.
    pub query: String,
    /// Requested answer language.
    pub language: Language,
    /// Legal domain filter; the backend treats "all" as no filter.
    pub domain: String,
    /// Ask the backend for balanced for/against arguments.
    pub arguments_mode: bool,
    /// Ask the backend for a neutral factor analysis.
    pub analysis_mode: bool,
    /// The client's conversation id, when the session is materialized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl QueryRequest {
    /// Creates a plain English query with no modes enabled.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: Language::default(),
            domain: "all".to_string(),
            arguments_mode: false,
            analysis_mode: false,
            session_id: None,
        }
    }

    /// Sets the answer language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Sets the legal domain filter.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Enables or disables arguments mode.
    pub fn with_arguments_mode(mut self, on: bool) -> Self {
        self.arguments_mode = on;
        self
    }

    /// Enables or disables analysis mode.
    pub fn with_analysis_mode(mut self, on: bool) -> Self {
        self.analysis_mode = on;
        self
    }

    /// Attaches the active conversation id.
    pub fn with_session_id(mut self, session_id: Option<String>) -> Self {
        self.session_id = session_id;
        self
    }
}

/// Body of a `POST /query` response.
///
/// Every field except `answer` is best-effort: the backend omits or nulls
/// them freely, so they all default.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    /// The markdown answer body. Absence is a soft failure.
    #[serde(default)]
    pub answer: Option<String>,
    /// Citations backing the answer.
    #[serde(default)]
    pub citations: Vec<Citation>,
    /// Related court judgments.
    #[serde(default)]
    pub related_judgments: Vec<Judgment>,
    /// Balanced arguments, present only when arguments mode was on.
    #[serde(default)]
    pub arguments: Option<BalancedArguments>,
    /// Neutral analysis, present only when analysis mode was on.
    #[serde(default)]
    pub neutral_analysis: Option<NeutralAnalysis>,
    /// Backend confidence in the answer.
    #[serde(default)]
    pub confidence_score: Option<f64>,
    /// Verification pipeline status string.
    #[serde(default)]
    pub verification_status: Option<String>,
    /// Legal disclaimer text.
    #[serde(default)]
    pub disclaimer: Option<String>,
}

/// Draft document types the backend has templates for.
pub const DRAFT_TYPES: &[&str] = &[
    "legal_notice",
    "nda",
    "rent_agreement",
    "affidavit",
    "employment_contract",
    "posh_complaint",
    "rti_application",
];

/// Body of `POST /draft`.
#[derive(Debug, Clone, Serialize)]
pub struct DraftRequest {
    /// One of [`DRAFT_TYPES`] (unknown types get a generic template).
    pub draft_type: String,
    /// Free-form facts the draft should be filled in from.
    pub details: String,
    /// Requested document language.
    pub language: Language,
}

impl DraftRequest {
    /// Creates a draft request in the default language.
    pub fn new(draft_type: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            draft_type: draft_type.into(),
            details: details.into(),
            language: Language::default(),
        }
    }

    /// Sets the document language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

/// Body of a `POST /draft` response.
#[derive(Debug, Clone, Deserialize)]
pub struct DraftResponse {
    /// The generated document, markdown.
    pub draft: String,
    /// Echo of the requested type.
    #[serde(default)]
    pub draft_type: Option<String>,
    /// Backend status string ("success" on the happy path).
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_wire_fields() {
        let request = QueryRequest::new("Is Section 66A still in force?")
            .with_language(Language::Hindi)
            .with_arguments_mode(true);
        let json = serde_json::to_value(&request).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj["query"], "Is Section 66A still in force?");
        assert_eq!(obj["language"], "hi");
        assert_eq!(obj["domain"], "all");
        assert_eq!(obj["arguments_mode"], true);
        assert_eq!(obj["analysis_mode"], false);
        assert!(!obj.contains_key("session_id"));
    }

    #[test]
    fn session_id_is_sent_when_present() {
        let request = QueryRequest::new("q").with_session_id(Some("1700000000000".to_string()));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["session_id"], "1700000000000");
    }

    #[test]
    fn response_parses_full_backend_shape() {
        let json = r#"{
            "answer": "**Section 420** covers cheating.",
            "citations": [{"source": "Indian Penal Code", "section": "Section 420", "text": "Whoever cheats..."}],
            "related_judgments": [{"title": "State v. X", "summary": "...", "case_id": "c1"}],
            "arguments": {"for": ["a"], "against": ["b"]},
            "neutral_analysis": {"factors": ["f"], "interpretations": ["i"]},
            "verification_status": "APPROVED",
            "confidence_score": 0.92,
            "disclaimer": "AI-generated response."
        }"#;

        let response: QueryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.answer.as_deref(), Some("**Section 420** covers cheating."));
        assert_eq!(response.citations.len(), 1);
        assert_eq!(response.related_judgments[0].title, "State v. X");
        assert_eq!(response.arguments.unwrap().for_points, vec!["a"]);
        assert_eq!(response.confidence_score, Some(0.92));
    }

    #[test]
    fn response_tolerates_minimal_shape() {
        let response: QueryResponse = serde_json::from_str("{}").unwrap();
        assert!(response.answer.is_none());
        assert!(response.citations.is_empty());
        assert!(response.arguments.is_none());
    }

    #[test]
    fn null_enrichments_parse_as_absent() {
        let json = r#"{"answer": "ok", "arguments": null, "neutral_analysis": null}"#;
        let response: QueryResponse = serde_json::from_str(json).unwrap();
        assert!(response.arguments.is_none());
        assert!(response.neutral_analysis.is_none());
    }

    #[test]
    fn draft_response_parses() {
        let json = r###"{"draft": "## LEGAL NOTICE\n...", "draft_type": "legal_notice", "status": "success"}"###;
        let response: DraftResponse = serde_json::from_str(json).unwrap();
        assert!(response.draft.starts_with("## LEGAL NOTICE"));
        assert_eq!(response.status.as_deref(), Some("success"));
    }
}
