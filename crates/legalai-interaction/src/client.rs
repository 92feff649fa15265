//! HTTP client for the Query Service backend.

use std::time::Duration;

use legalai_types::Message;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::config::ServiceConfig;
use crate::wire::{DraftRequest, DraftResponse, QueryRequest, QueryResponse};

/// The fixed assistant message shown whenever a query cannot be answered.
///
/// This is the backend's own soft-failure text; using the same string keeps
/// the experience identical whether the failure happened server-side or on
/// the wire.
pub const FALLBACK_ANSWER: &str =
    "I apologize, but I'm having trouble processing your query. Please try rephrasing.";

/// Errors from the Query Service HTTP layer.
#[derive(Error, Debug)]
pub enum QueryServiceError {
    /// Connection-level failure (unreachable, timeout).
    #[error("Query service request failed: {0}")]
    Transport(String),

    /// Non-2xx response from the backend.
    #[error("Query service returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// 2xx response whose body did not parse.
    #[error("Failed to parse query service response: {0}")]
    InvalidResponse(String),

    /// Client construction / configuration failure.
    #[error("Query service configuration error: {0}")]
    Config(String),
}

/// Client for the LegalAI Query Service backend.
#[derive(Clone)]
pub struct QueryServiceClient {
    client: Client,
    base_url: String,
}

impl QueryServiceClient {
    /// Creates a client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ServiceConfig) -> Result<Self, QueryServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| QueryServiceError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from the resolved per-user configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_env() -> Result<Self, QueryServiceError> {
        Self::new(&ServiceConfig::resolve())
    }

    /// The backend base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a query and returns the raw typed response.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or an
    /// unparseable body. Most callers want [`Self::ask`] instead, which
    /// folds all of those into the fallback message.
    pub async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, QueryServiceError> {
        let url = format!("{}/query", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| QueryServiceError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body));
        }

        response
            .json()
            .await
            .map_err(|e| QueryServiceError::InvalidResponse(e.to_string()))
    }

    /// Sends a query and always produces an assistant [`Message`].
    ///
    /// Transport errors, bad statuses, malformed bodies, and responses
    /// without an answer all collapse into the fixed fallback bubble; the
    /// details go to the log, never to the caller.
    pub async fn ask(&self, request: &QueryRequest) -> Message {
        match self.query(request).await {
            Ok(response) => response_to_message(response),
            Err(e) => {
                tracing::warn!("Query failed, substituting fallback answer: {e}");
                Message::assistant(FALLBACK_ANSWER)
            }
        }
    }

    /// Generates a legal document draft.
    ///
    /// # Errors
    ///
    /// Unlike chat, drafting is an explicit action with its own UI surface,
    /// so failures propagate as errors instead of a fallback document.
    pub async fn draft(&self, request: &DraftRequest) -> Result<DraftResponse, QueryServiceError> {
        let url = format!("{}/draft", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| QueryServiceError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body));
        }

        response
            .json()
            .await
            .map_err(|e| QueryServiceError::InvalidResponse(e.to_string()))
    }

    /// Probes `GET /health`. Informational only; any failure reads as
    /// "backend unavailable".
    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Health probe failed: {e}");
                false
            }
        }
    }
}

/// FastAPI error body: `{"detail": "..."}`.
#[derive(Deserialize)]
struct ErrorResponse {
    detail: String,
}

fn map_http_error(status: StatusCode, body: String) -> QueryServiceError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.detail)
        .unwrap_or(body);

    QueryServiceError::Status {
        status: status.as_u16(),
        message,
    }
}

/// Converts a backend response into an assistant message.
///
/// A missing or blank `answer` yields the fallback bubble with no
/// enrichments; a real answer carries whatever enrichments came back, with
/// empty lists normalized to absent fields.
fn response_to_message(response: QueryResponse) -> Message {
    let answer = match response.answer {
        Some(answer) if !answer.trim().is_empty() => answer,
        _ => {
            tracing::warn!("Query response had no answer; substituting fallback");
            return Message::assistant(FALLBACK_ANSWER);
        }
    };

    let mut message = Message::assistant(answer);
    if !response.citations.is_empty() {
        message.citations = Some(response.citations);
    }
    if !response.related_judgments.is_empty() {
        message.judgments = Some(response.related_judgments);
    }
    message.arguments = response.arguments;
    message.neutral_analysis = response.neutral_analysis;
    message
}
