//! Query backend port.

use async_trait::async_trait;
use legalai_interaction::{
    DraftRequest, DraftResponse, QueryRequest, QueryServiceClient, QueryServiceError,
};
use legalai_types::Message;

/// The slice of the Query Service the application layer depends on.
///
/// `QueryServiceClient` is the production implementation; tests substitute
/// stubs to control timing and responses without a network.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Sends a chat query; always yields an assistant message (the
    /// implementation owns the fallback policy).
    async fn ask(&self, request: &QueryRequest) -> Message;

    /// Generates a document draft.
    async fn draft(&self, request: &DraftRequest) -> Result<DraftResponse, QueryServiceError>;

    /// Probes backend availability.
    async fn health(&self) -> bool;
}

#[async_trait]
impl QueryBackend for QueryServiceClient {
    async fn ask(&self, request: &QueryRequest) -> Message {
        QueryServiceClient::ask(self, request).await
    }

    async fn draft(&self, request: &DraftRequest) -> Result<DraftResponse, QueryServiceError> {
        QueryServiceClient::draft(self, request).await
    }

    async fn health(&self) -> bool {
        QueryServiceClient::health(self).await
    }
}
