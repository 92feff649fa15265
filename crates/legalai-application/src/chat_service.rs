//! Chat session use-cases.

use std::sync::Arc;

use legalai_core::{append_message, Conversation, ConversationStore};
use legalai_interaction::{DraftRequest, DraftResponse, QueryRequest, QueryServiceError};
use legalai_types::{Language, Message};
use tokio::sync::Mutex;

use crate::backend::QueryBackend;

/// Per-query options the frontend controls.
#[derive(Debug, Clone)]
pub struct ChatOptions {
    /// Requested answer language.
    pub language: Language,
    /// Legal domain filter ("all" = no filter).
    pub domain: String,
    /// Ask for balanced for/against arguments.
    pub arguments_mode: bool,
    /// Ask for a neutral factor analysis.
    pub analysis_mode: bool,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            language: Language::default(),
            domain: "all".to_string(),
            arguments_mode: false,
            analysis_mode: false,
        }
    }
}

/// Drives chat sessions over the conversation store and a query backend.
///
/// The store is synchronous; wrapping it in a `Mutex` gives every store
/// operation the run-to-completion atomicity the single-threaded source
/// had. The lock is never held across a network await.
pub struct ChatService {
    store: Mutex<ConversationStore>,
    backend: Arc<dyn QueryBackend>,
}

impl ChatService {
    /// Creates a service over a loaded store and a backend.
    pub fn new(store: ConversationStore, backend: Arc<dyn QueryBackend>) -> Self {
        Self {
            store: Mutex::new(store),
            backend,
        }
    }

    /// Sends a user message through the full round trip.
    ///
    /// The user message is appended and persisted immediately (this is also
    /// what materializes a provisional session and mints its id, so the
    /// request can carry `session_id`). The store generation is captured
    /// before the network call; if the user switched or reset the session
    /// while the request was in flight, the late response is discarded with
    /// a warning and `None` is returned. Blank input is a no-op.
    pub async fn send_message(&self, text: &str, options: &ChatOptions) -> Option<Message> {
        if text.trim().is_empty() {
            return None;
        }

        let (request, issued_generation) = {
            let mut store = self.store.lock().await;
            let updated = append_message(store.session_messages(), Message::user(text));
            store.save_session(&updated);

            let request = QueryRequest::new(text)
                .with_language(options.language)
                .with_domain(options.domain.clone())
                .with_arguments_mode(options.arguments_mode)
                .with_analysis_mode(options.analysis_mode)
                .with_session_id(store.active_conversation_id().map(String::from));
            (request, store.generation())
        };

        let assistant = self.backend.ask(&request).await;

        let mut store = self.store.lock().await;
        if store.generation() != issued_generation {
            tracing::warn!("Discarding response that arrived after a session switch");
            return None;
        }

        let updated = append_message(store.session_messages(), assistant.clone());
        store.save_session(&updated);
        Some(assistant)
    }

    /// All saved conversations, most recently created first.
    pub async fn conversations(&self) -> Vec<Conversation> {
        self.store.lock().await.conversations().to_vec()
    }

    /// The working message list of the current session.
    pub async fn session_messages(&self) -> Vec<Message> {
        self.store.lock().await.session_messages().to_vec()
    }

    /// The active conversation id, or `None` for a provisional session.
    pub async fn active_conversation_id(&self) -> Option<String> {
        self.store
            .lock()
            .await
            .active_conversation_id()
            .map(String::from)
    }

    /// Switches the session to a saved conversation.
    pub async fn switch_to(&self, conversation_id: &str) {
        self.store.lock().await.switch_to(conversation_id);
    }

    /// Deletes a saved conversation.
    pub async fn delete_conversation(&self, conversation_id: &str) {
        self.store.lock().await.delete_conversation(conversation_id);
    }

    /// Starts a fresh provisional session.
    pub async fn new_session(&self) {
        self.store.lock().await.create_new_session();
    }

    /// Generates a document draft via the backend.
    ///
    /// # Errors
    ///
    /// Propagates backend failures; drafting has its own error surface.
    pub async fn draft(&self, request: &DraftRequest) -> Result<DraftResponse, QueryServiceError> {
        self.backend.draft(request).await
    }

    /// Probes backend availability.
    pub async fn health(&self) -> bool {
        self.backend.health().await
    }
}
