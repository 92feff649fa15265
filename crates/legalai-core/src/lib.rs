//! Domain layer of the LegalAI client.
//!
//! Owns the conversation model, the conversation store (the authoritative
//! in-memory session state), and the persistence port the store writes
//! through. Storage adapters and the HTTP client layer live in sibling
//! crates; this one has no I/O of its own beyond the injected port.

pub mod conversation;
pub mod error;

// Re-export common error type
pub use error::{LegalAiError, Result};

pub use conversation::{
    append_message, Conversation, ConversationStore, SnapshotStorage, CONVERSATIONS_KEY,
};
