//! Conversation domain module.
//!
//! This module contains the conversation model, the conversation store, and
//! the persistence port the store writes its snapshot through.
//!
//! # Module Structure
//!
//! - `model`: Core conversation domain model (`Conversation`)
//! - `store`: Session state management (`ConversationStore`)
//! - `storage`: Persistence port (`SnapshotStorage`)

mod model;
mod storage;
mod store;

// Re-export public API
pub use model::Conversation;
pub use storage::{SnapshotStorage, CONVERSATIONS_KEY};
pub use store::{append_message, ConversationStore};
