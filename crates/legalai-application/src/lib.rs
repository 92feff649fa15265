//! Application layer of the LegalAI client.
//!
//! `ChatService` is what a frontend talks to: it owns the conversation
//! store, serializes access to it, and drives the send-message round trip
//! against the Query Service, including the guard that keeps a late
//! response out of a session the user has already left.

mod backend;
mod chat_service;

pub use backend::QueryBackend;
pub use chat_service::{ChatOptions, ChatService};
