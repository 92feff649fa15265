//! Query Service HTTP client for the LegalAI client.
//!
//! The Query Service is the external RAG backend; everything in this crate
//! is plumbing between typed requests and its JSON endpoints, plus the
//! failure policy the chat flow relies on: a query failure is never an
//! error, it is a fallback assistant message.

mod client;
mod config;
mod wire;

pub use client::{QueryServiceClient, QueryServiceError, FALLBACK_ANSWER};
pub use config::ServiceConfig;
pub use wire::{DraftRequest, DraftResponse, QueryRequest, QueryResponse, DRAFT_TYPES};
