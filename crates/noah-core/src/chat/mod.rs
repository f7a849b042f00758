//! Conversation handling for Noah.
//!
//! - `store`: the `ConversationStore` port the infrastructure layer implements
//! - `session`: conversation id resolution
//! - `history`: bounded history assembly for the generation call
//! - `generator`: reply generation with fallback on provider failure
//! - `service`: the per-message orchestrator

pub mod generator;
pub mod history;
pub mod prompt;
pub mod service;
pub mod session;
pub mod store;
