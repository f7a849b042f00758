//! Shared domain types for Noah.
//!
//! This crate contains the types used across the Noah chat service:
//! conversations, turns, LLM request shapes, configuration, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
