//! Business logic and port definitions for Noah.
//!
//! This crate defines the "ports" (store and LLM provider traits) that the
//! infrastructure layer implements, plus the conversation orchestration
//! built on top of them. It depends only on `noah-types` -- never on
//! `noah-infra` or any database/IO crate.

pub mod chat;
pub mod llm;

#[cfg(test)]
pub(crate) mod testing;
