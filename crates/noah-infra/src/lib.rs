//! Infrastructure layer for Noah.
//!
//! Implements the ports defined in `noah-core`: SQLite conversation storage
//! and the Gemini LLM provider. Also owns config file loading and credential
//! resolution.

pub mod config;
pub mod llm;
pub mod sqlite;
