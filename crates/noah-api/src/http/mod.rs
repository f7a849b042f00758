//! HTTP layer for Noah.
//!
//! Axum router under `/chat` with permissive CORS and request tracing.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
