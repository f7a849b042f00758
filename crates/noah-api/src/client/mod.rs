//! Terminal client for the chat server.
//!
//! `SessionCache` persists the session token between runs, `ChatClient`
//! speaks HTTP, and `ClientSession` keeps the local transcript in step with
//! the server.

pub mod api;
pub mod session;
pub mod session_cache;

use thiserror::Error;

/// Errors surfaced by the terminal client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("a message is already being sent")]
    Busy,

    #[error("invalid server URL '{0}'")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("session cache error: {0}")]
    Cache(#[from] std::io::Error),
}
