//! LLM provider implementations.
//!
//! Gemini is the only backend. [`create_provider`] builds it from
//! [`LlmConfig`] and an already-resolved credential.

pub mod gemini;

use std::time::Duration;

use noah_core::llm::box_provider::BoxLlmProvider;
use noah_types::config::LlmConfig;
use noah_types::llm::LlmError;
use secrecy::SecretString;

use self::gemini::GeminiProvider;

/// Create a [`BoxLlmProvider`] for the configured model endpoint.
pub fn create_provider(config: &LlmConfig, api_key: SecretString) -> Result<BoxLlmProvider, LlmError> {
    let provider = GeminiProvider::new(api_key, Duration::from_secs(config.timeout_secs))?
        .with_base_url(config.base_url.clone());
    Ok(BoxLlmProvider::new(provider))
}
