//! Reply generation through the external LLM provider.
//!
//! `ReplyGenerator` turns an [`AssembledContext`] into a `CompletionRequest`
//! and absorbs every provider failure into a fixed fallback reply. Errors are
//! logged here and never reach the caller; there are no retries.

use noah_types::llm::{CompletionRequest, LlmError, Message, MessageRole};
use tracing::{Instrument, error, field, info_span};

use crate::llm::box_provider::BoxLlmProvider;

use super::history::AssembledContext;
use super::prompt::{SYSTEM_PROMPT, compose_final_turn};

/// Reply returned to the user when the provider call fails.
pub const FALLBACK_REPLY: &str =
    "Sorry, I’m having trouble responding right now. Please try again in a moment.";

/// Generates assistant replies with a fixed system instruction.
pub struct ReplyGenerator {
    provider: BoxLlmProvider,
    model: String,
    system_instruction: String,
    temperature: Option<f64>,
    max_output_tokens: Option<u32>,
}

impl ReplyGenerator {
    /// Create a generator using the built-in store-support instruction.
    pub fn new(provider: BoxLlmProvider, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            system_instruction: SYSTEM_PROMPT.to_string(),
            temperature: None,
            max_output_tokens: None,
        }
    }

    /// Replace the system instruction.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: Option<u32>) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Map the assembled context to a provider-agnostic request.
    ///
    /// Prior turns keep their order; the final user message carries the
    /// system instruction followed by the utterance.
    pub fn build_request(&self, context: &AssembledContext) -> CompletionRequest {
        let mut messages: Vec<Message> = context
            .history
            .iter()
            .map(|turn| Message {
                role: MessageRole::from(turn.sender),
                content: turn.text.clone(),
            })
            .collect();

        messages.push(Message {
            role: MessageRole::User,
            content: compose_final_turn(&self.system_instruction, &context.utterance),
        });

        CompletionRequest {
            model: self.model.clone(),
            messages,
            max_output_tokens: self.max_output_tokens,
            temperature: self.temperature,
        }
    }

    /// Generate a reply, falling back to [`FALLBACK_REPLY`] on any failure.
    pub async fn generate(&self, context: &AssembledContext) -> String {
        match self.try_generate(context).await {
            Ok(text) => text,
            Err(e) => {
                error!(
                    provider = self.provider.name(),
                    model = %self.model,
                    error = %e,
                    "Reply generation failed, returning fallback reply"
                );
                FALLBACK_REPLY.to_string()
            }
        }
    }

    async fn try_generate(&self, context: &AssembledContext) -> Result<String, LlmError> {
        let request = self.build_request(context);

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.temperature = ?request.temperature,
            gen_ai.history.turns = context.history.len(),
            gen_ai.usage.input_tokens = field::Empty,
            gen_ai.usage.output_tokens = field::Empty,
        );

        let response = self
            .provider
            .complete(&request)
            .instrument(span.clone())
            .await?;

        span.record("gen_ai.usage.input_tokens", response.usage.input_tokens);
        span.record("gen_ai.usage.output_tokens", response.usage.output_tokens);

        if response.content.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(response.content)
    }
}
