use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::LlmError;

pub mod mistral;

pub use mistral::MistralClient;

/// A single-turn chat completion request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Optional system instruction sent before the user text.
    pub system: Option<String>,
    /// The user message.
    pub user: String,
    pub temperature: f32,
    /// Ask the model for a strict JSON object instead of prose.
    pub json_only: bool,
}

impl ChatRequest {
    /// Low-temperature request constrained to JSON output, for structured
    /// extraction tasks.
    pub fn extraction(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self { system: Some(system.into()), user: user.into(), temperature: 0.3, json_only: true }
    }

    /// Free-form prose request, for phrasing natural replies.
    pub fn prose(user: impl Into<String>) -> Self {
        Self { system: None, user: user.into(), temperature: 0.7, json_only: false }
    }
}

/// Interface for sending chat-style prompts to a language model.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details, so the agent stays decoupled from any particular provider and can
/// be tested with a scripted double. Model output is untrusted text; callers
/// must validate any structure they expect from it.
#[async_trait]
pub trait ChatClient: Send + Sync + Debug {
    /// Send the request and return the assistant's response text.
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;
}
