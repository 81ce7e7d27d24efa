use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{LlmError, truncate_body};

use super::{ChatClient, ChatRequest};

const CHAT_COMPLETIONS_URL: &str = "https://api.mistral.ai/v1/chat/completions";

/// Chat client backed by the Mistral chat-completions API.
#[derive(Debug, Clone)]
pub struct MistralClient {
    api_key: String,
    model: String,
    http: Client,
}

impl MistralClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self { api_key, model, http: Client::new() }
    }
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ApiResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ApiResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct ApiChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[async_trait]
impl ChatClient for MistralClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ApiMessage { role: "system", content: system });
        }
        messages.push(ApiMessage { role: "user", content: &request.user });

        let body = ApiRequest {
            model: &self.model,
            messages,
            temperature: request.temperature,
            response_format: request
                .json_only
                .then_some(ApiResponseFormat { kind: "json_object" }),
        };

        let res = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            return Err(LlmError::Http {
                status: status.as_u16(),
                body: truncate_body(&text),
            });
        }

        let parsed: ApiResponse = serde_json::from_str(&text)?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)
    }
}
