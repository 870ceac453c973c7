//! Completion client seam and the OpenAI-compatible implementation

use async_openai::{
    config::OpenAIConfig,
    types::{CreateChatCompletionRequestArgs, CreateChatCompletionResponse},
    Client,
};
use async_trait::async_trait;
use tracing::debug;

use super::message::{ChatMessage, MessageBuilder};
use crate::error::{ChatError, Result};

/// Sends one chat completion request and returns the primary reply
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Request a single, non-streamed completion
    ///
    /// Returns the text of the primary choice as sent by the model. A
    /// response without choices or without text content is an error.
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<String>;
}

/// Builds a client handle bound to one credential
pub trait ClientFactory: Send + Sync {
    fn connect(&self, api_key: &str) -> Box<dyn CompletionClient>;
}

/// Client for OpenAI-compatible chat completion APIs
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
}

impl OpenAiClient {
    /// Create a new OpenAiClient
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_base(base_url)
            .with_api_key(api_key);

        Self {
            client: Client::with_config(openai_config),
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(MessageBuilder::build_request_messages(messages)?)
            .build()?;

        debug!("Sending {} messages to {}", messages.len(), model);
        let response = self.client.chat().create(request).await?;

        primary_content(response)
    }
}

/// Text content of the first choice
fn primary_content(response: CreateChatCompletionResponse) -> Result<String> {
    let model = response.model;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ChatError::EmptyResponse(format!("no content from {}", model)))
}

/// Connects [`OpenAiClient`]s to one API base URL
#[derive(Debug, Clone)]
pub struct OpenAiClientFactory {
    base_url: String,
}

impl OpenAiClientFactory {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ClientFactory for OpenAiClientFactory {
    fn connect(&self, api_key: &str) -> Box<dyn CompletionClient> {
        Box::new(OpenAiClient::new(&self.base_url, api_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_keeps_base_url() {
        let factory = OpenAiClientFactory::new("http://localhost:8000/v1");
        assert_eq!(factory.base_url(), "http://localhost:8000/v1");
        let _client = factory.connect("sk-test");
    }

    fn response(choices: serde_json::Value) -> CreateChatCompletionResponse {
        serde_json::from_value(serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "o4-mini-2025-04-16",
            "choices": choices,
        }))
        .unwrap()
    }

    fn choice(index: u32, content: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "index": index,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop",
        })
    }

    #[test]
    fn test_primary_content_is_first_choice_verbatim() {
        let response = response(serde_json::json!([
            choice(0, "  padded answer \n".into()),
            choice(1, "second".into()),
        ]));

        assert_eq!(primary_content(response).unwrap(), "  padded answer \n");
    }

    #[test]
    fn test_no_choices_is_empty_response() {
        let result = primary_content(response(serde_json::json!([])));

        match result {
            Err(ChatError::EmptyResponse(message)) => {
                assert!(message.contains("o4-mini-2025-04-16"))
            }
            other => panic!("expected empty response, got {:?}", other),
        }
    }

    #[test]
    fn test_null_content_is_empty_response() {
        let result = primary_content(response(serde_json::json!([choice(
            0,
            serde_json::Value::Null
        )])));

        assert!(matches!(result, Err(ChatError::EmptyResponse(_))));
    }
}
