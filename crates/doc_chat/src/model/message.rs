//! Chat messages exchanged with the completion API

use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role/content pair of a completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Helper for converting messages into the OpenAI request types
pub struct MessageBuilder;

impl MessageBuilder {
    /// Create a system message
    pub fn create_system_message(content: &str) -> Result<ChatCompletionRequestMessage> {
        Ok(ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into())
    }

    /// Create a plain-text user message
    pub fn create_user_message(content: &str) -> Result<ChatCompletionRequestMessage> {
        Ok(ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into())
    }

    /// Create an assistant message
    pub fn create_assistant_message(content: &str) -> Result<ChatCompletionRequestMessage> {
        Ok(ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into())
    }

    /// Convert a whole message list, preserving order
    pub fn build_request_messages(
        messages: &[ChatMessage],
    ) -> Result<Vec<ChatCompletionRequestMessage>> {
        messages
            .iter()
            .map(|message| match message.role {
                Role::System => Self::create_system_message(&message.content),
                Role::User => Self::create_user_message(&message.content),
                Role::Assistant => Self::create_assistant_message(&message.content),
            })
            .collect()
    }
}
