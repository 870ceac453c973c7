//! Model client module for chat completions
//!
//! This module provides:
//! - `message`: Provider-neutral chat messages
//! - `client`: The completion seam and its OpenAI-compatible implementation

mod client;
mod message;
#[cfg(test)]
pub(crate) mod recording;

pub use client::{ClientFactory, CompletionClient, OpenAiClient, OpenAiClientFactory};
pub use message::{ChatMessage, MessageBuilder, Role};
