//! Configuration module for doc_chat
//!
//! This module contains:
//! - `i18n`: Localized UI messages
//! - `prompts`: Context-injection prompt template
//! - `settings`: Model endpoint and context source settings

mod i18n;
mod prompts;
mod settings;

pub use i18n::{get_message, get_messages, Language, MESSAGES_EN, MESSAGES_PT};
pub use prompts::context_prompt;
pub use settings::{ChatConfig, ContextMode, DEFAULT_BASE_URL, DEFAULT_MODEL};
