//! Model endpoint and context source settings

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::Language;

/// Hosted OpenAI-compatible endpoint used when none is configured
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat model used for every completion request
pub const DEFAULT_MODEL: &str = "o4-mini-2025-04-16";

/// Where the context blob comes from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContextMode {
    /// Files are handed over explicitly; clearing the chat drops the context.
    #[default]
    Uploads,
    /// Files are discovered in a fixed directory; clearing the chat rescans it.
    Directory(PathBuf),
}

impl ContextMode {
    /// The scanned directory, if any
    pub fn directory(&self) -> Option<&Path> {
        match self {
            Self::Uploads => None,
            Self::Directory(dir) => Some(dir),
        }
    }
}

/// Configuration for a chat session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    pub base_url: String,
    pub model: String,
    pub lang: Language,
    pub context_mode: ContextMode,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            lang: Language::Portuguese,
            context_mode: ContextMode::Uploads,
        }
    }
}

impl ChatConfig {
    /// Create a new ChatConfig with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the language
    pub fn with_lang(mut self, lang: Language) -> Self {
        self.lang = lang;
        self
    }

    /// Scan `dir` for context files instead of waiting for uploads
    pub fn with_context_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.context_mode = ContextMode::Directory(dir.into());
        self
    }
}
