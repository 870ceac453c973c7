//! Error types for context loading and completion requests

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Pdf(#[from] lopdf::Error),

    #[error("{0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("{0}")]
    Api(#[from] async_openai::error::OpenAIError),

    #[error("Empty response from model: {0}")]
    EmptyResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ChatError>;
