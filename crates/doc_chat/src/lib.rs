//! doc_chat: chat with a hosted model about your own files
//!
//! This library provides:
//! - Context loading from `.txt` and `.pdf` files (uploaded or scanned from a directory)
//! - A conversation session holding the API key, context and transcript
//! - An OpenAI-compatible completion client behind a swappable trait
//! - Portuguese/English UI messages
//!
//! # Example
//!
//! ```no_run
//! use doc_chat::{ChatConfig, Session};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut session = Session::openai(ChatConfig::new().with_context_dir("docs"));
//!     session.set_credential("sk-...");
//!     session.reload_context();
//!
//!     let reply = session.exchange("Resuma os documentos").await;
//!     println!("{}", reply);
//! }
//! ```

// Core modules
pub mod error;

// Configuration module
pub mod config;

// Core functionality
pub mod context;
pub mod model;
pub mod session;

pub use error::{ChatError, Result};

// Config re-exports
pub use config::{
    context_prompt, get_message, get_messages, ChatConfig, ContextMode, Language,
    DEFAULT_BASE_URL, DEFAULT_MODEL,
};

// Context re-exports
pub use context::{
    extract_pdf_text, scan_directory, ContextLoader, LoadStatus, SourceFile, SourceKind,
};

// Model re-exports
pub use model::{
    ChatMessage, ClientFactory, CompletionClient, MessageBuilder, OpenAiClient,
    OpenAiClientFactory, Role,
};

// Session re-exports
pub use session::{Reply, Session, Transcript, Turn};
