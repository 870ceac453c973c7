//! Context loading module
//!
//! This module provides:
//! - `source`: Named byte sources and directory scanning
//! - `pdf`: Page-ordered PDF text extraction
//! - `loader`: Concatenation of sources into the context blob

mod loader;
mod pdf;
mod source;

pub use loader::{ContextLoader, LoadStatus};
pub use pdf::extract_pdf_text;
pub use source::{scan_directory, SourceFile, SourceKind};
