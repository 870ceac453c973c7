//! PDF text extraction

use lopdf::Document;
use tracing::debug;

use crate::error::Result;

/// Extract the text of every page, concatenated in page-number order
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    let document = Document::load_mem(bytes)?;
    let pages = document.get_pages();

    let mut text = String::new();
    for page_number in pages.keys() {
        text.push_str(&document.extract_text(&[*page_number])?);
    }

    debug!("Extracted {} chars from {} PDF pages", text.len(), pages.len());
    Ok(text)
}
