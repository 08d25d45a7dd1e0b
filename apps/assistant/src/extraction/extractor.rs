//! Two-stage PDF text extraction.
//!
//! `pdf-extract` handles most digitally generated reports; documents it
//! chokes on (or yields almost nothing for) get a second pass with a direct
//! `lopdf` page walk. Anything still under the threshold is treated as
//! having no usable text — typically a scanned, image-only PDF.

use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::errors::PipelineError;

/// Extractions shorter than this (trimmed) are considered unusable.
const MIN_TEXT_LEN: usize = 50;

pub fn extract_text(path: &Path) -> Result<String, PipelineError> {
    info!("extracting text from {}", path.display());

    let text = extraction_chain(
        || extract_with_pdf_extract(path),
        || extract_with_lopdf(path),
    );

    match text {
        Some(text) => {
            info!("extracted {} characters from {}", text.len(), path.display());
            Ok(text)
        }
        None => Err(PipelineError::Extraction {
            path: path.display().to_string(),
        }),
    }
}

/// Runs the primary extractor and, only if its output is unusable, the
/// fallback. Returns trimmed text or `None` when both passes come up short.
fn extraction_chain(
    primary: impl FnOnce() -> Result<String>,
    fallback: impl FnOnce() -> Result<String>,
) -> Option<String> {
    match primary() {
        Ok(text) if is_usable(&text) => return Some(text.trim().to_string()),
        Ok(_) => warn!("primary extraction yielded too little text, trying fallback"),
        Err(e) => warn!("primary extraction failed: {e}"),
    }

    match fallback() {
        Ok(text) if is_usable(&text) => Some(text.trim().to_string()),
        Ok(_) => None,
        Err(e) => {
            warn!("fallback extraction failed: {e}");
            None
        }
    }
}

fn is_usable(text: &str) -> bool {
    text.trim().len() >= MIN_TEXT_LEN
}

fn extract_with_pdf_extract(path: &Path) -> Result<String> {
    Ok(pdf_extract::extract_text(path)?)
}

fn extract_with_lopdf(path: &Path) -> Result<String> {
    let doc = lopdf::Document::load(path)?;
    let mut text = String::new();

    for page_num in doc.get_pages().keys() {
        // Pages that fail to decode are skipped.
        if let Ok(page_text) = doc.extract_text(&[*page_num]) {
            if !page_text.trim().is_empty() {
                text.push_str(page_text.trim());
                text.push_str("\n\n");
            }
        }
    }

    Ok(text.trim().to_string())
}
