// PDF text extraction and combined-document assembly.
// Extraction is per-document with a single fallback pass; page-level
// failures inside a document are skipped silently.

pub mod combined;
pub mod extractor;

pub use combined::{build_combined_document, clean_text, title_for, ExtractionRecord};
pub use extractor::extract_text;
