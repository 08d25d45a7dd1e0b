//! Assembles extracted report text into one combined markdown document.
//!
//! Each report becomes a `## Report N: Title` section whose body sits in a
//! fenced code block. PDFs that yielded no usable text keep their section
//! with a placeholder note, so the combined file accounts for every input.

use std::path::Path;

use chrono::{DateTime, Local};

/// One PDF's extraction outcome, in input order.
#[derive(Debug, Clone)]
pub struct ExtractionRecord {
    pub title: String,
    pub text: Option<String>,
}

/// Derives a report title from the PDF's file stem.
pub fn title_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Strips NUL bytes and turns form feeds into paragraph breaks.
pub fn clean_text(text: &str) -> String {
    text.replace('\u{0}', "").replace('\u{c}', "\n\n")
}

pub fn build_combined_document(
    records: &[ExtractionRecord],
    extracted_at: DateTime<Local>,
) -> String {
    let mut doc = format!(
        "# Medical Reports Extraction\n\n\
         Extracted on: {}\n\n\
         This document contains text extracted from {} medical PDF reports.\n\n",
        extracted_at.format("%Y-%m-%d %H:%M:%S"),
        records.len()
    );

    for (index, record) in records.iter().enumerate() {
        doc.push_str(&format!("## Report {}: {}\n\n", index + 1, record.title));

        match &record.text {
            Some(text) => {
                doc.push_str(&format!("```\n{}\n```\n\n---\n\n", clean_text(text).trim()));
            }
            None => {
                doc.push_str(
                    "*Could not extract text from this PDF. \
                     It may be an image-based PDF requiring OCR.*\n\n---\n\n",
                );
            }
        }
    }

    doc
}
