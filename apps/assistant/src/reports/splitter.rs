//! Splits a combined reports document into individual `Report` records.
//!
//! A report section is a `## Report N: Title` header followed by a fenced
//! code block holding the extracted text. Sections without a well-formed
//! fenced block (extraction placeholders, stray prose) are dropped
//! silently. Malformed input yields an empty vector, never an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::report::Report;

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## Report \d+: (.+)$").expect("valid regex"));

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```\n(.*?)\n```").expect("valid regex"));

pub fn split(markdown: &str) -> Vec<Report> {
    let headers: Vec<(usize, usize, &str)> = HEADER_RE
        .captures_iter(markdown)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let title = caps.get(1)?.as_str().trim();
            Some((whole.start(), whole.end(), title))
        })
        .collect();

    let mut reports = Vec::new();

    for (index, (_, body_start, title)) in headers.iter().enumerate() {
        let section_end = headers
            .get(index + 1)
            .map(|next| next.0)
            .unwrap_or(markdown.len());
        let section = &markdown[*body_start..section_end];

        if let Some(caps) = FENCE_RE.captures(section) {
            if let Some(body) = caps.get(1) {
                reports.push(Report {
                    title: title.to_string(),
                    raw_text: body.as_str().trim().to_string(),
                });
            }
        }
    }

    reports
}
