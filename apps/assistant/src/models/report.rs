/// One medical document's extracted text plus a display title.
///
/// Produced by the extractor (one per PDF) or the splitter (one per section
/// of a combined document). Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub title: String,
    pub raw_text: String,
}

/// Full analysis of one report. Built incrementally by the orchestrator:
/// `diagnosis` is always populated before `care_plan` and
/// `provider_message`, whose prompts embed the diagnosis text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub title: String,
    pub diagnosis: String,
    pub care_plan: String,
    pub stats: String,
    pub provider_message: String,
}

/// Per-report outcome consumed by the result writer. A failed report keeps
/// its place in the batch so the output document accounts for every input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Analyzed(AnalysisResult),
    Failed { title: String, reason: String },
}

impl ReportOutcome {
    pub fn title(&self) -> &str {
        match self {
            ReportOutcome::Analyzed(result) => &result.title,
            ReportOutcome::Failed { title, .. } => title,
        }
    }
}
