//! Result Writer — serializes batch outcomes to the analysis document.
//! Pure formatting; failed reports keep their section with a placeholder.

use std::fs;
use std::path::Path;

use crate::errors::PipelineError;
use crate::models::report::ReportOutcome;

pub fn render_analysis(outcomes: &[ReportOutcome], model_note: &str) -> String {
    let mut doc = format!("# Comprehensive Medical AI Analysis\n\nGenerated using {model_note}\n\n");

    for (index, outcome) in outcomes.iter().enumerate() {
        doc.push_str(&format!("## Report {}: {}\n\n", index + 1, outcome.title()));

        match outcome {
            ReportOutcome::Analyzed(result) => {
                doc.push_str(&format!("### Care Plan\n{}\n\n", result.care_plan));
                doc.push_str(&format!(
                    "### Patient-Friendly Diagnosis\n{}\n\n",
                    result.diagnosis
                ));
                doc.push_str(&format!("### Age-Relevant Statistics\n{}\n\n", result.stats));
                doc.push_str(&format!(
                    "### Provider Communication Message\n{}\n\n",
                    result.provider_message
                ));
            }
            ReportOutcome::Failed { reason, .. } => {
                doc.push_str(&format!("*Analysis failed: {reason}*\n\n"));
            }
        }

        doc.push_str("---\n\n");
    }

    doc
}

pub fn write_analysis(
    path: &Path,
    outcomes: &[ReportOutcome],
    model_note: &str,
) -> Result<(), PipelineError> {
    fs::write(path, render_analysis(outcomes, model_note))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::AnalysisResult;

    fn analyzed(title: &str) -> ReportOutcome {
        ReportOutcome::Analyzed(AnalysisResult {
            title: title.to_string(),
            diagnosis: "the diagnosis".to_string(),
            care_plan: "the care plan".to_string(),
            stats: "NO DIAGNOSIS".to_string(),
            provider_message: "the message".to_string(),
        })
    }

    #[test]
    fn test_rendered_document_has_four_labeled_subsections() {
        let doc = render_analysis(&[analyzed("MRI Lumbar Spine")], "local (llama3.1:8b)");

        assert!(doc.starts_with("# Comprehensive Medical AI Analysis"));
        assert!(doc.contains("Generated using local (llama3.1:8b)"));
        assert!(doc.contains("## Report 1: MRI Lumbar Spine"));
        assert!(doc.contains("### Care Plan\nthe care plan"));
        assert!(doc.contains("### Patient-Friendly Diagnosis\nthe diagnosis"));
        assert!(doc.contains("### Age-Relevant Statistics\nNO DIAGNOSIS"));
        assert!(doc.contains("### Provider Communication Message\nthe message"));
    }

    #[test]
    fn test_failed_report_keeps_its_section_with_placeholder() {
        let outcomes = vec![
            analyzed("Good Report"),
            ReportOutcome::Failed {
                title: "Bad Report".to_string(),
                reason: "backend timed out after 120s".to_string(),
            },
        ];

        let doc = render_analysis(&outcomes, "mock");
        assert!(doc.contains("## Report 1: Good Report"));
        assert!(doc.contains("## Report 2: Bad Report"));
        assert!(doc.contains("*Analysis failed: backend timed out after 120s*"));
    }

    #[test]
    fn test_sections_are_separated_by_rules() {
        let doc = render_analysis(&[analyzed("A"), analyzed("B")], "mock");
        assert_eq!(doc.matches("---\n").count(), 2);
    }

    #[test]
    fn test_write_analysis_persists_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comprehensive_analysis.md");

        write_analysis(&path, &[analyzed("MRI")], "mock").unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("## Report 1: MRI"));
    }
}
