//! Age-relevant statistics lookup.
//!
//! This is a classification capability, not arithmetic: one model call
//! checks the report against the known-diagnosis table. When the patient's
//! age is known the prompt carries the full table so the model can quote
//! the matching age-group percentage; otherwise it only classifies against
//! the diagnosis list and answers `NO DIAGNOSIS` on no match.

use serde_json::Value;
use tracing::info;

use crate::analysis::prompts::{age_stats_prompt, stats_prompt};
use crate::errors::PipelineError;
use crate::llm_client::ModelGateway;

/// Prevalence of the known diagnoses by age group, in percent.
/// The key set doubles as the diagnosis list for the classification prompt.
static STATS_DATA: &[(&str, &[(&str, f64)])] = &[
    (
        "Degenerative Disc Disease",
        &[("18-34", 37.0), ("35-49", 52.0), ("50-64", 68.0), ("65+", 80.0)],
    ),
    (
        "Disc Herniation",
        &[("18-34", 2.0), ("35-49", 4.5), ("50-64", 3.0), ("65+", 1.5)],
    ),
    (
        "Spinal Stenosis",
        &[("18-34", 1.0), ("35-49", 5.0), ("50-64", 19.0), ("65+", 47.0)],
    ),
    (
        "Cervical Spondylosis",
        &[("18-34", 13.0), ("35-49", 40.0), ("50-64", 70.0), ("65+", 95.0)],
    ),
];

/// Comma-joined diagnosis names for the classification prompt.
pub fn diagnosis_list() -> String {
    STATS_DATA
        .iter()
        .map(|(diagnosis, _)| *diagnosis)
        .collect::<Vec<_>>()
        .join(",")
}

/// The full table as JSON, embedded in the age-percentage prompt.
pub fn stats_table_json() -> Value {
    let mut table = serde_json::Map::new();
    for (diagnosis, by_age) in STATS_DATA {
        let mut groups = serde_json::Map::new();
        for (group, percentage) in *by_age {
            groups.insert((*group).to_string(), Value::from(*percentage));
        }
        table.insert((*diagnosis).to_string(), Value::Object(groups));
    }
    Value::Object(table)
}

/// One classification call against the known-diagnosis table.
pub async fn find_stats(
    gateway: &dyn ModelGateway,
    report_text: &str,
    patient_age: Option<u32>,
) -> Result<String, PipelineError> {
    let prompt = match patient_age {
        Some(_) => {
            info!("looking up age-group percentage against the stats table");
            age_stats_prompt(&stats_table_json().to_string(), report_text)
        }
        None => {
            info!("classifying report against the known-diagnosis list");
            stats_prompt(&diagnosis_list(), report_text)
        }
    };

    Ok(gateway.complete(&prompt).await?.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::mock::MockGateway;

    #[test]
    fn test_diagnosis_list_is_comma_joined_table_keys() {
        let list = diagnosis_list();
        assert_eq!(
            list,
            "Degenerative Disc Disease,Disc Herniation,Spinal Stenosis,Cervical Spondylosis"
        );
    }

    #[test]
    fn test_stats_table_json_has_all_age_groups() {
        let table = stats_table_json();
        let stenosis = &table["Spinal Stenosis"];
        assert_eq!(stenosis["65+"], 47.0);
        assert_eq!(table.as_object().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_find_stats_returns_backend_text() {
        let gateway = MockGateway::new();
        gateway.push_text("NO DIAGNOSIS");

        let stats = find_stats(&gateway, "FINDINGS: unremarkable", None)
            .await
            .unwrap();
        assert_eq!(stats, "NO DIAGNOSIS");
    }

    #[tokio::test]
    async fn test_find_stats_with_age_still_single_call() {
        let gateway = MockGateway::new();
        gateway.push_text("68%");

        let stats = find_stats(&gateway, "FINDINGS: disc desiccation", Some(57))
            .await
            .unwrap();
        assert_eq!(stats, "68%");
    }
}
