//! Pipeline Orchestrator — runs one report through the four-step analysis.
//!
//! Flow per report: diagnosis → care plan → stats lookup → provider message.
//! The diagnosis is generated first because the care-plan and provider
//! prompts embed it. A failing step aborts the rest of that report; the
//! batch runner records the failure and moves on to the next report.

use std::fs;
use std::sync::Arc;

use chrono::Datelike;
use tracing::{debug, error, info};

use crate::analysis::prompts::{care_plan_prompt, diagnosis_prompt, provider_prompt};
use crate::analysis::stats::find_stats;
use crate::config::Config;
use crate::errors::PipelineError;
use crate::llm_client::ModelGateway;
use crate::models::report::{AnalysisResult, Report, ReportOutcome};
use crate::reports::{parse_patient_info, Sex};

pub struct Orchestrator {
    gateway: Arc<dyn ModelGateway>,
    /// Radiology reference text for the diagnosis prompt.
    radiology_context: String,
    /// Clinical care guidelines for the care-plan prompt.
    care_context: String,
}

impl Orchestrator {
    /// Loads the guideline context documents. Unreadable paths are a
    /// configuration error and fail before any report is processed.
    pub fn new(gateway: Arc<dyn ModelGateway>, config: &Config) -> Result<Self, PipelineError> {
        let radiology_context = fs::read_to_string(&config.radiology_context_path)?;
        let care_context = fs::read_to_string(&config.care_context_path)?;
        Ok(Self {
            gateway,
            radiology_context,
            care_context,
        })
    }

    #[cfg(test)]
    pub fn with_contexts(
        gateway: Arc<dyn ModelGateway>,
        radiology_context: impl Into<String>,
        care_context: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            radiology_context: radiology_context.into(),
            care_context: care_context.into(),
        }
    }

    pub async fn run(
        &self,
        report: &Report,
        patient_age: Option<u32>,
    ) -> Result<AnalysisResult, PipelineError> {
        info!("generating patient-friendly diagnosis for '{}'", report.title);
        let response = self
            .gateway
            .complete(&diagnosis_prompt(
                &self.radiology_context,
                &report.raw_text,
                patient_age,
            ))
            .await?;
        debug!("diagnosis answered by the {} backend", response.backend);
        let diagnosis = response.text;

        info!("generating evidence-based care plan");
        let care_plan = self
            .gateway
            .complete(&care_plan_prompt(&self.care_context, &diagnosis, patient_age))
            .await?
            .text;

        info!("finding age-relevant statistics");
        let stats = find_stats(self.gateway.as_ref(), &report.raw_text, patient_age).await?;

        info!("generating provider communication message");
        let provider_message = self
            .gateway
            .complete(&provider_prompt(&diagnosis, &care_plan))
            .await?
            .text;

        Ok(AnalysisResult {
            title: report.title.clone(),
            diagnosis,
            care_plan,
            stats,
            provider_message,
        })
    }

    /// Processes reports one at a time. A report's failure becomes a
    /// recorded outcome, never a crash — the batch always runs to the end.
    pub async fn run_batch(
        &self,
        reports: &[Report],
        age_override: Option<u32>,
    ) -> Vec<ReportOutcome> {
        let current_year = chrono::Local::now().year().max(0) as u32;
        let mut outcomes = Vec::with_capacity(reports.len());

        for report in reports {
            let patient = parse_patient_info(&report.raw_text, current_year);
            let age = age_override.or(patient.age);
            let sex = match patient.sex {
                Some(Sex::Male) => "male",
                Some(Sex::Female) => "female",
                None => "unknown",
            };
            info!(
                "processing '{}' ({} chars, age {}, sex {})",
                report.title,
                report.raw_text.len(),
                age.map(|a| a.to_string()).unwrap_or_else(|| "unknown".to_string()),
                sex
            );

            match self.run(report, age).await {
                Ok(result) => outcomes.push(ReportOutcome::Analyzed(result)),
                Err(e) => {
                    error!("analysis of '{}' failed: {e}", report.title);
                    outcomes.push(ReportOutcome::Failed {
                        title: report.title.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        outcomes
    }
}
