//! All prompt templates for the analysis pipeline.
//!
//! Templates are fixed format strings with named placeholders, filled by
//! pure substitution. Report text is inserted verbatim — it is treated as
//! opaque data, not sanitized.

/// Patient-friendly diagnosis. Replace `{age_context}`, `{context}`, `{report}`.
pub const DIAGNOSIS_PROMPT_TEMPLATE: &str = "\
Please analyze this radiology report and provide a patient-friendly explanation of the findings.{age_context}

Context: {context}

Report: {report}

Please provide:
1. A clear explanation of what was found
2. What these findings mean in everyday terms
3. How common these conditions are (especially for the patient's age if provided)
4. General guidance on next steps

Keep the response under 1000 characters and use a compassionate, reassuring tone.";

/// Care plan, informed by the generated diagnosis and clinical guidelines.
/// Replace `{age_context}`, `{context}`, `{diagnosis}`.
pub const CARE_PLAN_PROMPT_TEMPLATE: &str = "\
Based on this diagnosis, please provide evidence-based treatment recommendations{age_context}.

Use the following clinical guidelines to inform your recommendations.

Guidelines: {context}

Diagnosis: {diagnosis}

Please provide:
1. Conservative treatment options (physical therapy, lifestyle changes)
2. Medical interventions if needed
3. When to seek immediate medical attention
4. Expected timeline for improvement
5. Cost and invasiveness considerations

Focus on patient-centered, accessible language and prioritize less invasive options first.";

/// Provider portal message. Replace `{diagnosis}`, `{care_plan}`.
pub const PROVIDER_PROMPT_TEMPLATE: &str = "\
Use the following information to help a provider write a portal message to a patient that helps them understand a recent radiology report and what options are available for care.

# Diagnosis
{diagnosis}

# Care Plan
{care_plan}

Instructions:
- Please be empathetic and friendly in your disposition and explain things in simple terminology.
- The goal of this message is to alleviate concerns, explain findings and set up the discussion in the follow-up visit so that the provider and patient can use shared decision to determine the next steps in treatment.";

/// Diagnosis-list classification. Replace `{diagnosis_list}`, `{report}`.
pub const STATS_PROMPT_TEMPLATE: &str = "\
Identify if the report presented diagnoses one of the following diagnosis : {diagnosis_list}.

Return NO DIAGNOSIS if there is no diagnosis that matches this list {diagnosis_list}

Here is the report
{report}";

/// Age-group percentage lookup over the static table. Replace `{data}`, `{report}`.
pub const AGE_STATS_PROMPT_TEMPLATE: &str = "\
If there is a matching diagnosis, return the percentage corresponding to the persons age group.
This information might be relevant for your answer.
{data}

This is the persons report:
{report}

Instructions:
- Don't return more than one percentage.
- If there is no matching diagnosis return nothing.";

pub fn diagnosis_prompt(context: &str, report: &str, age: Option<u32>) -> String {
    DIAGNOSIS_PROMPT_TEMPLATE
        .replace("{age_context}", &patient_age_sentence(age))
        .replace("{context}", context)
        .replace("{report}", report)
}

pub fn care_plan_prompt(context: &str, diagnosis: &str, age: Option<u32>) -> String {
    let age_context = match age {
        Some(age) => format!(" for a {age}-year-old patient"),
        None => String::new(),
    };
    CARE_PLAN_PROMPT_TEMPLATE
        .replace("{age_context}", &age_context)
        .replace("{context}", context)
        .replace("{diagnosis}", diagnosis)
}

pub fn provider_prompt(diagnosis: &str, care_plan: &str) -> String {
    PROVIDER_PROMPT_TEMPLATE
        .replace("{diagnosis}", diagnosis)
        .replace("{care_plan}", care_plan)
}

pub fn stats_prompt(diagnosis_list: &str, report: &str) -> String {
    STATS_PROMPT_TEMPLATE
        .replace("{diagnosis_list}", diagnosis_list)
        .replace("{report}", report)
}

pub fn age_stats_prompt(data: &str, report: &str) -> String {
    AGE_STATS_PROMPT_TEMPLATE
        .replace("{data}", data)
        .replace("{report}", report)
}

fn patient_age_sentence(age: Option<u32>) -> String {
    match age {
        Some(age) => format!(" The patient is {age} years old."),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnosis_prompt_embeds_context_and_report() {
        let prompt = diagnosis_prompt("guideline text", "FINDINGS: disc bulge", None);
        assert!(prompt.contains("Context: guideline text"));
        assert!(prompt.contains("Report: FINDINGS: disc bulge"));
        assert!(!prompt.contains("{age_context}"));
        assert!(!prompt.contains("years old"));
    }

    #[test]
    fn test_diagnosis_prompt_includes_age_sentence_when_known() {
        let prompt = diagnosis_prompt("ctx", "report", Some(57));
        assert!(prompt.contains("The patient is 57 years old."));
    }

    #[test]
    fn test_care_plan_prompt_is_diagnosis_informed() {
        let prompt = care_plan_prompt("acp guidelines", "mild degenerative changes", Some(45));
        assert!(prompt.contains("Diagnosis: mild degenerative changes"));
        assert!(prompt.contains("Guidelines: acp guidelines"));
        assert!(prompt.contains("for a 45-year-old patient"));
    }

    #[test]
    fn test_provider_prompt_embeds_both_sections() {
        let prompt = provider_prompt("the diagnosis", "the care plan");
        assert!(prompt.contains("# Diagnosis\nthe diagnosis"));
        assert!(prompt.contains("# Care Plan\nthe care plan"));
    }

    #[test]
    fn test_stats_prompt_repeats_diagnosis_list() {
        let prompt = stats_prompt("Spinal Stenosis,Disc Herniation", "the report");
        assert_eq!(prompt.matches("Spinal Stenosis,Disc Herniation").count(), 2);
        assert!(prompt.contains("Here is the report\nthe report"));
    }

    #[test]
    fn test_report_text_is_inserted_verbatim() {
        // Braces and markdown in the report must survive substitution.
        let tricky = "Body with {placeholder} braces and ``` fences";
        let prompt = stats_prompt("X", tricky);
        assert!(prompt.contains(tricky));
    }

    #[test]
    fn test_no_unfilled_placeholders_remain() {
        for prompt in [
            diagnosis_prompt("c", "r", Some(1)),
            care_plan_prompt("c", "d", None),
            provider_prompt("d", "p"),
            stats_prompt("l", "r"),
            age_stats_prompt("{}", "r"),
        ] {
            assert!(!prompt.contains("{context}"), "unfilled: {prompt}");
            assert!(!prompt.contains("{report}"), "unfilled: {prompt}");
            assert!(!prompt.contains("{diagnosis}"), "unfilled: {prompt}");
            assert!(!prompt.contains("{care_plan}"), "unfilled: {prompt}");
            assert!(!prompt.contains("{age_context}"), "unfilled: {prompt}");
            assert!(!prompt.contains("{diagnosis_list}"), "unfilled: {prompt}");
            assert!(!prompt.contains("{data}"), "unfilled: {prompt}");
        }
    }
}
