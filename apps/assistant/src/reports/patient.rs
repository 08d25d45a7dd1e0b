//! Patient demographics parsed out of raw report text.
//!
//! Radiology reports usually carry an `Age  Sex` header table; older ones
//! only a date of birth. Absence of either is not an error — age-aware
//! prompts simply omit the age sentence.

use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatientInfo {
    pub age: Option<u32>,
    pub sex: Option<Sex>,
}

static AGE_SEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Age\s+Sex\n.*?\s+(\d+)\s+(Male|Female)").expect("valid regex"));

static DOB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Date of Birth.*?(\d{4})").expect("valid regex"));

pub fn parse_patient_info(report_text: &str, current_year: u32) -> PatientInfo {
    if let Some(caps) = AGE_SEX_RE.captures(report_text) {
        let age = caps.get(1).and_then(|m| m.as_str().parse().ok());
        let sex = caps.get(2).map(|m| match m.as_str() {
            "Male" => Sex::Male,
            _ => Sex::Female,
        });
        return PatientInfo { age, sex };
    }

    if let Some(caps) = DOB_RE.captures(report_text) {
        let age = caps
            .get(1)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .and_then(|birth_year| current_year.checked_sub(birth_year));
        return PatientInfo { age, sex: None };
    }

    PatientInfo::default()
}
