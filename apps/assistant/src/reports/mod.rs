// Turns a combined markdown document back into discrete report records and
// pulls patient demographics out of report text.

pub mod patient;
pub mod splitter;

pub use patient::{parse_patient_info, PatientInfo, Sex};
pub use splitter::split;
