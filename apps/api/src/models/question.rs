use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A multiple-choice exam question. Read-only reference data seeded
/// out-of-band into `questions.json`; the engine never writes it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u64,
    /// Free-text section label (e.g. "Aptitude"), compared
    /// case-insensitively wherever it is used.
    pub section: String,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    /// Label of the correct option ("A".."D" in practice).
    pub correct_option: String,
}

impl Record for Question {
    const FILE_STEM: &'static str = "questions";
}
