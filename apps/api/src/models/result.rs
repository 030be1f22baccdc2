use serde::{Deserialize, Serialize};

use crate::store::Record;

/// The scored outcome of one candidate's exam. At most one exists per
/// candidate email; immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResult {
    pub id: u64,
    /// Natural key: uniqueness is enforced case-insensitively at submission.
    pub candidate_email: String,
    pub aptitude_correct: u32,
    pub reasoning_correct: u32,
    pub communication_correct: u32,
    /// Always the sum of the three section counts.
    pub total_correct: u32,
    /// `total_correct / 60 * 100`, rounded to two decimal places.
    pub percentage: f64,
}

impl Record for ExamResult {
    const FILE_STEM: &'static str = "results";
}

/// Body of `POST /api/result/submit`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub candidate_email: String,
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: QuestionId,
    pub selected_option: String,
}

/// Question ids arrive as JSON numbers or strings depending on the client;
/// both compare against the numeric `Question::id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(u64),
    Text(String),
}

impl QuestionId {
    pub fn matches(&self, id: u64) -> bool {
        match self {
            QuestionId::Number(n) => *n == id,
            QuestionId::Text(s) => *s == id.to_string(),
        }
    }
}
