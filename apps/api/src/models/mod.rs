mod candidate;
mod question;
mod result;

pub use candidate::Candidate;
pub use question::Question;
pub use result::{ExamResult, QuestionId, SubmitRequest, SubmittedAnswer};

/// Next sequential id for a collection: one past the highest existing id,
/// so ids stay unique even if earlier records were removed out-of-band.
pub(crate) fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().unwrap_or(0) + 1
}
