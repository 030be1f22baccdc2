//! Candidate registration: duplicate-email guard, optional resume blob,
//! append to the roster.

use bytes::Bytes;

use crate::errors::AppError;
use crate::models::{next_id, Candidate};
use crate::store::JsonStore;

/// Everything a registration submits apart from the resume bytes.
#[derive(Debug, Default, Clone)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub branch: String,
    pub gender: String,
    pub backlogs: u32,
}

/// An uploaded resume file, still under its client-supplied name.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Registers a new candidate.
///
/// Email is required and must be unique across the roster
/// (case-insensitive). The duplicate check, the resume blob write, and the
/// append all run under the candidates-collection lock; the blob is written
/// after the check so a rejected registration leaves no orphan behind. If
/// the blob write fails, registration still succeeds without a resume.
pub fn register(
    store: &JsonStore,
    form: RegistrationForm,
    resume: Option<ResumeUpload>,
) -> Result<Candidate, AppError> {
    let email = form.email.trim().to_string();
    if email.is_empty() {
        return Err(AppError::Validation("Email is required".into()));
    }
    let lowered = email.to_lowercase();

    store.update(move |candidates: &mut Vec<Candidate>| {
        if candidates
            .iter()
            .any(|c| c.email.to_lowercase() == lowered)
        {
            return Err(AppError::Conflict("Email already registered!".into()));
        }

        let resume_name =
            resume.and_then(|upload| store.save_resume(&upload.bytes, &upload.file_name));

        let candidate = Candidate {
            id: next_id(candidates.iter().map(|c| c.id)),
            name: form.name,
            email,
            phone: form.phone,
            college: form.college,
            branch: form.branch,
            gender: form.gender,
            backlogs: form.backlogs,
            resume_name,
        };
        candidates.push(candidate.clone());
        Ok(candidate)
    })
}
