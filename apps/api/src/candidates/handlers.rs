use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::candidates::register::{register, RegistrationForm, ResumeUpload};
use crate::errors::AppError;
use crate::models::Candidate;
use crate::state::AppState;

/// POST /api/candidate/register
/// Multipart form: text fields plus an optional `resume` file part.
pub async fn handle_register(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Candidate>, AppError> {
    let mut form = RegistrationForm::default();
    let mut resume = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "resume" {
            let file_name = field.file_name().unwrap_or("resume").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read resume upload: {e}")))?;
            resume = Some(ResumeUpload { file_name, bytes });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read field {name}: {e}")))?;
        match name.as_str() {
            "name" => form.name = value,
            "email" => form.email = value,
            "phone" => form.phone = value,
            "college" => form.college = value,
            "branch" => form.branch = value,
            "gender" => form.gender = value,
            // Junk backlog counts fall back to 0 rather than failing the form.
            "backlogs" => form.backlogs = value.trim().parse().unwrap_or(0),
            _ => {}
        }
    }

    let candidate = register(&state.store, form, resume)?;
    Ok(Json(candidate))
}

/// GET /api/candidate/all
pub async fn handle_list_candidates(State(state): State<AppState>) -> Json<Vec<Candidate>> {
    Json(state.store.load::<Candidate>())
}

/// GET /api/candidate/resume/:name
/// Streams back a stored resume blob by its stored name.
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = state
        .store
        .load_resume(&name)
        .ok_or_else(|| AppError::NotFound(format!("Resume {name} not found")))?;
    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        bytes,
    ))
}
