use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::exam::engine;
use crate::models::{ExamResult, Question, SubmitRequest};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct QuestionsQuery {
    #[serde(default)]
    pub email: Option<String>,
}

/// GET /api/questions/:section?email=
pub async fn handle_get_questions(
    State(state): State<AppState>,
    Path(section): Path<String>,
    Query(params): Query<QuestionsQuery>,
) -> Result<Json<Vec<Question>>, AppError> {
    let email = params.email.unwrap_or_default();
    let questions = engine::deliver_questions(&state.store, &section, &email)?;
    Ok(Json(questions))
}

/// POST /api/result/submit
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<ExamResult>, AppError> {
    let result = engine::submit(&state.store, &req.candidate_email, &req.answers)?;
    Ok(Json(result))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSearchQuery {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub min_percentage: Option<f64>,
}

/// GET /api/result/search?email=&minPercentage=
pub async fn handle_search_results(
    State(state): State<AppState>,
    Query(params): Query<ResultSearchQuery>,
) -> Json<Vec<ExamResult>> {
    Json(engine::search_results(
        &state.store,
        params.email.as_deref(),
        params.min_percentage,
    ))
}

/// GET /api/result/email/:email
pub async fn handle_result_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ExamResult>, AppError> {
    let result = engine::result_by_email(&state.store, &email)?;
    Ok(Json(result))
}
