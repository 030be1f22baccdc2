pub mod health;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::candidates::handlers as candidates;
use crate::exam::handlers as exam;
use crate::state::AppState;

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Route not found" })))
}

/// GET /
/// Top-level index of the available endpoints.
async fn api_index() -> Json<Value> {
    Json(json!({
        "name": "Online Exam JSON API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "candidate": {
                "register": "POST /api/candidate/register",
                "getAllCandidates": "GET /api/candidate/all",
                "getResume": "GET /api/candidate/resume/:name"
            },
            "exam": {
                "getQuestions": "GET /api/questions/:section?email=user@example.com",
                "submitExam": "POST /api/result/submit",
                "searchResults": "GET /api/result/search?email=...&minPercentage=...",
                "getResultByEmail": "GET /api/result/email/:email"
            },
            "health": "GET /api/health"
        }
    }))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api_index))
        .route("/api/health", get(health::health_handler))
        // Candidate API
        .route("/api/candidate/register", post(candidates::handle_register))
        .route("/api/candidate/all", get(candidates::handle_list_candidates))
        .route(
            "/api/candidate/resume/:name",
            get(candidates::handle_get_resume),
        )
        // Exam API
        .route("/api/questions/:section", get(exam::handle_get_questions))
        .route("/api/result/submit", post(exam::handle_submit))
        .route("/api/result/search", get(exam::handle_search_results))
        .route("/api/result/email/:email", get(exam::handle_result_by_email))
        .fallback(not_found)
        .with_state(state)
}
