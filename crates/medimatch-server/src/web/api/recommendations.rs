use crate::error::ApiError;
use crate::matcher;
use crate::state::AppState;
use crate::web::api::middleware::ValidatedJson;
use axum::{extract::State, response::IntoResponse, Json};
use medimatch_common::{ApiResponse, Doctor, Severity};
use medimatch_db::DoctorRepo;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(default)]
    pub symptoms: String,
    pub severity: Option<Severity>,
    // Accepted for API compatibility; the matcher does not use them
    pub duration: Option<String>,
    pub medical_history: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
}

/// POST /api/ai-recommendations - Rank doctors against described symptoms
#[tracing::instrument(skip(state, req))]
pub async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RecommendationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.symptoms.trim().is_empty() {
        return Err(ApiError::bad_request("Symptoms description is required"));
    }

    let doctors: Vec<Doctor> = DoctorRepo::list_active(&state.pool)
        .await?
        .into_iter()
        .map(Doctor::from)
        .collect();

    let recommended = matcher::recommend(&doctors, &req.symptoms, req.severity);

    Ok(Json(ApiResponse::ok(
        "Recommendations generated successfully",
        recommended,
    )))
}
