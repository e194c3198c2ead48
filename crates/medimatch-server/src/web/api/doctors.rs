use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use medimatch_common::{ApiResponse, Doctor};
use medimatch_db::DoctorRepo;
use std::sync::Arc;
use uuid::Uuid;

/// GET /api/doctors - Active doctors, best-rated first
#[tracing::instrument(skip(state))]
pub async fn list_doctors(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let doctors: Vec<Doctor> = DoctorRepo::list_active(&state.pool)
        .await?
        .into_iter()
        .map(Doctor::from)
        .collect();

    Ok(Json(ApiResponse::ok("Doctors fetched successfully", doctors)))
}

/// GET /api/doctors/{id} - Single doctor profile; bumps the view counter
#[tracing::instrument(skip(state))]
pub async fn get_doctor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let doctor_id: Uuid = id
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid doctor ID format"))?;

    let mut row = DoctorRepo::get(&state.pool, doctor_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Doctor not found"))?;

    if !row.is_active {
        return Err(ApiError::not_found("Doctor profile is not available"));
    }

    DoctorRepo::increment_views(&state.pool, doctor_id).await?;
    row.views += 1;

    Ok(Json(ApiResponse::ok(
        "Doctor details fetched successfully",
        Doctor::from(row),
    )))
}
