use crate::error::ApiError;
use crate::state::AppState;
use crate::web::api::middleware::AuthUser;
use axum::{extract::State, response::IntoResponse, Json};
use medimatch_common::{ApiResponse, User};
use medimatch_db::UserRepo;
use serde_json::json;
use std::sync::Arc;

/// GET /api/users - List users (requires auth)
#[tracing::instrument(skip(state, _auth))]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let users: Vec<User> = UserRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(User::from)
        .collect();

    Ok(Json(ApiResponse::ok(
        "users fetched successfully",
        json!({ "users": users }),
    )))
}
