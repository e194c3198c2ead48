pub mod auth;
pub mod doctors;
pub mod middleware;
pub mod recommendations;
pub mod users;

use crate::state::AppState;
use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

pub fn build_api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Auth routes
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/auth/update-username", patch(auth::update_username))
        .route("/auth/change-password", patch(auth::change_password))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password", post(auth::reset_password))
        // Doctor directory
        .route("/doctors", get(doctors::list_doctors))
        .route("/doctors/{id}", get(doctors::get_doctor))
        // Recommendations
        .route(
            "/ai-recommendations",
            post(recommendations::get_recommendations),
        )
        // User listing
        .route("/users", get(users::list_users))
        .with_state(state)
}
