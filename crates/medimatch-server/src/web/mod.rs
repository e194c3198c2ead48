pub mod api;

use crate::error::ApiError;
use crate::state::AppState;
use axum::http::{Method, Uri};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

async fn health() -> &'static str {
    "Medimatch API is working fine!"
}

async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::not_found(format!("Route {method} {uri} not found"))
}

pub fn build_router(state: AppState) -> Router {
    let state = Arc::new(state);

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health))
        .nest("/api", api::build_api_routes(state))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
