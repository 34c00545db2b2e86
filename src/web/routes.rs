use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::web::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Submission form
        .route("/", get(handlers::form_page))
        .route("/screen", post(handlers::screen_form))
        // Programmatic API
        .route("/api/screen", post(handlers::screen_json))
        .route("/api/health", get(handlers::health))
        .route("/api/metrics", get(handlers::metrics_snapshot))
        .with_state(state)
        .layer(cors)
}
