use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::{Form, Json};
use serde::Serialize;

use crate::error::ScreenError;
use crate::metrics::MetricsSnapshot;
use crate::types::transaction::TransactionForm;
use crate::types::verdict::ScreeningReport;
use crate::web::{pages, state::AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub version: String,
    pub uptime_secs: i64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// GET / -- the submission form
pub async fn form_page() -> Html<String> {
    Html(pages::render_form())
}

/// POST /screen -- form submission, renders the verdict banner
pub async fn screen_form(
    State(state): State<AppState>,
    Form(form): Form<TransactionForm>,
) -> Html<String> {
    match state.service.screen(&form) {
        Ok(report) => Html(pages::render_result(&report)),
        Err(e) => Html(pages::render_error(&e)),
    }
}

/// POST /api/screen -- JSON screening for programmatic callers
pub async fn screen_json(
    State(state): State<AppState>,
    Json(form): Json<TransactionForm>,
) -> Result<Json<ScreeningReport>, (StatusCode, Json<ErrorResponse>)> {
    match state.service.screen(&form) {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            let status = match &e {
                ScreenError::Encode(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ScreenError::Inference(_) => StatusCode::BAD_GATEWAY,
            };
            Err((status, Json(ErrorResponse { error: e.to_string() })))
        }
    }
}

/// GET /api/health -- lightweight liveness probe
///
/// The classifier is loaded before the server starts accepting requests,
/// so a serving process always reports it as loaded.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: "loaded".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_seconds(),
    })
}

/// GET /api/metrics -- screening counters and latency stats
pub async fn metrics_snapshot(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
