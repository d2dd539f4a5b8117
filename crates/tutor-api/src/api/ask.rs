//! JSON question endpoint

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use tutor_core::Answer;

use super::ApiState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub response: Answer,
}

/// Handler to answer a question.
/// POST /ask
pub async fn ask(
    State(state): State<ApiState>,
    Json(request): Json<AskRequest>,
) -> Json<AskResponse> {
    info!("Question received via /ask");
    let response = state.tutor.handle_query(&request.query).await;
    Json(AskResponse { response })
}

/// Handler for the health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn ask_routes(state: ApiState) -> Router {
    Router::new()
        .route("/ask", post(ask))
        .route("/health", get(health_check))
        .with_state(state)
}
