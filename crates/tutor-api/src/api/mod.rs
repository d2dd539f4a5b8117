//! HTTP routes for the tutor

pub mod ask;
pub mod page;

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tutor_core::TutorAgent;

/// Shared state for all endpoints
#[derive(Clone)]
pub struct ApiState {
    pub tutor: Arc<TutorAgent>,
}

/// Build the full application router
pub fn router(tutor: Arc<TutorAgent>) -> Router {
    let state = ApiState { tutor };

    Router::new()
        .merge(ask::ask_routes(state.clone()))
        .merge(page::page_routes(state))
        .layer(TraceLayer::new_for_http())
}
