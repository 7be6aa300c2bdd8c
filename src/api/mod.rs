//! HTTP API module
//! 
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/sequences",
            get(list_sequences_handler).post(create_sequence_handler),
        )
        .route("/sequences/:id", get(get_sequence_handler))
        .route("/sequences/:id/runs", post(start_run_handler))
        .route("/runs/:id", get(get_run_handler))
        .route("/runs/:id/pause", post(pause_run_handler))
        .route("/runs/:id/unpause", post(unpause_run_handler))
        .route("/runs/:id/toggle", post(toggle_run_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
