//! HTTP endpoint handlers
//!
//! Each handler reads the wall clock once and hands that instant down, so
//! the projection engine never looks at the clock itself. Run updates pass
//! the clock in, and the store reads it while holding its lock.

use std::sync::Arc;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Duration, Utc};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::AppError,
    state::{AppState, RunAction, TimerRun},
    utils::parse_duration,
};
use super::responses::{
    CreateSequenceRequest, HealthResponse, ListQuery, RunResponse, SequenceListResponse,
    SequenceResponse, StatusResponse,
};

fn run_response(run: &TimerRun, now: DateTime<Utc>) -> Result<Json<RunResponse>, AppError> {
    let projection = run.projection(now)?;
    Ok(Json(RunResponse::new(run, &projection)))
}

/// Handle GET /sequences - List stored sequences
pub async fn list_sequences_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<SequenceListResponse>, AppError> {
    let page = state.list_sequences(query.page.unwrap_or(1))?;
    Ok(Json(SequenceListResponse::from(&page)))
}

/// Handle POST /sequences - Create a sequence from formatted durations
pub async fn create_sequence_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateSequenceRequest>,
) -> Result<(StatusCode, Json<SequenceResponse>), AppError> {
    let durations = request
        .durations
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            parse_duration(raw).map_err(|source| AppError::InvalidDuration {
                position: index + 1,
                source,
            })
        })
        .collect::<Result<Vec<Duration>, _>>()?;

    let sequence = state.create_sequence(&request.name, durations, Utc::now())?;
    info!("Timer sequence \"{}\" created successfully", sequence.name);

    Ok((StatusCode::CREATED, Json(SequenceResponse::from(&sequence))))
}

/// Handle GET /sequences/:id
pub async fn get_sequence_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SequenceResponse>, AppError> {
    let sequence = state.get_sequence(id)?;
    Ok(Json(SequenceResponse::from(&sequence)))
}

/// Handle POST /sequences/:id/runs - Start a run now
pub async fn start_run_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<RunResponse>), AppError> {
    let now = Utc::now();
    let run = state.start_run(id, now)?;
    Ok((StatusCode::CREATED, run_response(&run, now)?))
}

/// Handle GET /runs/:id - Project a run onto the current instant
pub async fn get_run_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RunResponse>, AppError> {
    let run = state.get_run(id)?;
    run_response(&run, Utc::now())
}

fn apply(state: &AppState, id: Uuid, action: RunAction) -> Result<Json<RunResponse>, AppError> {
    let (run, now) = state.update_run(id, action, Utc::now)?;
    run_response(&run, now)
}

/// Handle POST /runs/:id/pause
pub async fn pause_run_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RunResponse>, AppError> {
    apply(&state, id, RunAction::Pause)
}

/// Handle POST /runs/:id/unpause
pub async fn unpause_run_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RunResponse>, AppError> {
    apply(&state, id, RunAction::Unpause)
}

/// Handle POST /runs/:id/toggle
pub async fn toggle_run_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RunResponse>, AppError> {
    apply(&state, id, RunAction::Toggle)
}

/// Handle GET /status - Return current server status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, AppError> {
    let (sequences, runs) = state.counts()?;
    let (last_action, last_action_time) = state.get_last_action().unzip();

    Ok(Json(StatusResponse {
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        sequences,
        runs,
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok(Utc::now()))
}
