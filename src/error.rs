//! Application-level errors and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

use crate::{
    state::{RunError, SequenceError},
    timeline::TimelineError,
    utils::DurationParseError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("sequence {0} not found")]
    SequenceNotFound(Uuid),

    #[error("run {0} not found")]
    RunNotFound(Uuid),

    #[error("invalid timer {position}: {source}")]
    InvalidDuration {
        position: usize,
        #[source]
        source: DurationParseError,
    },

    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error("failed to project run: {0}")]
    Projection(#[from] TimelineError),

    #[error("failed to lock {0}")]
    LockPoisoned(&'static str),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::SequenceNotFound(_) | AppError::RunNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidDuration { .. } | AppError::Sequence(_) => StatusCode::BAD_REQUEST,
            AppError::Run(RunError::Timeline(_)) => StatusCode::BAD_REQUEST,
            AppError::Run(_) => StatusCode::CONFLICT,
            AppError::Projection(_) | AppError::LockPoisoned(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
