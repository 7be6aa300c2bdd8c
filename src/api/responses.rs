//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    state::{SequencePage, TimerRun, TimerSequence},
    timeline::{RunProjection, RunState},
    utils::{format_duration, to_millis},
};

/// Body of POST /sequences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSequenceRequest {
    pub name: String,
    /// Each entry is `H:M:S`, `M:S` or `S`
    pub durations: Vec<String>,
}

/// Query string of GET /sequences
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<usize>,
}

/// Projection of a run, durations in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub state: RunState,
    pub remaining_time: i64,
    pub total_remaining_time: i64,
    pub current_timer: Option<i64>,
    pub past_timers: Vec<i64>,
    pub future_timers: Vec<i64>,
    pub remaining_degrees: f64,
    pub ends_at: Option<DateTime<Utc>>,
}

impl From<&RunProjection> for ProjectionResponse {
    fn from(projection: &RunProjection) -> Self {
        Self {
            state: projection.state,
            remaining_time: to_millis(projection.remaining_time),
            total_remaining_time: to_millis(projection.total_remaining_time),
            current_timer: projection.current_timer.map(to_millis),
            past_timers: projection.past_timers.iter().copied().map(to_millis).collect(),
            future_timers: projection.future_timers.iter().copied().map(to_millis).collect(),
            remaining_degrees: projection.remaining_degrees(),
            ends_at: projection.ends_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResponse {
    pub id: Uuid,
    pub sequence_id: Uuid,
    pub sequence_name: String,
    pub started_at: DateTime<Utc>,
    pub timers: Vec<String>,
    pub projection: ProjectionResponse,
}

impl RunResponse {
    pub fn new(run: &TimerRun, projection: &RunProjection) -> Self {
        Self {
            id: run.id,
            sequence_id: run.sequence_id,
            sequence_name: run.sequence_name.clone(),
            started_at: run.started_at,
            timers: run.durations.iter().copied().map(format_duration).collect(),
            projection: projection.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Formatted for display
    pub timers: Vec<String>,
    pub durations_ms: Vec<i64>,
    pub total_duration_ms: i64,
}

impl From<&TimerSequence> for SequenceResponse {
    fn from(sequence: &TimerSequence) -> Self {
        Self {
            id: sequence.id,
            name: sequence.name.clone(),
            created_at: sequence.created_at,
            timers: sequence.durations.iter().copied().map(format_duration).collect(),
            durations_ms: sequence.durations.iter().copied().map(to_millis).collect(),
            total_duration_ms: to_millis(sequence.total_duration()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceListResponse {
    pub items: Vec<SequenceResponse>,
    pub page: usize,
    pub pages: usize,
    pub total: usize,
}

impl From<&SequencePage> for SequenceListResponse {
    fn from(page: &SequencePage) -> Self {
        Self {
            items: page.items.iter().map(SequenceResponse::from).collect(),
            page: page.page,
            pages: page.pages,
            total: page.total,
        }
    }
}

/// Server status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub sequences: usize,
    pub runs: usize,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok(now: DateTime<Utc>) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: now,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
