//! Sequence Timers - pausable timer sequences over a small JSON API
//! 
//! The `timeline` module is the projection engine: it lays a run's timers
//! out on the wall clock around its pauses and reports where the run stands
//! at any instant. The rest is the service around it: an in-memory store,
//! HTTP handlers and a cleanup task.

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod tasks;
pub mod timeline;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::AppError;
pub use state::AppState;
pub use timeline::{project, PausableSchedule, Pause, Period, RunProjection, RunState};
pub use utils::signals::shutdown_signal;
