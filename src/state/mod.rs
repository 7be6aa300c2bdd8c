//! State management module
//! 
//! Timer sequences, their runs, and the in-memory store that owns both.

pub mod app_state;
pub mod run;
pub mod sequence;

// Re-export main types
pub use app_state::{AppState, RunAction, SequencePage, PAGE_SIZE};
pub use run::{RunError, TimerRun};
pub use sequence::{SequenceError, TimerSequence};
