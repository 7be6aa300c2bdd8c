//! Main application state management

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use super::{TimerRun, TimerSequence};
use crate::error::AppError;

/// Sequences listed per page
pub const PAGE_SIZE: usize = 25;

/// Run mutations exposed over the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunAction {
    Pause,
    Unpause,
    Toggle,
}

impl RunAction {
    fn name(self) -> &'static str {
        match self {
            RunAction::Pause => "pause",
            RunAction::Unpause => "unpause",
            RunAction::Toggle => "toggle",
        }
    }
}

/// One page of sequences, newest first
#[derive(Debug, Clone)]
pub struct SequencePage {
    pub items: Vec<TimerSequence>,
    pub page: usize,
    pub pages: usize,
    pub total: usize,
}

#[derive(Debug, Default)]
struct Registry {
    sequences: HashMap<Uuid, TimerSequence>,
    runs: HashMap<Uuid, TimerRun>,
}

/// Shared application state: the in-memory store plus server metadata.
///
/// Every read-modify-write on a run happens under the registry lock, so
/// two concurrent toggles can't both see the run unpaused.
#[derive(Debug)]
pub struct AppState {
    registry: Mutex<Registry>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl AppState {
    /// Create an empty store
    pub fn new(port: u16, host: String) -> Self {
        Self {
            registry: Mutex::new(Registry::default()),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    fn registry(&self) -> Result<MutexGuard<'_, Registry>, AppError> {
        self.registry
            .lock()
            .map_err(|_| AppError::LockPoisoned("registry"))
    }

    fn record_action(&self, action: &str, now: DateTime<Utc>) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some((action.to_string(), now));
        }
    }

    /// Validate and store a new sequence
    pub fn create_sequence(
        &self,
        name: &str,
        durations: Vec<Duration>,
        now: DateTime<Utc>,
    ) -> Result<TimerSequence, AppError> {
        let sequence = TimerSequence::new(name, durations, now)?;

        self.registry()?
            .sequences
            .insert(sequence.id, sequence.clone());

        info!(
            "Created sequence {} ({:?}) with {} timers",
            sequence.id,
            sequence.name,
            sequence.durations.len()
        );
        self.record_action("create-sequence", now);
        Ok(sequence)
    }

    pub fn get_sequence(&self, id: Uuid) -> Result<TimerSequence, AppError> {
        self.registry()?
            .sequences
            .get(&id)
            .cloned()
            .ok_or(AppError::SequenceNotFound(id))
    }

    /// Page through sequences, newest first. Pages are 1-based; a page past
    /// the end yields the last page, like a paginator clamping its input.
    pub fn list_sequences(&self, page: usize) -> Result<SequencePage, AppError> {
        let mut sequences: Vec<TimerSequence> =
            self.registry()?.sequences.values().cloned().collect();
        sequences.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });

        let total = sequences.len();
        let pages = total.div_ceil(PAGE_SIZE).max(1);
        let page = page.clamp(1, pages);

        let items = sequences
            .into_iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect();

        Ok(SequencePage {
            items,
            page,
            pages,
            total,
        })
    }

    /// Start a new run of a stored sequence at `now`
    pub fn start_run(&self, sequence_id: Uuid, now: DateTime<Utc>) -> Result<TimerRun, AppError> {
        let mut registry = self.registry()?;
        let sequence = registry
            .sequences
            .get(&sequence_id)
            .ok_or(AppError::SequenceNotFound(sequence_id))?;

        let run = TimerRun::start(sequence, now);
        run.projection(now)?;
        registry.runs.insert(run.id, run.clone());
        drop(registry);

        info!("Started run {} of sequence {}", run.id, sequence_id);
        self.record_action("start-run", now);
        Ok(run)
    }

    pub fn get_run(&self, id: Uuid) -> Result<TimerRun, AppError> {
        self.registry()?
            .runs
            .get(&id)
            .cloned()
            .ok_or(AppError::RunNotFound(id))
    }

    /// Apply a pause action to a run as a single atomic update.
    ///
    /// `clock` is read once the registry lock is held, so updates land in
    /// the same order as their instants. Returns the run and that instant.
    pub fn update_run<C>(
        &self,
        id: Uuid,
        action: RunAction,
        clock: C,
    ) -> Result<(TimerRun, DateTime<Utc>), AppError>
    where
        C: FnOnce() -> DateTime<Utc>,
    {
        let mut registry = self.registry()?;
        let now = clock();
        let run = registry.runs.get_mut(&id).ok_or(AppError::RunNotFound(id))?;

        match action {
            RunAction::Pause => run.pause(now)?,
            RunAction::Unpause => run.unpause(now)?,
            RunAction::Toggle => run.toggle(now)?,
        }
        let updated = run.clone();
        drop(registry);

        debug!(
            "Applied {} to run {}, paused={}",
            action.name(),
            id,
            updated.is_paused()
        );
        self.record_action(action.name(), now);
        Ok((updated, now))
    }

    /// Drop every run that ended at or before `now`
    pub fn purge_ended_runs(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        let mut registry = self.registry()?;
        let before = registry.runs.len();
        registry.runs.retain(|_, run| !run.is_ended(now));
        let removed = before - registry.runs.len();

        if removed > 0 {
            debug!("Purged {} ended runs", removed);
        }
        Ok(removed)
    }

    /// Number of stored sequences and runs
    pub fn counts(&self) -> Result<(usize, usize), AppError> {
        let registry = self.registry()?;
        Ok((registry.sequences.len(), registry.runs.len()))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> Option<(String, DateTime<Utc>)> {
        self.last_action.lock().ok().and_then(|a| a.clone())
    }
}
