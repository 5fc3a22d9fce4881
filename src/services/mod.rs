//! Service layer for business logic operations.
//!
//! Services encapsulate lifecycle rules and coordinate between
//! repositories and callers.

mod batch_tracker;
mod event_log;
mod probe;
mod result_recorder;
mod runner;
mod session_tracker;


pub use batch_tracker::BatchTracker;
pub use event_log::EventLog;
pub use probe::ConnectivityProbe;
pub use result_recorder::{ResultRecorder, ResultSummary, summarize};
pub use runner::{BatchOutcome, BatchRunner, CheckContext, IndicatorCheck};
pub use session_tracker::{SessionGuard, SessionTracker};

use crate::repositories::Repositories;

/// Aggregates the lifecycle services for convenient access.
///
/// Cloning is cheap since the underlying pool uses `Arc` internally.
/// [`ConnectivityProbe`] is not part of the aggregate; it additionally
/// needs a credential store and an ODBC driver and is wired explicitly.
#[derive(Clone)]
pub struct Services {
    pub batches: BatchTracker,
    pub sessions: SessionTracker,
    pub recorder: ResultRecorder,
    pub events: EventLog,
    pub runner: BatchRunner,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        let batches = BatchTracker::new(repos.batches, repos.batch_owners);
        let sessions = SessionTracker::new(repos.sessions);
        let recorder = ResultRecorder::new(repos.results);
        let events = EventLog::new(repos.events);
        let runner = BatchRunner::new(
            batches.clone(),
            sessions.clone(),
            repos.indicators,
            recorder.clone(),
            events.clone(),
        );

        Self {
            batches,
            sessions,
            recorder,
            events,
            runner,
        }
    }
}
