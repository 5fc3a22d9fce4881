//! Session lifecycle service.
//!
//! A session is one execution of one indicator inside a batch. Its state
//! machine mirrors the batch: Started, then exactly one of Stopped or
//! Failed. `SessionGuard` gives callers scoped acquisition, so a session
//! is closed on every exit path even when the check logic panics or
//! returns early.

use tracing::{error, info};

use crate::error::{AppError, AppResult};
use crate::models::{RunStatus, Session};
use crate::repositories::SessionRepository;

#[derive(Clone)]
pub struct SessionTracker {
    sessions: SessionRepository,
}

impl SessionTracker {
    pub fn new(sessions: SessionRepository) -> Self {
        Self { sessions }
    }

    /// Opens a session for the indicator within the batch.
    ///
    /// The batch and indicator must exist; the store's foreign keys reject
    /// the insert otherwise.
    pub fn start(&self, batch_id: i32, indicator_id: i32) -> AppResult<Session> {
        let session = self
            .sessions
            .create(batch_id, indicator_id, RunStatus::Started)?;

        info!(
            session_id = session.id,
            batch_id, indicator_id, "Session started"
        );
        Ok(session)
    }

    /// Opens a session and hands back a guard that closes it on drop.
    ///
    /// Call `complete` on the guard to stop the session; a guard dropped
    /// without completing marks its session Failed.
    pub fn start_guarded(&self, batch_id: i32, indicator_id: i32) -> AppResult<SessionGuard> {
        let session = self.start(batch_id, indicator_id)?;
        Ok(SessionGuard {
            tracker: self.clone(),
            session,
            finished: false,
        })
    }

    /// Closes the most recent session of the indicator within the batch as
    /// successfully completed.
    pub fn stop(&self, batch_id: i32, indicator_id: i32) -> AppResult<Session> {
        let session_id = self.active_session_id(batch_id, indicator_id)?;
        self.finish_by_id(session_id, RunStatus::Stopped)
    }

    /// Closes the most recent session of the indicator within the batch as
    /// failed.
    pub fn fail(&self, batch_id: i32, indicator_id: i32) -> AppResult<Session> {
        let session_id = self.active_session_id(batch_id, indicator_id)?;
        self.finish_by_id(session_id, RunStatus::Failed)
    }

    fn active_session_id(&self, batch_id: i32, indicator_id: i32) -> AppResult<i32> {
        let latest = self
            .sessions
            .latest_for_indicator(batch_id, indicator_id)?
            .ok_or(AppError::NoActiveSession {
                batch_id,
                indicator_id,
            })?;
        Ok(latest.id)
    }

    fn finish_by_id(&self, session_id: i32, target: RunStatus) -> AppResult<Session> {
        let session = self.sessions.get_by_id(session_id)?;

        let current = RunStatus::from_id(session.status_id).ok_or_else(|| AppError::Internal {
            source: anyhow::anyhow!(
                "session {} carries unknown status id {}",
                session.id,
                session.status_id
            ),
        })?;

        if !current.can_transition_to(target) {
            return Err(AppError::InvalidTransition {
                entity: "Session".to_string(),
                from: current.to_string(),
                to: target.to_string(),
            });
        }

        let updated = self.sessions.update_status(session.id, target)?;
        info!(session_id = updated.id, status = %target, "Session closed");
        Ok(updated)
    }
}

/// Scoped handle on an open session.
///
/// Holds the session row as created; `complete` consumes the guard and
/// stops the session. Dropping an unfinished guard fails the session and
/// only logs a write error, since drop must not panic.
pub struct SessionGuard {
    tracker: SessionTracker,
    session: Session,
    finished: bool,
}

impl SessionGuard {
    pub fn session_id(&self) -> i32 {
        self.session.id
    }

    pub fn batch_id(&self) -> i32 {
        self.session.batch_id
    }

    pub fn indicator_id(&self) -> i32 {
        self.session.indicator_id
    }

    /// Stops the session and disarms the drop handler.
    pub fn complete(mut self) -> AppResult<Session> {
        self.finished = true;
        self.tracker.finish_by_id(self.session.id, RunStatus::Stopped)
    }

    /// Fails the session explicitly, keeping the error visible to the
    /// caller instead of deferring to drop.
    pub fn fail(mut self) -> AppResult<Session> {
        self.finished = true;
        self.tracker.finish_by_id(self.session.id, RunStatus::Failed)
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.tracker.finish_by_id(self.session.id, RunStatus::Failed) {
            error!(
                session_id = self.session.id,
                error = %e,
                "Could not fail abandoned session"
            );
        }
    }
}
