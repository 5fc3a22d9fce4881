//! Append-only session event log.

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::AppResult;
use crate::models::{Event, EventKind, NewEvent};
use crate::repositories::EventRepository;

#[derive(Clone)]
pub struct EventLog {
    events: EventRepository,
}

impl EventLog {
    pub fn new(events: EventRepository) -> Self {
        Self { events }
    }

    /// Appends one event to a session's history.
    ///
    /// The content is stored as serialized JSON and never interpreted by
    /// the tracker.
    pub fn log(&self, session_id: i32, kind: EventKind, content: &JsonValue) -> AppResult<Event> {
        let event = self.events.create(NewEvent {
            event_type_id: kind.id(),
            session_id,
            content: content.to_string(),
        })?;

        debug!(event_id = event.id, session_id, kind = %kind, "Event logged");
        Ok(event)
    }

    /// Events of a session in insertion order.
    pub fn session_history(&self, session_id: i32) -> AppResult<Vec<Event>> {
        self.events.list_for_session(session_id)
    }
}
