use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::event;

/// Kind of lifecycle event appended to the log.
///
/// The numeric ids match the seeded `event_type` reference rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Start,
    Stop,
    Error,
    Alert,
}

impl EventKind {
    /// Row id of the kind in the `event_type` reference table.
    pub const fn id(self) -> i32 {
        match self {
            EventKind::Start => 1,
            EventKind::Stop => 2,
            EventKind::Error => 3,
            EventKind::Alert => 4,
        }
    }

    pub const fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(EventKind::Start),
            2 => Some(EventKind::Stop),
            3 => Some(EventKind::Error),
            4 => Some(EventKind::Alert),
            _ => None,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Start => write!(f, "Start"),
            EventKind::Stop => write!(f, "Stop"),
            EventKind::Error => write!(f, "Error"),
            EventKind::Alert => write!(f, "Alert"),
        }
    }
}

/// Append-only record of something that happened during a session.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = event)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Event {
    pub id: i32,
    pub event_type_id: i32,
    pub session_id: i32,
    pub content: String,
    pub created_date: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = event)]
pub struct NewEvent {
    pub event_type_id: i32,
    pub session_id: i32,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_id_round_trip() {
        for kind in [
            EventKind::Start,
            EventKind::Stop,
            EventKind::Error,
            EventKind::Alert,
        ] {
            assert_eq!(EventKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(EventKind::from_id(0), None);
        assert_eq!(EventKind::from_id(5), None);
    }
}
