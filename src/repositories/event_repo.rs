use diesel::prelude::*;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Event, NewEvent};
use crate::schema::event;

/// Append-only access to the event table. No update or delete paths.
#[derive(Clone)]
pub struct EventRepository {
    pool: DbPool,
}

impl EventRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn create(&self, new_event: NewEvent) -> AppResult<Event> {
        let mut conn = self.pool.get()?;

        diesel::insert_into(event::table)
            .values(&new_event)
            .returning(Event::as_returning())
            .get_result(&mut conn)
            .map_err(AppError::from)
    }

    pub fn list_for_session(&self, session_id: i32) -> AppResult<Vec<Event>> {
        let mut conn = self.pool.get()?;

        event::table
            .filter(event::session_id.eq(session_id))
            .order(event::id.asc())
            .select(Event::as_select())
            .load(&mut conn)
            .map_err(AppError::from)
    }
}
