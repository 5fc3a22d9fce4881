use diesel::prelude::*;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewSession, RunStatus, Session};
use crate::schema::session;

#[derive(Clone)]
pub struct SessionRepository {
    pool: DbPool,
}

impl SessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn create(&self, batch_id: i32, indicator_id: i32, status: RunStatus) -> AppResult<Session> {
        let mut conn = self.pool.get()?;

        diesel::insert_into(session::table)
            .values(&NewSession {
                status_id: status.id(),
                batch_id,
                indicator_id,
            })
            .returning(Session::as_returning())
            .get_result(&mut conn)
            .map_err(AppError::from)
    }

    pub fn get_by_id(&self, id: i32) -> AppResult<Session> {
        let mut conn = self.pool.get()?;

        session::table
            .find(id)
            .select(Session::as_select())
            .first(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::NotFound {
                    entity: "Session".to_string(),
                    field: "id".to_string(),
                    value: id.to_string(),
                },
                _ => AppError::from(e),
            })
    }

    /// Most recent session of an indicator within a batch.
    pub fn latest_for_indicator(
        &self,
        batch_id: i32,
        indicator_id: i32,
    ) -> AppResult<Option<Session>> {
        let mut conn = self.pool.get()?;

        session::table
            .filter(session::batch_id.eq(batch_id))
            .filter(session::indicator_id.eq(indicator_id))
            .order(session::id.desc())
            .select(Session::as_select())
            .first(&mut conn)
            .optional()
            .map_err(AppError::from)
    }

    pub fn list_for_batch(&self, batch_id: i32) -> AppResult<Vec<Session>> {
        let mut conn = self.pool.get()?;

        session::table
            .filter(session::batch_id.eq(batch_id))
            .order(session::id.asc())
            .select(Session::as_select())
            .load(&mut conn)
            .map_err(AppError::from)
    }

    pub fn update_status(&self, id: i32, status: RunStatus) -> AppResult<Session> {
        let mut conn = self.pool.get()?;

        diesel::update(session::table.find(id))
            .set((
                session::status_id.eq(status.id()),
                session::last_updated_date.eq(diesel::dsl::now),
            ))
            .returning(Session::as_returning())
            .get_result(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::NotFound {
                    entity: "Session".to_string(),
                    field: "id".to_string(),
                    value: id.to_string(),
                },
                _ => AppError::from(e),
            })
    }
}
