use diesel::prelude::*;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{IndicatorResult, NewIndicatorResult};
use crate::schema::indicator_result;

#[derive(Clone)]
pub struct ResultRepository {
    pool: DbPool,
}

impl ResultRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Stores the aggregates of one session.
    ///
    /// The table carries a unique constraint on session_id, so a second
    /// insert for the same session surfaces as `AppError::Duplicate`.
    pub fn create(&self, new_result: NewIndicatorResult) -> AppResult<IndicatorResult> {
        let mut conn = self.pool.get()?;

        diesel::insert_into(indicator_result::table)
            .values(&new_result)
            .returning(IndicatorResult::as_returning())
            .get_result(&mut conn)
            .map_err(AppError::from)
    }

    pub fn find_by_session(&self, session_id: i32) -> AppResult<Option<IndicatorResult>> {
        let mut conn = self.pool.get()?;

        indicator_result::table
            .filter(indicator_result::session_id.eq(session_id))
            .select(IndicatorResult::as_select())
            .first(&mut conn)
            .optional()
            .map_err(AppError::from)
    }

    pub fn list_for_indicator(&self, indicator_id: i32) -> AppResult<Vec<IndicatorResult>> {
        let mut conn = self.pool.get()?;

        indicator_result::table
            .filter(indicator_result::indicator_id.eq(indicator_id))
            .order(indicator_result::id.asc())
            .select(IndicatorResult::as_select())
            .load(&mut conn)
            .map_err(AppError::from)
    }
}
