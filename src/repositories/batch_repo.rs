use diesel::prelude::*;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Batch, NewBatch, RunStatus};
use crate::schema::batch;

#[derive(Clone)]
pub struct BatchRepository {
    pool: DbPool,
}

impl BatchRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn create(&self, batch_owner_id: i32, status: RunStatus) -> AppResult<Batch> {
        let mut conn = self.pool.get()?;

        diesel::insert_into(batch::table)
            .values(&NewBatch {
                status_id: status.id(),
                batch_owner_id,
            })
            .returning(Batch::as_returning())
            .get_result(&mut conn)
            .map_err(AppError::from)
    }

    pub fn get_by_id(&self, id: i32) -> AppResult<Batch> {
        let mut conn = self.pool.get()?;

        batch::table
            .find(id)
            .select(Batch::as_select())
            .first(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::NotFound {
                    entity: "Batch".to_string(),
                    field: "id".to_string(),
                    value: id.to_string(),
                },
                _ => AppError::from(e),
            })
    }

    /// Most recently opened batch for an owner, regardless of status.
    pub fn latest_for_owner(&self, batch_owner_id: i32) -> AppResult<Option<Batch>> {
        let mut conn = self.pool.get()?;

        batch::table
            .filter(batch::batch_owner_id.eq(batch_owner_id))
            .order(batch::id.desc())
            .select(Batch::as_select())
            .first(&mut conn)
            .optional()
            .map_err(AppError::from)
    }

    pub fn update_status(&self, id: i32, status: RunStatus) -> AppResult<Batch> {
        let mut conn = self.pool.get()?;

        diesel::update(batch::table.find(id))
            .set((
                batch::status_id.eq(status.id()),
                batch::last_updated_date.eq(diesel::dsl::now),
            ))
            .returning(Batch::as_returning())
            .get_result(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::NotFound {
                    entity: "Batch".to_string(),
                    field: "id".to_string(),
                    value: id.to_string(),
                },
                _ => AppError::from(e),
            })
    }
}
