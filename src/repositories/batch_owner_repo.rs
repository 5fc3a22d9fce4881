use diesel::prelude::*;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{BatchOwner, NewBatchOwner};
use crate::schema::batch_owner;

#[derive(Clone)]
pub struct BatchOwnerRepository {
    pool: DbPool,
}

impl BatchOwnerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn create(&self, owner: NewBatchOwner) -> AppResult<BatchOwner> {
        let mut conn = self.pool.get()?;

        diesel::insert_into(batch_owner::table)
            .values(&owner)
            .returning(BatchOwner::as_returning())
            .get_result(&mut conn)
            .map_err(AppError::from)
    }

    pub fn get_by_id(&self, id: i32) -> AppResult<BatchOwner> {
        let mut conn = self.pool.get()?;

        batch_owner::table
            .find(id)
            .select(BatchOwner::as_select())
            .first(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::NotFound {
                    entity: "BatchOwner".to_string(),
                    field: "id".to_string(),
                    value: id.to_string(),
                },
                _ => AppError::from(e),
            })
    }

    pub fn find_by_name(&self, name: &str) -> AppResult<Option<BatchOwner>> {
        let mut conn = self.pool.get()?;

        batch_owner::table
            .filter(batch_owner::name.eq(name))
            .select(BatchOwner::as_select())
            .first(&mut conn)
            .optional()
            .map_err(AppError::from)
    }

    pub fn list_all(&self) -> AppResult<Vec<BatchOwner>> {
        let mut conn = self.pool.get()?;

        batch_owner::table
            .order(batch_owner::id.asc())
            .select(BatchOwner::as_select())
            .load(&mut conn)
            .map_err(AppError::from)
    }
}
