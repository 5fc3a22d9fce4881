use diesel::prelude::*;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{DataSource, NewDataSource};
use crate::schema::data_source;

/// Local registry of databases known to the tracker.
///
/// Only descriptive fields live here; passwords are resolved through the
/// credential API at connection time.
#[derive(Clone)]
pub struct DataSourceRepository {
    pool: DbPool,
}

impl DataSourceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn create(&self, new_data_source: NewDataSource) -> AppResult<DataSource> {
        let mut conn = self.pool.get()?;

        diesel::insert_into(data_source::table)
            .values(&new_data_source)
            .returning(DataSource::as_returning())
            .get_result(&mut conn)
            .map_err(AppError::from)
    }

    pub fn get_by_id(&self, id: i32) -> AppResult<DataSource> {
        let mut conn = self.pool.get()?;

        data_source::table
            .find(id)
            .select(DataSource::as_select())
            .first(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::NotFound {
                    entity: "DataSource".to_string(),
                    field: "id".to_string(),
                    value: id.to_string(),
                },
                _ => AppError::from(e),
            })
    }

    pub fn find_by_name(&self, name: &str) -> AppResult<Option<DataSource>> {
        let mut conn = self.pool.get()?;

        data_source::table
            .filter(data_source::name.eq(name))
            .select(DataSource::as_select())
            .first(&mut conn)
            .optional()
            .map_err(AppError::from)
    }

    pub fn list_all(&self) -> AppResult<Vec<DataSource>> {
        let mut conn = self.pool.get()?;

        data_source::table
            .order(data_source::id.asc())
            .select(DataSource::as_select())
            .load(&mut conn)
            .map_err(AppError::from)
    }

    pub fn update_connectivity_status(&self, id: i32, status: &str) -> AppResult<DataSource> {
        let mut conn = self.pool.get()?;

        diesel::update(data_source::table.find(id))
            .set((
                data_source::connectivity_status.eq(status),
                data_source::last_updated_date.eq(diesel::dsl::now),
            ))
            .returning(DataSource::as_returning())
            .get_result(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::NotFound {
                    entity: "DataSource".to_string(),
                    field: "id".to_string(),
                    value: id.to_string(),
                },
                _ => AppError::from(e),
            })
    }
}
