use diesel::prelude::*;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    Indicator, IndicatorParameter, IndicatorType, NewIndicator, NewIndicatorParameter,
};
use crate::schema::{indicator, indicator_parameter, indicator_type};

#[derive(Clone)]
pub struct IndicatorRepository {
    pool: DbPool,
}

impl IndicatorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn create(&self, new_indicator: NewIndicator) -> AppResult<Indicator> {
        let mut conn = self.pool.get()?;

        diesel::insert_into(indicator::table)
            .values(&new_indicator)
            .returning(Indicator::as_returning())
            .get_result(&mut conn)
            .map_err(AppError::from)
    }

    pub fn get_by_id(&self, id: i32) -> AppResult<Indicator> {
        let mut conn = self.pool.get()?;

        indicator::table
            .find(id)
            .select(Indicator::as_select())
            .first(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::NotFound {
                    entity: "Indicator".to_string(),
                    field: "id".to_string(),
                    value: id.to_string(),
                },
                _ => AppError::from(e),
            })
    }

    /// Active indicators of an owner in the order a batch executes them.
    ///
    /// Ties on execution_order fall back to insertion order.
    pub fn active_for_owner(&self, batch_owner_id: i32) -> AppResult<Vec<Indicator>> {
        let mut conn = self.pool.get()?;

        indicator::table
            .filter(indicator::batch_owner_id.eq(batch_owner_id))
            .filter(indicator::flag_active.eq(true))
            .order((indicator::execution_order.asc(), indicator::id.asc()))
            .select(Indicator::as_select())
            .load(&mut conn)
            .map_err(AppError::from)
    }

    pub fn add_parameter(
        &self,
        new_parameter: NewIndicatorParameter,
    ) -> AppResult<IndicatorParameter> {
        let mut conn = self.pool.get()?;

        diesel::insert_into(indicator_parameter::table)
            .values(&new_parameter)
            .returning(IndicatorParameter::as_returning())
            .get_result(&mut conn)
            .map_err(AppError::from)
    }

    pub fn parameters_for(&self, indicator_id: i32) -> AppResult<Vec<IndicatorParameter>> {
        let mut conn = self.pool.get()?;

        indicator_parameter::table
            .filter(indicator_parameter::indicator_id.eq(indicator_id))
            .order(indicator_parameter::name.asc())
            .select(IndicatorParameter::as_select())
            .load(&mut conn)
            .map_err(AppError::from)
    }

    pub fn get_type(&self, id: i32) -> AppResult<IndicatorType> {
        let mut conn = self.pool.get()?;

        indicator_type::table
            .find(id)
            .select(IndicatorType::as_select())
            .first(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::NotFound {
                    entity: "IndicatorType".to_string(),
                    field: "id".to_string(),
                    value: id.to_string(),
                },
                _ => AppError::from(e),
            })
    }
}
