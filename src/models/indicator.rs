use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

use crate::schema::{indicator, indicator_parameter, indicator_type};

// ============================================================================
// IndicatorType Models
// ============================================================================

/// Category of data quality check, with the entry point that computes it.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = indicator_type)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IndicatorType {
    pub id: i32,
    pub name: String,
    pub module: String,
    pub function: String,
    pub created_date: NaiveDateTime,
    pub last_updated_date: NaiveDateTime,
}

// ============================================================================
// Indicator Models
// ============================================================================

/// A configured data quality check executed once per batch.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = indicator)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Indicator {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub indicator_type_id: i32,
    pub batch_owner_id: i32,
    pub execution_order: i32,
    pub alert_operator: String,
    pub alert_threshold: f64,
    pub alert_distribution_list: Option<String>,
    pub flag_active: bool,
    pub created_date: NaiveDateTime,
    pub last_updated_date: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = indicator)]
pub struct NewIndicator {
    pub name: String,
    pub description: Option<String>,
    pub indicator_type_id: i32,
    pub batch_owner_id: i32,
    pub execution_order: i32,
    pub alert_operator: String,
    pub alert_threshold: f64,
    pub alert_distribution_list: Option<String>,
    pub flag_active: bool,
}

// ============================================================================
// IndicatorParameter Models
// ============================================================================

/// Named argument attached to an indicator, stored as an opaque string.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = indicator_parameter)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IndicatorParameter {
    pub id: i32,
    pub name: String,
    pub value: String,
    pub indicator_id: i32,
    pub created_date: NaiveDateTime,
    pub last_updated_date: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = indicator_parameter)]
pub struct NewIndicatorParameter {
    pub name: String,
    pub value: String,
    pub indicator_id: i32,
}
