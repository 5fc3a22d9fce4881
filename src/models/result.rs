use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

use crate::schema::indicator_result;

/// Aggregated outcome of one indicator session.
///
/// Averages are `None` when the corresponding partition is empty, never 0.0.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = indicator_result)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IndicatorResult {
    pub id: i32,
    pub indicator_id: i32,
    pub session_id: i32,
    pub alert_operator: String,
    pub alert_threshold: f64,
    pub nb_records: i32,
    pub nb_records_alert: i32,
    pub nb_records_no_alert: i32,
    pub avg_result: Option<f64>,
    pub avg_result_alert: Option<f64>,
    pub avg_result_no_alert: Option<f64>,
    pub created_date: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = indicator_result)]
pub struct NewIndicatorResult {
    pub indicator_id: i32,
    pub session_id: i32,
    pub alert_operator: String,
    pub alert_threshold: f64,
    pub nb_records: i32,
    pub nb_records_alert: i32,
    pub nb_records_no_alert: i32,
    pub avg_result: Option<f64>,
    pub avg_result_alert: Option<f64>,
    pub avg_result_no_alert: Option<f64>,
}
