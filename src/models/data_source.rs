use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

use crate::schema::data_source;

/// Registered database a data quality check can read from.
///
/// The password is never stored here; it is fetched from the credential
/// API at connection time.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = data_source)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DataSource {
    pub id: i32,
    pub name: String,
    pub data_source_type_id: i32,
    pub connection_string: String,
    pub login: String,
    pub connectivity_status: Option<String>,
    pub created_date: NaiveDateTime,
    pub last_updated_date: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = data_source)]
pub struct NewDataSource {
    pub name: String,
    pub data_source_type_id: i32,
    pub connection_string: String,
    pub login: String,
}
