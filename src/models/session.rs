use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

use crate::schema::session;

/// Execution of one indicator within a batch.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = session)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Session {
    pub id: i32,
    pub status_id: i32,
    pub batch_id: i32,
    pub indicator_id: i32,
    pub created_date: NaiveDateTime,
    pub last_updated_date: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = session)]
pub struct NewSession {
    pub status_id: i32,
    pub batch_id: i32,
    pub indicator_id: i32,
}
