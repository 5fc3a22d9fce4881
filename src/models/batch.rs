use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

use crate::schema::{batch, batch_owner};

// ============================================================================
// BatchOwner Models
// ============================================================================

/// Project or team that owns a set of indicators and their batches.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = batch_owner)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BatchOwner {
    pub id: i32,
    pub name: String,
    pub created_date: NaiveDateTime,
    pub last_updated_date: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = batch_owner)]
pub struct NewBatchOwner {
    pub name: String,
}

// ============================================================================
// Batch Models
// ============================================================================

/// One execution run of every active indicator under a batch owner.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = batch)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Batch {
    pub id: i32,
    pub status_id: i32,
    pub batch_owner_id: i32,
    pub created_date: NaiveDateTime,
    pub last_updated_date: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = batch)]
pub struct NewBatch {
    pub status_id: i32,
    pub batch_owner_id: i32,
}
