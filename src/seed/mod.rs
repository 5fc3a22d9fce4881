//! Seed dataset loading.
//!
//! Reference rows (statuses, event types, backend types) ship as a JSON
//! dataset and are replayed through parameterized inserts. Reloading an
//! already seeded store is routine: duplicate rows are skipped and
//! counted, everything else aborts the load.

use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{BigInt, Bool, Double, Nullable, Text};
use diesel::sqlite::Sqlite;
use diesel::{RunQueryDsl, SqliteConnection};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

/// Tables the loader may write to. Anything else is rejected up front.
const ALLOWED_TABLES: [&str; 12] = [
    "batch",
    "batch_owner",
    "data_source",
    "data_source_type",
    "event",
    "event_type",
    "indicator",
    "indicator_parameter",
    "indicator_result",
    "indicator_type",
    "session",
    "status",
];

#[derive(Debug, Deserialize)]
pub struct SeedDataset {
    pub dataset: Vec<SeedTable>,
}

#[derive(Debug, Deserialize)]
pub struct SeedTable {
    pub table: String,
    pub columns: Vec<String>,
    pub records: Vec<SeedRecord>,
}

#[derive(Debug, Deserialize)]
pub struct SeedRecord {
    pub values: Vec<JsonValue>,
}

/// Outcome of one load call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped_duplicates: usize,
}

/// Loads a seed dataset file into the store.
pub fn load(conn: &mut SqliteConnection, path: &Path) -> AppResult<SeedReport> {
    let origin = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| AppError::Seed {
        path: origin.clone(),
        reason: format!("cannot open file: {}", e),
    })?;
    load_reader(conn, file, &origin)
}

/// Loads a seed dataset from any reader; `origin` names it in errors.
pub fn load_reader<R: Read>(
    conn: &mut SqliteConnection,
    reader: R,
    origin: &str,
) -> AppResult<SeedReport> {
    let dataset: SeedDataset = serde_json::from_reader(reader).map_err(|e| AppError::Seed {
        path: origin.to_string(),
        reason: format!("invalid dataset JSON: {}", e),
    })?;

    let mut report = SeedReport::default();
    for seed_table in &dataset.dataset {
        validate_table(seed_table, origin)?;
        apply_table(conn, seed_table, origin, &mut report)?;
    }

    info!(
        origin,
        inserted = report.inserted,
        skipped_duplicates = report.skipped_duplicates,
        "Seed dataset loaded"
    );
    Ok(report)
}

fn apply_table(
    conn: &mut SqliteConnection,
    seed_table: &SeedTable,
    origin: &str,
    report: &mut SeedReport,
) -> AppResult<()> {
    for record in &seed_table.records {
        if record.values.len() != seed_table.columns.len() {
            return Err(AppError::Seed {
                path: origin.to_string(),
                reason: format!(
                    "table {} expects {} values per record, found {}",
                    seed_table.table,
                    seed_table.columns.len(),
                    record.values.len()
                ),
            });
        }

        match insert_record(conn, seed_table, record, origin)? {
            InsertOutcome::Inserted => report.inserted += 1,
            InsertOutcome::DuplicateSkipped => report.skipped_duplicates += 1,
        }
    }
    Ok(())
}

enum InsertOutcome {
    Inserted,
    DuplicateSkipped,
}

fn insert_record(
    conn: &mut SqliteConnection,
    seed_table: &SeedTable,
    record: &SeedRecord,
    origin: &str,
) -> AppResult<InsertOutcome> {
    let placeholders = vec!["?"; record.values.len()].join(", ");
    let statement = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        seed_table.table,
        seed_table.columns.join(", "),
        placeholders
    );

    let mut query = diesel::sql_query(statement).into_boxed::<Sqlite>();
    for value in &record.values {
        query = match value {
            JsonValue::Null => query.bind::<Nullable<Text>, _>(None::<String>),
            JsonValue::Bool(flag) => query.bind::<Bool, _>(*flag),
            JsonValue::Number(number) => match number.as_i64() {
                Some(integer) => query.bind::<BigInt, _>(integer),
                None => query.bind::<Double, _>(number.as_f64().unwrap_or_default()),
            },
            JsonValue::String(text) => query.bind::<Text, _>(text.clone()),
            JsonValue::Array(_) | JsonValue::Object(_) => {
                return Err(AppError::Seed {
                    path: origin.to_string(),
                    reason: format!(
                        "table {} carries a nested value; only scalars are insertable",
                        seed_table.table
                    ),
                });
            }
        };
    }

    match query.execute(conn) {
        Ok(_) => Ok(InsertOutcome::Inserted),
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)) => {
            warn!(
                table = %seed_table.table,
                detail = info.message(),
                "Skipping duplicate seed record"
            );
            Ok(InsertOutcome::DuplicateSkipped)
        }
        Err(e) => Err(AppError::from(e)),
    }
}

fn validate_table(seed_table: &SeedTable, origin: &str) -> AppResult<()> {
    if !ALLOWED_TABLES.contains(&seed_table.table.as_str()) {
        return Err(AppError::Seed {
            path: origin.to_string(),
            reason: format!("unknown table: {}", seed_table.table),
        });
    }

    if seed_table.columns.is_empty() {
        return Err(AppError::Seed {
            path: origin.to_string(),
            reason: format!("table {} lists no columns", seed_table.table),
        });
    }

    for column in &seed_table.columns {
        if !is_identifier(column) {
            return Err(AppError::Seed {
                path: origin.to_string(),
                reason: format!("invalid column name: {}", column),
            });
        }
    }
    Ok(())
}

/// Column names are spliced into the statement, so only plain
/// identifiers pass.
fn is_identifier(candidate: &str) -> bool {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap())
        .is_match(candidate)
}
