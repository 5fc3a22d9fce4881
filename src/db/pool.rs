//! Database connection pool implementation.
//!
//! Uses the r2d2 connection pool manager with diesel for SQLite connections.

use std::time::Duration;

use diesel::SqliteConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::error::{AppError, AppResult};

/// All schema migrations, compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Connection pool type alias.
///
/// r2d2::Pool internally uses Arc, so Clone is cheap (just reference count increment).
/// Structures holding DbPool can derive Clone without additional Arc wrapping.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// A connection checked out of the pool.
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Applies the pragmas every pooled SQLite connection needs.
///
/// SQLite ships with foreign key enforcement off; the store relies on it
/// for referential integrity, so it is switched on per connection. The
/// busy timeout keeps concurrent test runs from failing on a locked file.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Creates a database connection pool for the given SQLite path or URL.
///
/// # Errors
///
/// - `AppError::ConnectionPool` - If connection pool creation fails
pub fn establish_connection_pool(database_url: &str, max_size: u32) -> AppResult<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(max_size)
        .connection_timeout(Duration::from_secs(5))
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)?;
    Ok(pool)
}

/// Applies every pending schema migration on the given connection.
pub fn run_migrations(conn: &mut SqliteConnection) -> AppResult<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| AppError::Database {
            operation: "run pending migrations".to_string(),
            source: anyhow::anyhow!("Migration error: {}", e),
        })?;

    if applied.is_empty() {
        info!("No migrations to apply, schema is up to date");
    } else {
        for migration in &applied {
            info!(version = %migration, "Applied migration");
        }
    }

    Ok(())
}
