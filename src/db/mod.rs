//! Database connection pool module.
//!
//! Provides SQLite connection pooling using diesel with r2d2.

mod pool;

pub use pool::{DbConnection, DbPool, MIGRATIONS, establish_connection_pool, run_migrations};
