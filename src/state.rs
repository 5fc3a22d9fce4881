//! Application state for the tracker.
//!
//! Replaces ambient module-level state with an explicit context object that
//! owns the connection pool, repositories, and services.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::config::Settings;
use crate::datasource::{ConnectionFactory, OdbcDriver};
use crate::db::{establish_connection_pool, run_migrations, DbPool};
use crate::error::AppResult;
use crate::remote::{ApiClient, GraphQlCredentialStore};
use crate::repositories::Repositories;
use crate::seed;
use crate::services::{ConnectivityProbe, Services};

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since the pool and every layer built on it use `Arc`
/// internally.
#[derive(Clone)]
pub struct AppState {
    /// Settings the state was built from
    pub settings: Settings,
    /// Registry access for owners, indicators, and data sources
    pub repositories: Repositories,
    /// All lifecycle services
    pub services: Services,
    /// Direct access to the database connection pool
    pub db_pool: DbPool,
}

impl AppState {
    /// Initializes the application state from validated settings.
    ///
    /// Establishes the connection pool, optionally runs pending migrations
    /// and loads the reference dataset, then wires repositories and services.
    ///
    /// # Example
    /// ```ignore
    /// let settings = ConfigLoader::new()?.load()?;
    /// let state = AppState::init(settings)?;
    /// ```
    pub fn init(settings: Settings) -> AppResult<Self> {
        let pool = establish_connection_pool(
            &settings.database.url,
            settings.database.max_connections,
        )?;

        if settings.database.auto_migrate {
            let mut conn = pool.get()?;
            run_migrations(&mut conn)?;
        }

        if let Some(ref seed_file) = settings.database.seed_file {
            let mut conn = pool.get()?;
            let report = seed::load(&mut conn, Path::new(seed_file))?;
            info!(
                inserted = report.inserted,
                skipped = report.skipped_duplicates,
                "Reference dataset loaded"
            );
        }

        let repositories = Repositories::new(pool.clone());
        let services = Services::new(repositories.clone());

        info!(database = %settings.database.url, "Application state initialized");

        Ok(Self {
            settings,
            repositories,
            services,
            db_pool: pool,
        })
    }

    /// Builds a connectivity probe against the configured credential API.
    ///
    /// The probe is wired on demand rather than held in the state: it needs
    /// an ODBC driver, which callers inject.
    pub fn connectivity_probe(&self, driver: Arc<dyn OdbcDriver>) -> AppResult<ConnectivityProbe> {
        let api = ApiClient::new(&self.settings.api.url, self.settings.api.request_timeout())?;
        let store = GraphQlCredentialStore::new(api);
        Ok(ConnectivityProbe::new(
            Arc::new(store),
            ConnectionFactory::new(driver),
        ))
    }

    /// Consumes the state, releasing the pool and every service built on it.
    pub fn close(self) {
        info!("Tracking store closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::DatabaseConfig;
    use crate::models::{NewBatchOwner, RunStatus};
    use diesel::prelude::*;

    const REFERENCE_DATASET: &str =
        concat!(env!("CARGO_MANIFEST_DIR"), "/seeds/reference.json");

    fn memory_settings() -> Settings {
        Settings {
            database: DatabaseConfig {
                url: ":memory:".to_string(),
                max_connections: 1,
                auto_migrate: true,
                seed_file: Some(REFERENCE_DATASET.to_string()),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_init_runs_migrations_and_wires_services() {
        let state = AppState::init(memory_settings()).unwrap();

        let owner = state
            .repositories
            .batch_owners
            .create(NewBatchOwner {
                name: "state test".to_string(),
            })
            .unwrap();
        let batch = state.services.batches.start(owner.id).unwrap();
        assert_eq!(batch.status_id, RunStatus::Started.id());

        state.close();
    }

    #[test]
    fn test_init_loads_seed_file() {
        let state = AppState::init(memory_settings()).unwrap();

        let mut conn = state.db_pool.get().unwrap();
        let statuses: i64 = crate::schema::status::table
            .count()
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(statuses, 3);
        drop(conn);

        state.close();
    }

    #[test]
    fn test_init_without_seed_file_leaves_reference_tables_empty() {
        let mut settings = memory_settings();
        settings.database.seed_file = None;

        let state = AppState::init(settings).unwrap();

        let mut conn = state.db_pool.get().unwrap();
        let statuses: i64 = crate::schema::status::table
            .count()
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(statuses, 0);
    }
}
