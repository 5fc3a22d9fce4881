//! Repository layer for data access operations.
//!
//! Provides CRUD operations for all tracked entities.

mod batch_owner_repo;
mod batch_repo;
mod data_source_repo;
mod event_repo;
mod indicator_repo;
mod result_repo;
mod session_repo;


pub use batch_owner_repo::BatchOwnerRepository;
pub use batch_repo::BatchRepository;
pub use data_source_repo::DataSourceRepository;
pub use event_repo::EventRepository;
pub use indicator_repo::IndicatorRepository;
pub use result_repo::ResultRepository;
pub use session_repo::SessionRepository;

use crate::db::DbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `DbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub batch_owners: BatchOwnerRepository,
    pub batches: BatchRepository,
    pub sessions: SessionRepository,
    pub indicators: IndicatorRepository,
    pub results: ResultRepository,
    pub events: EventRepository,
    pub data_sources: DataSourceRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    pub fn new(pool: DbPool) -> Self {
        Self {
            batch_owners: BatchOwnerRepository::new(pool.clone()),
            batches: BatchRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool.clone()),
            indicators: IndicatorRepository::new(pool.clone()),
            results: ResultRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            data_sources: DataSourceRepository::new(pool),
        }
    }
}
