//! dqtrack
//!
//! Tracks the execution lifecycle of data-quality indicator runs: timed
//! batches per owner, per-indicator sessions, aggregated results, and an
//! append-only event log, persisted in a local SQLite store. A connectivity
//! probe tests the external data sources those indicators run against,
//! resolving credentials through a GraphQL API.

pub mod config;
pub mod datasource;
pub mod db;
pub mod error;
pub mod logger;
pub mod models;
pub mod remote;
pub mod repositories;
pub mod schema;
pub mod seed;
pub mod services;
pub mod state;

pub use state::AppState;

pub fn pkg_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
