//! Clients for the remote credential and registry API.

mod client;
mod credentials;
mod store;

pub use client::{ApiClient, GraphqlRequest};
pub use credentials::CredentialResolver;
pub use store::{ConnectivityStatus, CredentialStore, DataSourceRecord, GraphQlCredentialStore};
