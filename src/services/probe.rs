//! Data source connectivity probing.

use std::sync::Arc;

use tracing::{error, info};

use crate::datasource::ConnectionFactory;
use crate::error::AppResult;
use crate::remote::{ConnectivityStatus, CredentialStore};

/// Tests whether registered data sources are reachable with their current
/// credentials, and records the verdict in the registry.
#[derive(Clone)]
pub struct ConnectivityProbe {
    store: Arc<dyn CredentialStore>,
    factory: ConnectionFactory,
}

impl ConnectivityProbe {
    pub fn new(store: Arc<dyn CredentialStore>, factory: ConnectionFactory) -> Self {
        Self { store, factory }
    }

    /// Tests one data source and persists the verdict.
    ///
    /// Registry lookups propagate their errors untouched; only the
    /// connection attempt itself converts into a Failed verdict. The
    /// verdict is written exactly once per call. A failure of that write
    /// is logged and the verdict still returned, so a broken registry
    /// cannot mask the probe outcome.
    pub fn test(&self, auth_token: &str, data_source_id: i32) -> AppResult<ConnectivityStatus> {
        info!(data_source_id, "Testing data source connectivity");

        let record = self.store.fetch_data_source(auth_token, data_source_id)?;
        let password = self.store.resolve_password(auth_token, data_source_id)?;

        let attempt = self
            .factory
            .connect(
                record.data_source_type_id,
                &record.connection_string,
                &record.login,
                &password,
            )
            .and_then(|mut connection| {
                connection.ping()?;
                Ok(connection.backend())
            });

        let verdict = match attempt {
            Ok(backend) => {
                info!(data_source_id, backend = %backend, "Connection succeeded");
                ConnectivityStatus::Success
            }
            Err(e) => {
                error!(data_source_id, error = %e, "Connection failed");
                ConnectivityStatus::Failed
            }
        };

        if let Err(e) = self
            .store
            .report_connectivity(auth_token, data_source_id, verdict)
        {
            error!(data_source_id, error = %e, "Could not persist connectivity status");
        }

        Ok(verdict)
    }
}
