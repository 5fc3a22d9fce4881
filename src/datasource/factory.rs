//! Connection construction for every supported backend.

use std::sync::Arc;

use diesel::{Connection, RunQueryDsl, SqliteConnection};
use tracing::debug;

use crate::datasource::backend::{BackendDescriptor, DataSourceType, DriverFamily};
use crate::datasource::driver::{OdbcConnection, OdbcDriver};
use crate::error::{AppError, AppResult};

/// Builds live connections from a backend type id plus credentials.
#[derive(Clone)]
pub struct ConnectionFactory {
    driver: Arc<dyn OdbcDriver>,
}

impl ConnectionFactory {
    pub fn new(driver: Arc<dyn OdbcDriver>) -> Self {
        Self { driver }
    }

    /// Connects to a data source backend.
    ///
    /// For driver-manager backends, `uid=<login>;` and then `pwd=<password>;`
    /// are appended to the connection string, each only when non-empty. The
    /// embedded backend treats the connection string as a file path and
    /// ignores credentials entirely.
    ///
    /// One attempt, no retry; a driver failure is wrapped as
    /// `AppError::Connection` with the underlying error preserved.
    pub fn connect(
        &self,
        data_source_type_id: i32,
        connection_string: &str,
        login: &str,
        password: &str,
    ) -> AppResult<DataSourceConnection> {
        let descriptor = BackendDescriptor::for_type_id(data_source_type_id)?;
        debug!(backend = %descriptor.backend, "Connecting to data source");

        match descriptor.family {
            DriverFamily::Odbc => {
                let final_string = append_credentials(connection_string, login, password);
                let connection = self
                    .driver
                    .connect(&final_string, &descriptor.settings)
                    .map_err(|source| AppError::Connection {
                        backend: descriptor.backend.name().to_string(),
                        source,
                    })?;
                Ok(DataSourceConnection::Odbc {
                    backend: descriptor.backend,
                    connection,
                })
            }
            DriverFamily::Embedded => {
                let connection =
                    SqliteConnection::establish(connection_string).map_err(|e| {
                        AppError::Connection {
                            backend: descriptor.backend.name().to_string(),
                            source: anyhow::Error::from(e),
                        }
                    })?;
                Ok(DataSourceConnection::Embedded {
                    backend: descriptor.backend,
                    connection,
                })
            }
        }
    }
}

/// Appends `uid=` and `pwd=` segments for driver-manager backends.
///
/// Order matters: uid before pwd. Empty values produce no segment at all,
/// not an empty `pwd=;`.
fn append_credentials(connection_string: &str, login: &str, password: &str) -> String {
    let mut final_string = connection_string.to_string();
    if !login.is_empty() {
        final_string.push_str(&format!("uid={};", login));
    }
    if !password.is_empty() {
        final_string.push_str(&format!("pwd={};", password));
    }
    final_string
}

/// A live connection to an external data source.
pub enum DataSourceConnection {
    Odbc {
        backend: DataSourceType,
        connection: Box<dyn OdbcConnection>,
    },
    Embedded {
        backend: DataSourceType,
        connection: SqliteConnection,
    },
}

impl std::fmt::Debug for DataSourceConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSourceConnection::Odbc { backend, .. } => f
                .debug_struct("Odbc")
                .field("backend", backend)
                .finish_non_exhaustive(),
            DataSourceConnection::Embedded { backend, .. } => f
                .debug_struct("Embedded")
                .field("backend", backend)
                .finish_non_exhaustive(),
        }
    }
}

impl DataSourceConnection {
    pub fn backend(&self) -> DataSourceType {
        match self {
            DataSourceConnection::Odbc { backend, .. } => *backend,
            DataSourceConnection::Embedded { backend, .. } => *backend,
        }
    }

    /// Round-trips a trivial statement to verify the session works.
    pub fn ping(&mut self) -> AppResult<()> {
        match self {
            DataSourceConnection::Odbc {
                backend,
                connection,
            } => connection.ping().map_err(|source| AppError::Connection {
                backend: backend.name().to_string(),
                source,
            }),
            DataSourceConnection::Embedded {
                backend,
                connection,
            } => diesel::sql_query("SELECT 1")
                .execute(connection)
                .map(|_| ())
                .map_err(|e| AppError::Connection {
                    backend: backend.name().to_string(),
                    source: anyhow::Error::from(e),
                }),
        }
    }
}
