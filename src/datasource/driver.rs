//! Driver seam for driver-manager backed backends.
//!
//! The tracker never links an ODBC binding directly; it talks to whatever
//! implements [`OdbcDriver`]. Production wires in a real binding, tests
//! wire in recording fakes.

use crate::datasource::backend::SessionSettings;

/// A live driver-manager session.
pub trait OdbcConnection: Send {
    /// Verifies the session is usable, typically with a trivial statement.
    fn ping(&mut self) -> anyhow::Result<()>;
}

/// Establishes driver-manager sessions from a finished connection string.
///
/// Implementations receive the connection string with credentials already
/// appended and must apply the given session settings (autocommit and
/// UTF-8 channel overrides) before returning the handle.
pub trait OdbcDriver: Send + Sync {
    fn connect(
        &self,
        connection_string: &str,
        settings: &SessionSettings,
    ) -> anyhow::Result<Box<dyn OdbcConnection>>;
}
