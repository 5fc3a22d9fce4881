//! Backend catalog for external data sources.
//!
//! Every supported backend is described by one entry in [`BACKENDS`];
//! connecting looks the entry up once and follows its capabilities, so
//! adding a backend means adding a table row, not another branch.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Kind of external database a data source can point at.
///
/// The numeric ids match the seeded `data_source_type` reference rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSourceType {
    Hive,
    Impala,
    MariaDb,
    SqlServer,
    MySql,
    Oracle,
    PostgreSql,
    Sqlite,
    Teradata,
}

impl DataSourceType {
    pub const fn id(self) -> i32 {
        match self {
            DataSourceType::Hive => 1,
            DataSourceType::Impala => 2,
            DataSourceType::MariaDb => 3,
            DataSourceType::SqlServer => 4,
            DataSourceType::MySql => 5,
            DataSourceType::Oracle => 6,
            DataSourceType::PostgreSql => 7,
            DataSourceType::Sqlite => 8,
            DataSourceType::Teradata => 9,
        }
    }

    /// Maps a stored type id to the enum.
    ///
    /// # Errors
    /// - `AppError::UnsupportedBackend` - If the id is outside the catalog
    pub fn from_id(type_id: i32) -> AppResult<Self> {
        match type_id {
            1 => Ok(DataSourceType::Hive),
            2 => Ok(DataSourceType::Impala),
            3 => Ok(DataSourceType::MariaDb),
            4 => Ok(DataSourceType::SqlServer),
            5 => Ok(DataSourceType::MySql),
            6 => Ok(DataSourceType::Oracle),
            7 => Ok(DataSourceType::PostgreSql),
            8 => Ok(DataSourceType::Sqlite),
            9 => Ok(DataSourceType::Teradata),
            _ => Err(AppError::UnsupportedBackend { type_id }),
        }
    }

    /// Display name, matching the seeded reference row.
    pub const fn name(self) -> &'static str {
        match self {
            DataSourceType::Hive => "Hive",
            DataSourceType::Impala => "Impala",
            DataSourceType::MariaDb => "MariaDB",
            DataSourceType::SqlServer => "Microsoft SQL Server",
            DataSourceType::MySql => "MySQL",
            DataSourceType::Oracle => "Oracle",
            DataSourceType::PostgreSql => "PostgreSQL",
            DataSourceType::Sqlite => "SQLite",
            DataSourceType::Teradata => "Teradata",
        }
    }

    /// Catalog entry for this backend.
    ///
    /// BACKENDS is ordered by type id, so the entry sits at `id - 1`.
    pub fn descriptor(self) -> &'static BackendDescriptor {
        &BACKENDS[(self.id() - 1) as usize]
    }
}

impl std::fmt::Display for DataSourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Which driver stack establishes the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverFamily {
    /// Driver-manager backed connection built from a connection string.
    Odbc,
    /// In-process engine; the connection string is a file path and
    /// credentials are ignored.
    Embedded,
}

/// Character channel whose decoding is forced to UTF-8 after connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeChannel {
    Narrow,
    Wide,
    WideMetadata,
}

/// Session configuration the driver applies after the raw connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub autocommit: bool,
    pub utf8_decode: &'static [DecodeChannel],
    pub utf8_encode: bool,
}

impl SessionSettings {
    const fn plain() -> Self {
        Self {
            autocommit: false,
            utf8_decode: &[],
            utf8_encode: false,
        }
    }
}

/// One row of the backend capability catalog.
#[derive(Debug)]
pub struct BackendDescriptor {
    pub backend: DataSourceType,
    pub family: DriverFamily,
    pub settings: SessionSettings,
}

impl BackendDescriptor {
    /// Catalog entry for a stored type id.
    pub fn for_type_id(type_id: i32) -> AppResult<&'static BackendDescriptor> {
        Ok(DataSourceType::from_id(type_id)?.descriptor())
    }
}

pub const BACKENDS: [BackendDescriptor; 9] = [
    BackendDescriptor {
        backend: DataSourceType::Hive,
        family: DriverFamily::Odbc,
        settings: SessionSettings {
            autocommit: true,
            utf8_decode: &[DecodeChannel::Narrow],
            utf8_encode: true,
        },
    },
    BackendDescriptor {
        backend: DataSourceType::Impala,
        family: DriverFamily::Odbc,
        settings: SessionSettings {
            autocommit: false,
            utf8_decode: &[],
            utf8_encode: true,
        },
    },
    BackendDescriptor {
        backend: DataSourceType::MariaDb,
        family: DriverFamily::Odbc,
        settings: SessionSettings::plain(),
    },
    BackendDescriptor {
        backend: DataSourceType::SqlServer,
        family: DriverFamily::Odbc,
        settings: SessionSettings::plain(),
    },
    BackendDescriptor {
        backend: DataSourceType::MySql,
        family: DriverFamily::Odbc,
        settings: SessionSettings::plain(),
    },
    BackendDescriptor {
        backend: DataSourceType::Oracle,
        family: DriverFamily::Odbc,
        settings: SessionSettings::plain(),
    },
    BackendDescriptor {
        backend: DataSourceType::PostgreSql,
        family: DriverFamily::Odbc,
        settings: SessionSettings {
            autocommit: false,
            utf8_decode: &[DecodeChannel::Wide],
            utf8_encode: true,
        },
    },
    BackendDescriptor {
        backend: DataSourceType::Sqlite,
        family: DriverFamily::Embedded,
        settings: SessionSettings::plain(),
    },
    BackendDescriptor {
        backend: DataSourceType::Teradata,
        family: DriverFamily::Odbc,
        settings: SessionSettings {
            autocommit: false,
            utf8_decode: &[
                DecodeChannel::Narrow,
                DecodeChannel::Wide,
                DecodeChannel::WideMetadata,
            ],
            utf8_encode: true,
        },
    },
];
