//! Data source backends and connection construction.

mod backend;
mod driver;
mod factory;

pub use backend::{
    BACKENDS, BackendDescriptor, DataSourceType, DecodeChannel, DriverFamily, SessionSettings,
};
pub use driver::{OdbcConnection, OdbcDriver};
pub use factory::{ConnectionFactory, DataSourceConnection};
