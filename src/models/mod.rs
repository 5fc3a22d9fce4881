mod alert_operator;
mod batch;
mod data_source;
mod event;
mod indicator;
mod result;
mod run_status;
mod session;

pub use alert_operator::AlertOperator;
pub use batch::{Batch, BatchOwner, NewBatch, NewBatchOwner};
pub use data_source::{DataSource, NewDataSource};
pub use event::{Event, EventKind, NewEvent};
pub use indicator::{
    Indicator, IndicatorParameter, IndicatorType, NewIndicator, NewIndicatorParameter,
};
pub use result::{IndicatorResult, NewIndicatorResult};
pub use run_status::RunStatus;
pub use session::{NewSession, Session};
