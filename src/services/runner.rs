//! Sequential execution of a batch owner's active indicators.
//!
//! The runner owns the orchestration only: lifecycle rows, events, and
//! result persistence. What an indicator actually measures is supplied by
//! the caller through [`IndicatorCheck`].

use serde_json::json;
use tracing::{error, info, warn};

use crate::error::AppResult;
use crate::models::{AlertOperator, EventKind, Indicator, IndicatorParameter, IndicatorType};
use crate::repositories::IndicatorRepository;
use crate::services::batch_tracker::BatchTracker;
use crate::services::event_log::EventLog;
use crate::services::result_recorder::ResultRecorder;
use crate::services::session_tracker::SessionTracker;

/// Everything a check implementation sees for one indicator run.
pub struct CheckContext<'a> {
    pub indicator: &'a Indicator,
    pub indicator_type: &'a IndicatorType,
    pub parameters: &'a [IndicatorParameter],
}

impl CheckContext<'_> {
    /// Convenience lookup of a named parameter value.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|parameter| parameter.name == name)
            .map(|parameter| parameter.value.as_str())
    }
}

/// Computes the measured values of one indicator run.
///
/// Implementations fetch and compare whatever the indicator's parameters
/// describe; the runner only consumes the resulting numbers.
pub trait IndicatorCheck {
    fn execute(&self, context: &CheckContext<'_>) -> anyhow::Result<Vec<f64>>;
}

/// Summary of one completed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    pub batch_id: i32,
    pub sessions_completed: usize,
    pub sessions_failed: usize,
}

enum SessionVerdict {
    Completed,
    Failed,
}

#[derive(Clone)]
pub struct BatchRunner {
    batches: BatchTracker,
    sessions: SessionTracker,
    indicators: IndicatorRepository,
    recorder: ResultRecorder,
    events: EventLog,
}

impl BatchRunner {
    pub fn new(
        batches: BatchTracker,
        sessions: SessionTracker,
        indicators: IndicatorRepository,
        recorder: ResultRecorder,
        events: EventLog,
    ) -> Self {
        Self {
            batches,
            sessions,
            indicators,
            recorder,
            events,
        }
    }

    /// Runs every active indicator of the owner, in execution order.
    ///
    /// A failing check fails its own session, leaves an Error event, and
    /// the loop continues; the batch still closes as Stopped. Tracker and
    /// storage errors fail the whole batch and propagate. Failing the
    /// batch on that path must not mask the original error, so a failure
    /// of the fail-write itself is only logged.
    pub fn execute(&self, batch_owner_id: i32, check: &dyn IndicatorCheck) -> AppResult<BatchOutcome> {
        let batch = self.batches.start(batch_owner_id)?;

        match self.run_indicators(batch.id, batch_owner_id, check) {
            Ok((sessions_completed, sessions_failed)) => {
                self.batches.stop(batch_owner_id)?;
                info!(
                    batch_id = batch.id,
                    sessions_completed, sessions_failed, "Batch run finished"
                );
                Ok(BatchOutcome {
                    batch_id: batch.id,
                    sessions_completed,
                    sessions_failed,
                })
            }
            Err(e) => {
                if let Err(fail_error) = self.batches.fail(batch_owner_id) {
                    error!(
                        batch_id = batch.id,
                        error = %fail_error,
                        "Could not mark batch as failed"
                    );
                }
                Err(e)
            }
        }
    }

    fn run_indicators(
        &self,
        batch_id: i32,
        batch_owner_id: i32,
        check: &dyn IndicatorCheck,
    ) -> AppResult<(usize, usize)> {
        let indicators = self.indicators.active_for_owner(batch_owner_id)?;
        info!(
            batch_id,
            batch_owner_id,
            count = indicators.len(),
            "Executing active indicators"
        );

        let mut completed = 0;
        let mut failed = 0;
        for indicator in &indicators {
            match self.run_one(batch_id, indicator, check)? {
                SessionVerdict::Completed => completed += 1,
                SessionVerdict::Failed => failed += 1,
            }
        }

        Ok((completed, failed))
    }

    fn run_one(
        &self,
        batch_id: i32,
        indicator: &Indicator,
        check: &dyn IndicatorCheck,
    ) -> AppResult<SessionVerdict> {
        let guard = self.sessions.start_guarded(batch_id, indicator.id)?;
        let session_id = guard.session_id();

        let indicator_type = self.indicators.get_type(indicator.indicator_type_id)?;
        let parameters = self.indicators.parameters_for(indicator.id)?;

        self.events.log(
            session_id,
            EventKind::Start,
            &json!({
                "indicator": indicator.name,
                "indicator_type": indicator_type.name,
                "module": indicator_type.module,
                "function": indicator_type.function,
            }),
        )?;

        let outcome = self.run_check(indicator, &indicator_type, &parameters, check);

        match outcome {
            Ok((operator, values)) => {
                let result = self.recorder.record(
                    session_id,
                    indicator.id,
                    operator,
                    indicator.alert_threshold,
                    &values,
                )?;

                if result.nb_records_alert > 0 {
                    warn!(
                        indicator_id = indicator.id,
                        nb_records_alert = result.nb_records_alert,
                        "Indicator raised an alert"
                    );
                    self.events.log(
                        session_id,
                        EventKind::Alert,
                        &json!({
                            "nb_records_alert": result.nb_records_alert,
                            "alert_operator": indicator.alert_operator,
                            "alert_threshold": indicator.alert_threshold,
                        }),
                    )?;
                }

                self.events.log(
                    session_id,
                    EventKind::Stop,
                    &json!({"nb_records": result.nb_records}),
                )?;
                guard.complete()?;
                Ok(SessionVerdict::Completed)
            }
            Err(e) => {
                error!(
                    indicator_id = indicator.id,
                    error = %e,
                    "Indicator check failed"
                );
                self.events.log(
                    session_id,
                    EventKind::Error,
                    &json!({"error": e.to_string()}),
                )?;
                guard.fail()?;
                Ok(SessionVerdict::Failed)
            }
        }
    }

    /// Check-scoped work: alert rule parsing plus the check itself.
    ///
    /// Errors here fail the session, not the batch; a malformed alert
    /// operator counts as a check failure of that indicator.
    fn run_check(
        &self,
        indicator: &Indicator,
        indicator_type: &IndicatorType,
        parameters: &[IndicatorParameter],
        check: &dyn IndicatorCheck,
    ) -> anyhow::Result<(AlertOperator, Vec<f64>)> {
        let operator: AlertOperator = indicator
            .alert_operator
            .parse()
            .map_err(anyhow::Error::new)?;

        let context = CheckContext {
            indicator,
            indicator_type,
            parameters,
        };
        let values = check.execute(&context)?;
        Ok((operator, values))
    }
}
