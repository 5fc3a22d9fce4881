//! Aggregation and persistence of indicator check outcomes.

use tracing::info;

use crate::error::AppResult;
use crate::models::{AlertOperator, IndicatorResult, NewIndicatorResult};
use crate::repositories::ResultRepository;

/// Counts and means of one check run, split by the alert rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSummary {
    pub nb_records: i32,
    pub nb_records_alert: i32,
    pub nb_records_no_alert: i32,
    pub avg_result: Option<f64>,
    pub avg_result_alert: Option<f64>,
    pub avg_result_no_alert: Option<f64>,
}

/// Partitions measured values by the alert rule and computes per-partition
/// aggregates.
///
/// The mean of an empty partition is `None`, never 0.0.
pub fn summarize(operator: AlertOperator, threshold: f64, values: &[f64]) -> ResultSummary {
    let (alert, no_alert): (Vec<f64>, Vec<f64>) =
        values.iter().partition(|v| operator.evaluate(**v, threshold));

    ResultSummary {
        nb_records: values.len() as i32,
        nb_records_alert: alert.len() as i32,
        nb_records_no_alert: no_alert.len() as i32,
        avg_result: mean(values),
        avg_result_alert: mean(&alert),
        avg_result_no_alert: mean(&no_alert),
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[derive(Clone)]
pub struct ResultRecorder {
    results: ResultRepository,
}

impl ResultRecorder {
    pub fn new(results: ResultRepository) -> Self {
        Self { results }
    }

    /// Summarizes the values of one check run and stores the result row.
    ///
    /// The operator and threshold are snapshotted into the row, so later
    /// edits to the indicator's alert rule do not rewrite history. Each
    /// session takes exactly one result; a second call for the same
    /// session fails with `AppError::Duplicate`.
    pub fn record(
        &self,
        session_id: i32,
        indicator_id: i32,
        operator: AlertOperator,
        threshold: f64,
        values: &[f64],
    ) -> AppResult<IndicatorResult> {
        let summary = summarize(operator, threshold, values);

        let result = self.results.create(NewIndicatorResult {
            indicator_id,
            session_id,
            alert_operator: operator.symbol().to_string(),
            alert_threshold: threshold,
            nb_records: summary.nb_records,
            nb_records_alert: summary.nb_records_alert,
            nb_records_no_alert: summary.nb_records_no_alert,
            avg_result: summary.avg_result,
            avg_result_alert: summary.avg_result_alert,
            avg_result_no_alert: summary.avg_result_no_alert,
        })?;

        info!(
            session_id,
            indicator_id,
            nb_records = result.nb_records,
            nb_records_alert = result.nb_records_alert,
            "Result recorded"
        );
        Ok(result)
    }

    pub fn find_by_session(&self, session_id: i32) -> AppResult<Option<IndicatorResult>> {
        self.results.find_by_session(session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_partitions_by_operator() {
        let summary = summarize(AlertOperator::Gt, 10.0, &[1.0, 5.0, 9.0, 15.0]);

        assert_eq!(summary.nb_records, 4);
        assert_eq!(summary.nb_records_alert, 1);
        assert_eq!(summary.nb_records_no_alert, 3);
        assert_eq!(summary.avg_result, Some(7.5));
        assert_eq!(summary.avg_result_alert, Some(15.0));
        assert_eq!(summary.avg_result_no_alert, Some(5.0));
    }

    #[test]
    fn test_summarize_empty_input_yields_null_means() {
        let summary = summarize(AlertOperator::Gt, 10.0, &[]);

        assert_eq!(summary.nb_records, 0);
        assert_eq!(summary.nb_records_alert, 0);
        assert_eq!(summary.nb_records_no_alert, 0);
        assert_eq!(summary.avg_result, None);
        assert_eq!(summary.avg_result_alert, None);
        assert_eq!(summary.avg_result_no_alert, None);
    }

    #[test]
    fn test_summarize_all_values_in_one_partition() {
        let summary = summarize(AlertOperator::Lt, 100.0, &[1.0, 2.0, 3.0]);

        assert_eq!(summary.nb_records_alert, 3);
        assert_eq!(summary.nb_records_no_alert, 0);
        assert_eq!(summary.avg_result_alert, Some(2.0));
        assert_eq!(summary.avg_result_no_alert, None);
    }

    #[test]
    fn test_summarize_boundary_value_follows_operator() {
        let strict = summarize(AlertOperator::Gt, 10.0, &[10.0]);
        assert_eq!(strict.nb_records_alert, 0);

        let inclusive = summarize(AlertOperator::Ge, 10.0, &[10.0]);
        assert_eq!(inclusive.nb_records_alert, 1);
    }

    // ========================================================================
    // Property-based tests
    // ========================================================================

    use proptest::prelude::*;

    fn arb_operator() -> impl Strategy<Value = AlertOperator> {
        prop_oneof![
            Just(AlertOperator::Eq),
            Just(AlertOperator::Ne),
            Just(AlertOperator::Gt),
            Just(AlertOperator::Ge),
            Just(AlertOperator::Lt),
            Just(AlertOperator::Le),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Partition counts always sum back to the input length.
        #[test]
        fn prop_partition_counts_sum_to_total(
            operator in arb_operator(),
            threshold in -1000.0f64..1000.0,
            values in prop::collection::vec(-1000.0f64..1000.0, 0..50),
        ) {
            let summary = summarize(operator, threshold, &values);

            prop_assert_eq!(summary.nb_records as usize, values.len());
            prop_assert_eq!(
                summary.nb_records_alert + summary.nb_records_no_alert,
                summary.nb_records
            );
        }

        /// A mean is present exactly when its partition is non-empty, and
        /// always lies within the input value range.
        #[test]
        fn prop_means_match_partition_occupancy(
            operator in arb_operator(),
            threshold in -1000.0f64..1000.0,
            values in prop::collection::vec(-1000.0f64..1000.0, 0..50),
        ) {
            let summary = summarize(operator, threshold, &values);

            prop_assert_eq!(summary.avg_result.is_some(), !values.is_empty());
            prop_assert_eq!(
                summary.avg_result_alert.is_some(),
                summary.nb_records_alert > 0
            );
            prop_assert_eq!(
                summary.avg_result_no_alert.is_some(),
                summary.nb_records_no_alert > 0
            );

            if let Some(avg) = summary.avg_result {
                let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(avg >= min - 1e-9 && avg <= max + 1e-9);
            }
        }
    }
}
