use std::str::FromStr;

use crate::error::AppError;

/// Comparison operator stored on an indicator and applied per result row.
///
/// A row whose measured value satisfies `value <op> threshold` is counted
/// in the alert partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertOperator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl AlertOperator {
    /// Applies the operator to a measured value and the indicator threshold.
    pub fn evaluate(self, value: f64, threshold: f64) -> bool {
        match self {
            AlertOperator::Eq => value == threshold,
            AlertOperator::Ne => value != threshold,
            AlertOperator::Gt => value > threshold,
            AlertOperator::Ge => value >= threshold,
            AlertOperator::Lt => value < threshold,
            AlertOperator::Le => value <= threshold,
        }
    }

    /// Symbol as stored in the `indicator.alert_operator` column,
    /// in the SQL spelling.
    pub const fn symbol(self) -> &'static str {
        match self {
            AlertOperator::Eq => "=",
            AlertOperator::Ne => "<>",
            AlertOperator::Gt => ">",
            AlertOperator::Ge => ">=",
            AlertOperator::Lt => "<",
            AlertOperator::Le => "<=",
        }
    }
}

impl FromStr for AlertOperator {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "==" | "=" => Ok(AlertOperator::Eq),
            "!=" | "<>" => Ok(AlertOperator::Ne),
            ">" => Ok(AlertOperator::Gt),
            ">=" => Ok(AlertOperator::Ge),
            "<" => Ok(AlertOperator::Lt),
            "<=" => Ok(AlertOperator::Le),
            other => Err(AppError::Validation {
                field: "alert_operator".to_string(),
                reason: format!("Unknown comparison operator: {}", other),
            }),
        }
    }
}

impl std::fmt::Display for AlertOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_symbols() {
        assert_eq!("==".parse::<AlertOperator>().unwrap(), AlertOperator::Eq);
        assert_eq!("=".parse::<AlertOperator>().unwrap(), AlertOperator::Eq);
        assert_eq!("!=".parse::<AlertOperator>().unwrap(), AlertOperator::Ne);
        assert_eq!("<>".parse::<AlertOperator>().unwrap(), AlertOperator::Ne);
        assert_eq!(">".parse::<AlertOperator>().unwrap(), AlertOperator::Gt);
        assert_eq!(">=".parse::<AlertOperator>().unwrap(), AlertOperator::Ge);
        assert_eq!("<".parse::<AlertOperator>().unwrap(), AlertOperator::Lt);
        assert_eq!("<=".parse::<AlertOperator>().unwrap(), AlertOperator::Le);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(" > ".parse::<AlertOperator>().unwrap(), AlertOperator::Gt);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let error = "~=".parse::<AlertOperator>().unwrap_err();
        assert!(error.to_string().contains("alert_operator"));
    }

    #[test]
    fn test_evaluate_boundaries() {
        assert!(AlertOperator::Gt.evaluate(10.1, 10.0));
        assert!(!AlertOperator::Gt.evaluate(10.0, 10.0));
        assert!(AlertOperator::Ge.evaluate(10.0, 10.0));
        assert!(AlertOperator::Lt.evaluate(9.9, 10.0));
        assert!(!AlertOperator::Lt.evaluate(10.0, 10.0));
        assert!(AlertOperator::Le.evaluate(10.0, 10.0));
        assert!(AlertOperator::Eq.evaluate(10.0, 10.0));
        assert!(AlertOperator::Ne.evaluate(10.5, 10.0));
    }

    #[test]
    fn test_display_round_trip() {
        for op in [
            AlertOperator::Eq,
            AlertOperator::Ne,
            AlertOperator::Gt,
            AlertOperator::Ge,
            AlertOperator::Lt,
            AlertOperator::Le,
        ] {
            assert_eq!(op.symbol().parse::<AlertOperator>().unwrap(), op);
        }
    }
}
