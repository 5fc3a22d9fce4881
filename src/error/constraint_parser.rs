use regex::Regex;
use std::sync::OnceLock;

/// Utility for parsing SQLite constraint violation messages.
///
/// SQLite reports constraint failures as plain text such as
/// `UNIQUE constraint failed: batch_owner.name`. This parser extracts the
/// table and column parts with cached regex patterns.
pub struct ConstraintParser;

/// Compiled regex patterns for constraint parsing, cached for performance
struct RegexPatterns {
    unique: Regex,
    not_null: Regex,
    check: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // Matches "UNIQUE constraint failed: table.column[, table.column...]"
            unique: Regex::new(r"UNIQUE constraint failed: (\w+)\.(\w+)").unwrap(),
            // Matches "NOT NULL constraint failed: table.column"
            not_null: Regex::new(r"NOT NULL constraint failed: (\w+)\.(\w+)").unwrap(),
            // Matches "CHECK constraint failed: name_or_expression"
            check: Regex::new(r"CHECK constraint failed: (\w+)").unwrap(),
        }
    }
}

/// Global regex patterns cache
static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

impl ConstraintParser {
    /// Gets the cached regex patterns, initializing them if necessary
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Parses a unique constraint violation message.
    ///
    /// Multi-column constraints list every column; the first pair identifies
    /// the violated index well enough for error reporting.
    ///
    /// # Arguments
    /// * `message` - The database error message
    ///
    /// # Returns
    /// Optional tuple of (entity, field) if parsing succeeds
    pub fn parse_unique_violation(message: &str) -> Option<(String, String)> {
        let patterns = Self::patterns();
        patterns.unique.captures(message).and_then(|caps| {
            let entity = caps.get(1)?.as_str().to_string();
            let field = caps.get(2)?.as_str().to_string();
            Some((entity, field))
        })
    }

    /// Parses a not null constraint violation message.
    ///
    /// # Arguments
    /// * `message` - The database error message
    ///
    /// # Returns
    /// Optional tuple of (entity, field) if parsing succeeds
    pub fn parse_not_null_violation(message: &str) -> Option<(String, String)> {
        let patterns = Self::patterns();
        patterns.not_null.captures(message).and_then(|caps| {
            let entity = caps.get(1)?.as_str().to_string();
            let field = caps.get(2)?.as_str().to_string();
            Some((entity, field))
        })
    }

    /// Parses a check constraint violation message.
    ///
    /// SQLite reports only the constraint name or the check expression,
    /// never the table.
    ///
    /// # Arguments
    /// * `message` - The database error message
    ///
    /// # Returns
    /// Optional constraint name if parsing succeeds
    pub fn parse_check_violation(message: &str) -> Option<String> {
        let patterns = Self::patterns();
        patterns
            .check
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unique_violation() {
        let message = "UNIQUE constraint failed: batch_owner.name";
        let result = ConstraintParser::parse_unique_violation(message);
        assert_eq!(
            result,
            Some(("batch_owner".to_string(), "name".to_string()))
        );
    }

    #[test]
    fn test_parse_unique_violation_multi_column() {
        let message = "UNIQUE constraint failed: session.batch_id, session.indicator_id";
        let result = ConstraintParser::parse_unique_violation(message);
        assert_eq!(result, Some(("session".to_string(), "batch_id".to_string())));
    }

    #[test]
    fn test_parse_unique_violation_primary_key() {
        let message = "UNIQUE constraint failed: status.id";
        let result = ConstraintParser::parse_unique_violation(message);
        assert_eq!(result, Some(("status".to_string(), "id".to_string())));
    }

    #[test]
    fn test_parse_not_null_violation() {
        let message = "NOT NULL constraint failed: batch.status_id";
        let result = ConstraintParser::parse_not_null_violation(message);
        assert_eq!(result, Some(("batch".to_string(), "status_id".to_string())));
    }

    #[test]
    fn test_parse_check_violation() {
        let message = "CHECK constraint failed: indicator_execution_order_positive";
        let result = ConstraintParser::parse_check_violation(message);
        assert_eq!(
            result,
            Some("indicator_execution_order_positive".to_string())
        );
    }

    #[test]
    fn test_regex_patterns_caching() {
        let patterns1 = ConstraintParser::patterns();
        let patterns2 = ConstraintParser::patterns();
        assert!(std::ptr::eq(patterns1, patterns2));
    }

    #[test]
    fn test_graceful_parsing_failures() {
        let message = "completely unrelated error message";
        assert_eq!(ConstraintParser::parse_unique_violation(message), None);
        assert_eq!(ConstraintParser::parse_not_null_violation(message), None);
        assert_eq!(ConstraintParser::parse_check_violation(message), None);
    }
}
