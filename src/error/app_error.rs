use crate::error::DatabaseErrorConverter;
use thiserror::Error;

/// Application-wide error type that represents all possible errors in the system.
///
/// This enum provides comprehensive error handling with structured information
/// for different error scenarios, supporting automatic conversion from anyhow
/// and detailed context for debugging and operator feedback.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Duplicate entry error for unique constraint violations
    #[error("Duplicate entry: {entity}.{field} already exists")]
    Duplicate { entity: String, field: String },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// No batch exists for the owner, so there is nothing to stop or fail
    #[error("No active batch for batch owner {batch_owner_id}")]
    NoActiveBatch { batch_owner_id: i32 },

    /// No session exists for the batch/indicator pair
    #[error("No active session for batch {batch_id} and indicator {indicator_id}")]
    NoActiveSession { batch_id: i32, indicator_id: i32 },

    /// Attempted status transition out of a terminal state
    #[error("Invalid {entity} status transition: {from} -> {to}")]
    InvalidTransition {
        entity: String,
        from: String,
        to: String,
    },

    /// Data source type id not present in the backend registry
    #[error("Unsupported data source type: {type_id}")]
    UnsupportedBackend { type_id: i32 },

    /// Backend connection attempt failed; the driver error is preserved as-is
    #[error("Connection to {backend} failed")]
    Connection {
        backend: String,
        #[source]
        source: anyhow::Error,
    },

    /// Remote API request error with operation context
    #[error("API request failed: {operation}")]
    Api {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Seed dataset could not be read or applied
    #[error("Seed loading failed for {path}: {reason}")]
    Seed { path: String, reason: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<diesel::r2d2::PoolError> for AppError {
    fn from(error: diesel::r2d2::PoolError) -> Self {
        AppError::ConnectionPool {
            source: anyhow::anyhow!("{}", error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = AppError::NotFound {
            entity: "batch_owner".to_string(),
            field: "id".to_string(),
            value: "42".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Resource not found: batch_owner with id=42"
        );
    }

    #[test]
    fn test_no_active_batch_display() {
        let error = AppError::NoActiveBatch { batch_owner_id: 7 };
        assert_eq!(error.to_string(), "No active batch for batch owner 7");
    }

    #[test]
    fn test_invalid_transition_display() {
        let error = AppError::InvalidTransition {
            entity: "batch".to_string(),
            from: "Stopped".to_string(),
            to: "Stopped".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid batch status transition: Stopped -> Stopped"
        );
    }

    #[test]
    fn test_unsupported_backend_display() {
        let error = AppError::UnsupportedBackend { type_id: 99 };
        assert_eq!(error.to_string(), "Unsupported data source type: 99");
    }

    #[test]
    fn test_connection_preserves_source() {
        let error = AppError::Connection {
            backend: "Teradata".to_string(),
            source: anyhow::anyhow!("login timeout"),
        };
        assert_eq!(error.to_string(), "Connection to Teradata failed");
        let source = std::error::Error::source(&error).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("login timeout"));
    }
}
