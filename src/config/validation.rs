//! Configuration validation logic
//!
//! Validation methods for all configuration structures, so a bad value is
//! rejected at startup instead of surfacing mid-run.

use crate::config::error::ConfigError;
use crate::config::settings::{ApiConfig, DatabaseConfig, FileSettings, LoggerSettings, Settings};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - URL must not be empty
    /// - Max connections must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database path is required. Specify a SQLite file path or :memory:.",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        Ok(())
    }
}

impl ApiConfig {
    /// Validate credential API configuration
    ///
    /// # Validation Rules
    /// - URL must not be empty and must be an http(s) endpoint
    /// - Timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::validation(
                "api.url",
                "Credential API URL is required.",
            ));
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ConfigError::validation(
                "api.url",
                "Invalid API URL. Expected format: http(s)://host[:port]/path",
            ));
        }

        if self.timeout == 0 {
            return Err(ConfigError::validation(
                "api.timeout",
                "API timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    /// Validate file settings
    fn validate(&self) -> Result<(), ConfigError> {
        // If file logging is enabled, path must not be empty
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        self.file.validate()?;

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// This method validates all sub-configurations and returns the first
    /// validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;
        self.api.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::ConsoleSettings;

    fn valid_database() -> DatabaseConfig {
        DatabaseConfig {
            url: "dqtrack.db".to_string(),
            ..Default::default()
        }
    }

    fn valid_api() -> ApiConfig {
        ApiConfig {
            url: "http://localhost:5433/graphql".to_string(),
            ..Default::default()
        }
    }

    // ========================================================================
    // DatabaseConfig validation tests
    // ========================================================================

    #[test]
    fn test_database_config_valid() {
        assert!(valid_database().validate().is_ok());
    }

    #[test]
    fn test_database_config_empty_url() {
        let config = DatabaseConfig::default();
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "database.url")
        );
    }

    #[test]
    fn test_database_config_zero_connections() {
        let config = DatabaseConfig {
            max_connections: 0,
            ..valid_database()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationError { field, .. } if field == "database.max_connections"
        ));
    }

    // ========================================================================
    // ApiConfig validation tests
    // ========================================================================

    #[test]
    fn test_api_config_valid() {
        assert!(valid_api().validate().is_ok());

        let https = ApiConfig {
            url: "https://dq.example.com/graphql".to_string(),
            ..Default::default()
        };
        assert!(https.validate().is_ok());
    }

    #[test]
    fn test_api_config_empty_url() {
        let config = ApiConfig::default();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { field, .. } if field == "api.url"));
    }

    #[test]
    fn test_api_config_invalid_scheme() {
        let config = ApiConfig {
            url: "ftp://example.com/graphql".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { field, .. } if field == "api.url"));
    }

    #[test]
    fn test_api_config_zero_timeout() {
        let config = ApiConfig {
            timeout: 0,
            ..valid_api()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "api.timeout")
        );
    }

    // ========================================================================
    // LoggerSettings validation tests
    // ========================================================================

    #[test]
    fn test_logger_settings_valid() {
        assert!(LoggerSettings::default().validate().is_ok());
    }

    #[test]
    fn test_logger_settings_invalid_level() {
        let settings = LoggerSettings {
            level: "verbose".to_string(),
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "logger.level")
        );
    }

    #[test]
    fn test_logger_settings_level_case_insensitive() {
        let settings = LoggerSettings {
            level: "DEBUG".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_file_settings_enabled_requires_path() {
        let settings = LoggerSettings {
            file: FileSettings {
                enabled: true,
                path: "  ".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationError { field, .. } if field == "logger.file.path"
        ));
    }

    #[test]
    fn test_file_settings_invalid_format() {
        let settings = LoggerSettings {
            file: FileSettings {
                format: "xml".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationError { field, .. } if field == "logger.file.format"
        ));
    }

    // ========================================================================
    // Settings validation tests
    // ========================================================================

    #[test]
    fn test_settings_valid() {
        let settings = Settings {
            database: valid_database(),
            api: valid_api(),
            logger: LoggerSettings {
                console: ConsoleSettings {
                    enabled: true,
                    colored: false,
                },
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_first_error_wins() {
        // Both database and api are invalid; database is checked first.
        let settings = Settings::default();
        let err = settings.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "database.url")
        );
    }
}
