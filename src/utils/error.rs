use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelectError {
    #[error("Invalid time range: {reason}")]
    InvalidRange { reason: String },

    #[error("Invalid timestamp pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Pattern '{pattern}' has no capture group named 'timestamp'")]
    MissingTimestampCapture { pattern: String },

    #[error("Cannot parse time for '{field}': {value}")]
    InvalidTimeArgument { field: String, value: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Range,
    Configuration,
    System,
}

/// 使用者可修正的錯誤為 High，系統錯誤為 Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl SelectError {
    pub fn invalid_range(reason: impl Into<String>) -> Self {
        SelectError::InvalidRange {
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SelectError::InvalidRange { .. } | SelectError::InvalidTimeArgument { .. } => {
                ErrorCategory::Range
            }
            SelectError::InvalidPattern { .. }
            | SelectError::MissingTimestampCapture { .. }
            | SelectError::InvalidConfigValueError { .. }
            | SelectError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            SelectError::IoError(_) | SelectError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Range | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SelectError::InvalidRange { .. } => {
                "Pass both --start and --end, with start not later than end".to_string()
            }
            SelectError::InvalidTimeArgument { .. } => {
                "Use epoch seconds, RFC 3339 (2023-02-27T03:27:00Z), YYYY-MM-DD, 'now' or a relative offset like -30s, -5m, -24h".to_string()
            }
            SelectError::InvalidPattern { .. } => {
                "Check the regular expression syntax of --pattern".to_string()
            }
            SelectError::MissingTimestampCapture { .. } => {
                "Add a named group, e.g. (?P<timestamp>\\d+), to the pattern".to_string()
            }
            SelectError::InvalidConfigValueError { field, .. }
            | SelectError::ConfigValidationError { field, .. } => {
                format!("Fix the value of '{}' in the configuration", field)
            }
            SelectError::IoError(_) => {
                "Check that the directory or file exists and is readable".to_string()
            }
            SelectError::SerializationError(_) => "Retry with --format plain".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Range => format!("Requested time range is not usable: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SelectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_errors_are_high_severity() {
        let err = SelectError::invalid_range("start is after end");
        assert_eq!(err.category(), ErrorCategory::Range);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("start is after end"));
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err: SelectError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().starts_with("System error"));
    }

    #[test]
    fn test_configuration_errors_are_high_severity() {
        let err = SelectError::MissingTimestampCapture {
            pattern: r"(\d+)".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(ErrorSeverity::High < ErrorSeverity::Critical);
    }
}
