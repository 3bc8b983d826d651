use crate::utils::error::{Result, SelectError};
use regex::Regex;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SelectError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SelectError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SelectError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 確認正規表達式可編譯，且包含 `timestamp` 具名群組
pub fn validate_pattern(field_name: &str, pattern: &str) -> Result<()> {
    let regex = Regex::new(pattern).map_err(|e| SelectError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: pattern.to_string(),
        reason: format!("Invalid regular expression: {}", e),
    })?;

    if !regex.capture_names().flatten().any(|name| name == "timestamp") {
        return Err(SelectError::MissingTimestampCapture {
            pattern: pattern.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("source.directory", "/var/spool/pcap").is_ok());
        assert!(validate_path("source.directory", "").is_err());
        assert!(validate_path("source.directory", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_pattern() {
        assert!(validate_pattern("selection.pattern", r"(?P<timestamp>\d+)\.pcap").is_ok());
        assert!(validate_pattern("selection.pattern", r"(\d+)\.pcap").is_err());
        assert!(validate_pattern("selection.pattern", r"(?P<timestamp>\d+").is_err());
    }
}
