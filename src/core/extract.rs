use crate::core::time_format::TimeFormat;
use crate::domain::model::TimestampKey;
use crate::domain::ports::TimestampParser;
use crate::utils::error::{Result, SelectError};
use regex::Regex;

/// Digits run of 6+ followed by `.pcap`, optionally with a fractional-seconds suffix.
pub const DEFAULT_PATTERN: &str = r"(?P<timestamp>\d{6,})(?P<subsec>\.\d+)?\.pcap";

pub const TIMESTAMP_GROUP: &str = "timestamp";
pub const SUBSEC_GROUP: &str = "subsec";

/// 為何某個項目沒有產生時間戳鍵
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoMatch,
    UnparseableTimestamp,
    InvalidSubsec,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoMatch => "does not match pattern",
            SkipReason::UnparseableTimestamp => "timestamp cannot be parsed",
            SkipReason::InvalidSubsec => "sub-second fragment is not a fraction",
        }
    }
}

/// Turns item labels into timestamp keys.
#[derive(Debug, Clone)]
pub struct TimestampExtractor {
    pattern: Regex,
    format: TimeFormat,
    numeric: bool,
}

impl TimestampExtractor {
    pub fn new(pattern: Regex, format: TimeFormat, numeric: bool) -> Result<Self> {
        let has_timestamp = pattern
            .capture_names()
            .flatten()
            .any(|name| name == TIMESTAMP_GROUP);

        if !has_timestamp {
            return Err(SelectError::MissingTimestampCapture {
                pattern: pattern.as_str().to_string(),
            });
        }

        Ok(Self {
            pattern,
            format,
            numeric,
        })
    }

    pub fn compile(pattern: &str, format: TimeFormat, numeric: bool) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| SelectError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Self::new(regex, format, numeric)
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn format(&self) -> &TimeFormat {
        &self.format
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    /// Derive the key for one item, or the reason it has none.
    pub fn extract(&self, item: &str) -> std::result::Result<TimestampKey, SkipReason> {
        let caps = self.pattern.captures(item).ok_or(SkipReason::NoMatch)?;
        let raw = caps
            .name(TIMESTAMP_GROUP)
            .map(|m| m.as_str())
            .ok_or(SkipReason::NoMatch)?;

        if self.numeric {
            return TimestampKey::from_numeric(raw).ok_or(SkipReason::UnparseableTimestamp);
        }

        let subsec = caps.name(SUBSEC_GROUP).map(|m| m.as_str()).unwrap_or("");
        let parsed = self
            .format
            .parse_timestamp(raw)
            .ok_or(SkipReason::UnparseableTimestamp)?;

        TimestampKey::from_parts(parsed.timestamp(), subsec).ok_or(SkipReason::InvalidSubsec)
    }

    pub fn key_for(&self, item: &str) -> Option<TimestampKey> {
        match self.extract(item) {
            Ok(key) => Some(key),
            Err(reason) => {
                tracing::trace!("Skipping '{}': {}", item, reason.as_str());
                None
            }
        }
    }
}

impl Default for TimestampExtractor {
    fn default() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_PATTERN).expect("default pattern is valid"),
            format: TimeFormat::EpochSeconds,
            numeric: false,
        }
    }
}
