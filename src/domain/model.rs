use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

use crate::utils::error::{Result, SelectError};

const NANOS_DIGITS: usize = 9;
const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// 時間戳鍵：整數秒 + 小數部分，保留原始文字作為分組依據
///
/// Ordering is numeric: whole seconds first, then the fractional part as a value,
/// then the original text so that `1.5` and `1.50` remain distinct buckets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimestampKey {
    seconds: i64,
    nanos: u32,
    text: String,
}

impl TimestampKey {
    /// Key for a parsed timestamp plus a sub-second fragment such as `.123456`.
    ///
    /// A fragment without the leading dot (`25`) is read as `.25`.
    /// Returns `None` if the fragment is not a decimal fraction.
    pub fn from_parts(seconds: i64, subsec: &str) -> Option<Self> {
        let digits = subsec.strip_prefix('.').unwrap_or(subsec);
        if digits.is_empty() {
            return Some(Self {
                seconds,
                nanos: 0,
                text: seconds.to_string(),
            });
        }

        let nanos = parse_fraction_nanos(digits)?;

        Some(Self {
            seconds,
            nanos,
            text: format!("{}.{}", seconds, digits),
        })
    }

    /// Key taken literally from a numeric capture like `169900` or `169900.5`.
    pub fn from_numeric(text: &str) -> Option<Self> {
        let (seconds, nanos) = parse_decimal_seconds(text)?;

        Some(Self {
            seconds,
            nanos,
            text: text.to_string(),
        })
    }

    /// Whole epoch seconds; range decisions are made at this granularity.
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn subsec_nanos(&self) -> u32 {
        self.nanos
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Ord for TimestampKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.seconds
            .cmp(&other.seconds)
            .then(self.nanos.cmp(&other.nanos))
            .then_with(|| self.text.cmp(&other.text))
    }
}

impl PartialOrd for TimestampKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TimestampKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for TimestampKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Split a decimal like `169900.5` or `-1.5` into floored seconds and nanoseconds.
///
/// Negative values borrow from the whole part so that `-1.5` is `(-2, 500_000_000)`.
pub(crate) fn parse_decimal_seconds(text: &str) -> Option<(i64, u32)> {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    let seconds = whole.parse::<i64>().ok()?;
    let nanos = parse_fraction_nanos(fraction)?;

    if whole.starts_with('-') && nanos > 0 {
        Some((seconds.checked_sub(1)?, NANOS_PER_SECOND - nanos))
    } else {
        Some((seconds, nanos))
    }
}

/// Convert fraction digits (`"5"`, `"123456"`) to nanoseconds.
///
/// Digits past nanosecond precision are ignored. An empty string is zero.
fn parse_fraction_nanos(digits: &str) -> Option<u32> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut padded: String = digits.chars().take(NANOS_DIGITS).collect();
    while padded.len() < NANOS_DIGITS {
        padded.push('0');
    }

    padded.parse().ok()
}

/// 要求的時間區間 `[start, end]`，兩端皆包含
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(SelectError::invalid_range(format!(
                "start {} is after end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    /// Build a range from bounds that may not have been supplied.
    pub fn from_bounds(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Result<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end),
            (None, Some(_)) => Err(SelectError::invalid_range("start is missing")),
            (Some(_), None) => Err(SelectError::invalid_range("end is missing")),
            (None, None) => Err(SelectError::invalid_range("start and end are missing")),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn start_seconds(&self) -> i64 {
        self.start.timestamp()
    }

    pub fn end_seconds(&self) -> i64 {
        self.end.timestamp()
    }
}

/// Items sharing one timestamp key, in the order they were supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub key: TimestampKey,
    pub items: Vec<String>,
}
