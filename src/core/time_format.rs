use crate::domain::ports::TimestampParser;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt;

/// How the `timestamp` capture is turned into an absolute time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimeFormat {
    /// Raw epoch-seconds digits, e.g. `1677468390`.
    #[default]
    EpochSeconds,
    /// A `chrono` strftime format, e.g. `%Y%m%d%H%M%S`.
    Strftime(String),
}

impl TimeFormat {
    /// `"epoch"` (or an empty string) selects [`TimeFormat::EpochSeconds`];
    /// anything else is treated as a strftime format.
    pub fn from_spec(spec: &str) -> Self {
        let spec = spec.trim();
        if spec.is_empty() || spec.eq_ignore_ascii_case("epoch") {
            TimeFormat::EpochSeconds
        } else {
            TimeFormat::Strftime(spec.to_string())
        }
    }
}

impl TimestampParser for TimeFormat {
    fn parse_timestamp(&self, raw: &str) -> Option<DateTime<Utc>> {
        match self {
            TimeFormat::EpochSeconds => {
                let seconds = raw.parse::<i64>().ok()?;
                DateTime::from_timestamp(seconds, 0)
            }
            TimeFormat::Strftime(format) => {
                // 有時區資訊就用，否則視為 UTC
                if let Ok(dt) = DateTime::parse_from_str(raw, format) {
                    return Some(dt.with_timezone(&Utc));
                }
                if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                    return Some(naive.and_utc());
                }
                NaiveDate::parse_from_str(raw, format)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .map(|naive| naive.and_utc())
            }
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFormat::EpochSeconds => f.write_str("epoch"),
            TimeFormat::Strftime(format) => f.write_str(format),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_seconds() {
        let parsed = TimeFormat::EpochSeconds.parse_timestamp("1677468390").unwrap();
        assert_eq!(parsed.timestamp(), 1677468390);

        assert!(TimeFormat::EpochSeconds.parse_timestamp("16774x8390").is_none());
    }

    #[test]
    fn test_strftime_without_offset_is_utc() {
        let format = TimeFormat::from_spec("%Y%m%d%H%M%S");
        let parsed = format.parse_timestamp("20230227032630").unwrap();
        assert_eq!(parsed.timestamp(), 1677468390);
    }

    #[test]
    fn test_strftime_with_offset() {
        let format = TimeFormat::from_spec("%Y-%m-%dT%H:%M:%S%z");
        let parsed = format.parse_timestamp("2023-02-27T04:26:30+0100").unwrap();
        assert_eq!(parsed.timestamp(), 1677468390);
    }

    #[test]
    fn test_date_only_format() {
        let format = TimeFormat::from_spec("%Y-%m-%d");
        let parsed = format.parse_timestamp("2023-02-27").unwrap();
        assert_eq!(parsed.timestamp(), 1677456000);
    }

    #[test]
    fn test_unparseable_returns_none() {
        let format = TimeFormat::from_spec("%Y%m%d%H%M%S");
        assert!(format.parse_timestamp("20231399000000").is_none());
    }

    #[test]
    fn test_from_spec() {
        assert_eq!(TimeFormat::from_spec("epoch"), TimeFormat::EpochSeconds);
        assert_eq!(TimeFormat::from_spec(""), TimeFormat::EpochSeconds);
        assert_eq!(
            TimeFormat::from_spec("%s"),
            TimeFormat::Strftime("%s".to_string())
        );
    }
}
