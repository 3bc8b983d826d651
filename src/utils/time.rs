//! Parsing of user-supplied range bounds (`--start`, `--end`).
//!
//! Supported forms:
//! - `now`
//! - epoch seconds, optionally fractional: `1677468390`, `1677468390.25`
//! - RFC 3339: `2023-02-27T03:26:30Z`
//! - `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DDTHH:MM:SS` (UTC)
//! - `YYYY-MM-DD` (midnight UTC)
//! - relative to now: `-30s`, `-5m`, `-24h`, `-7d`, `-2w`

use crate::domain::model::parse_decimal_seconds;
use crate::utils::error::{Result, SelectError};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

pub fn parse_time_arg(field: &str, input: &str) -> Result<DateTime<Utc>> {
    parse_time_at(input, Utc::now()).ok_or_else(|| SelectError::InvalidTimeArgument {
        field: field.to_string(),
        value: input.to_string(),
    })
}

/// Parse against a fixed "now" so relative forms are deterministic.
pub fn parse_time_at(input: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if input.eq_ignore_ascii_case("now") {
        return Some(now);
    }

    if input.starts_with('-') {
        if let Some(dt) = parse_relative(input, now) {
            return Some(dt);
        }
    }

    if let Some(dt) = parse_epoch(input) {
        return Some(dt);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_epoch(input: &str) -> Option<DateTime<Utc>> {
    let (seconds, nanos) = parse_decimal_seconds(input)?;
    DateTime::from_timestamp(seconds, nanos)
}

fn parse_relative(input: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let body = input.trim_start_matches('-');
    let unit = body.chars().last()?;
    let amount: i64 = body[..body.len() - unit.len_utf8()].parse().ok()?;

    let unit_seconds: i64 = match unit.to_ascii_lowercase() {
        's' => 1,
        'm' => 60,
        'h' => 3_600,
        'd' => 86_400,
        'w' => 604_800,
        _ => return None,
    };

    let offset = Duration::try_seconds(amount.checked_mul(unit_seconds)?)?;
    now.checked_sub_signed(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1677469721, 0).unwrap()
    }

    #[test]
    fn test_epoch_seconds() {
        let dt = parse_time_at("1677468620", now()).unwrap();
        assert_eq!(dt.timestamp(), 1677468620);

        let dt = parse_time_at("1677468620.25", now()).unwrap();
        assert_eq!(dt.timestamp(), 1677468620);
        assert_eq!(dt.timestamp_subsec_nanos(), 250_000_000);
    }

    #[test]
    fn test_negative_epoch_with_fraction() {
        let dt = parse_time_at("-1.5", now()).unwrap();
        assert_eq!(dt.timestamp(), -2);
        assert_eq!(dt.timestamp_subsec_nanos(), 500_000_000);
        assert!(dt < parse_time_at("-1", now()).unwrap());
    }

    #[test]
    fn test_rfc3339_and_plain_dates() {
        let dt = parse_time_at("2023-02-27T03:26:30Z", now()).unwrap();
        assert_eq!(dt.timestamp(), 1677468390);

        let dt = parse_time_at("2023-02-27 03:26:30", now()).unwrap();
        assert_eq!(dt.timestamp(), 1677468390);

        let dt = parse_time_at("2023-02-27", now()).unwrap();
        assert_eq!(dt.timestamp(), 1677456000);
    }

    #[test]
    fn test_relative_offsets() {
        assert_eq!(parse_time_at("-30s", now()).unwrap().timestamp(), 1677469691);
        assert_eq!(parse_time_at("-5m", now()).unwrap().timestamp(), 1677469421);
        assert_eq!(parse_time_at("-1h", now()).unwrap().timestamp(), 1677466121);
        assert_eq!(parse_time_at("-1d", now()).unwrap().timestamp(), 1677383321);
        assert_eq!(parse_time_at("now", now()).unwrap(), now());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(parse_time_at("", now()).is_none());
        assert!(parse_time_at("-5x", now()).is_none());
        assert!(parse_time_at("yesterday", now()).is_none());
        assert!(parse_time_arg("start", "2023-13-01").is_err());
    }
}
