use crate::core::extract::{TimestampExtractor, DEFAULT_PATTERN};
use crate::core::time_format::TimeFormat;
use crate::domain::model::{Bucket, TimeRange, TimestampKey};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use std::collections::{BTreeMap, BTreeSet};

/// Optional knobs of a selection; `Default` gives the `.pcap` epoch-seconds setup.
#[derive(Debug, Clone, Default)]
pub struct SelectOptions {
    pub pattern: Option<String>,
    pub time_format: Option<String>,
    pub timestamp_is_numeric: bool,
}

/// Picks the items whose spans together cover a requested time range.
///
/// Each item is assumed to hold data from its own timestamp up to the next
/// item's timestamp, so besides the items inside the range the selector also
/// returns the item that starts before the range and runs into it.
#[derive(Debug, Clone, Default)]
pub struct TimeRangeSelector {
    extractor: TimestampExtractor,
}

impl TimeRangeSelector {
    pub fn new(extractor: TimestampExtractor) -> Self {
        Self { extractor }
    }

    pub fn from_options(options: &SelectOptions) -> Result<Self> {
        let pattern = options.pattern.as_deref().unwrap_or(DEFAULT_PATTERN);
        let format = options
            .time_format
            .as_deref()
            .map(TimeFormat::from_spec)
            .unwrap_or_default();

        let extractor =
            TimestampExtractor::compile(pattern, format, options.timestamp_is_numeric)?;
        Ok(Self::new(extractor))
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::from_options(&SelectOptions {
            pattern: config.pattern().map(str::to_string),
            time_format: config.time_format().map(str::to_string),
            timestamp_is_numeric: config.timestamp_is_numeric(),
        })
    }

    pub fn extractor(&self) -> &TimestampExtractor {
        &self.extractor
    }

    /// Group items by timestamp key; items without a key are dropped.
    pub fn bucketize<S: AsRef<str>>(&self, items: &[S]) -> BTreeMap<TimestampKey, Vec<String>> {
        let mut buckets: BTreeMap<TimestampKey, Vec<String>> = BTreeMap::new();

        for item in items {
            let item = item.as_ref();
            if let Some(key) = self.extractor.key_for(item) {
                buckets.entry(key).or_default().push(item.to_string());
            }
        }

        buckets
    }

    /// Selected buckets in ascending key order.
    pub fn select_buckets<S: AsRef<str>>(&self, items: &[S], range: &TimeRange) -> Vec<Bucket> {
        let mut buckets = self.bucketize(items);
        let selected = covering_keys(buckets.keys(), range);

        tracing::debug!(
            "Selected {} of {} timestamp keys from {} items",
            selected.len(),
            buckets.len(),
            items.len()
        );

        selected
            .into_iter()
            .filter_map(|key| {
                let items = buckets.remove(&key)?;
                Some(Bucket { key, items })
            })
            .collect()
    }

    /// Selected items, ascending by timestamp key and in input order within a key.
    pub fn select<S: AsRef<str>>(&self, items: &[S], range: &TimeRange) -> Vec<String> {
        self.select_buckets(items, range)
            .into_iter()
            .flat_map(|bucket| bucket.items)
            .collect()
    }
}

/// One-shot selection with explicit bounds and options.
pub fn select<S: AsRef<str>>(
    items: &[S],
    start: chrono::DateTime<chrono::Utc>,
    end: chrono::DateTime<chrono::Utc>,
    options: &SelectOptions,
) -> Result<Vec<String>> {
    let range = TimeRange::new(start, end)?;
    let selector = TimeRangeSelector::from_options(options)?;
    Ok(selector.select(items, &range))
}

/// Interval scan over keys in ascending order.
///
/// Range comparisons use whole seconds; sub-second parts only order the keys.
fn covering_keys<'a, I>(keys: I, range: &TimeRange) -> BTreeSet<TimestampKey>
where
    I: IntoIterator<Item = &'a TimestampKey>,
{
    let start = range.start_seconds();
    let end = range.end_seconds();

    let mut selected = BTreeSet::new();
    let mut previous: Option<&TimestampKey> = None;
    let mut previous_found = false;

    for current in keys {
        let seconds = current.seconds();

        if start <= seconds && seconds <= end {
            selected.insert(current.clone());

            if !previous_found {
                match previous {
                    Some(prev) if seconds != start => {
                        selected.insert(prev.clone());
                        previous_found = true;
                    }
                    _ if seconds == start => previous_found = true,
                    _ => {}
                }
            }
        } else if !previous_found {
            // 區間完全落在前一個檔案的涵蓋範圍內
            if let Some(prev) = previous {
                if prev.seconds() < start && seconds > end {
                    selected.insert(prev.clone());
                    previous_found = true;
                }
            }
        }

        previous = Some(current);
    }

    // 最後一個檔案仍在寫入，區間在其之後
    if selected.is_empty() {
        if let Some(last) = previous {
            if last.seconds() <= end {
                selected.insert(last.clone());
            }
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(seconds, 0).unwrap()
    }

    fn range(start: i64, end: i64) -> TimeRange {
        TimeRange::new(at(start), at(end)).unwrap()
    }

    fn keys(values: &[&str]) -> Vec<TimestampKey> {
        values
            .iter()
            .map(|v| TimestampKey::from_numeric(v).unwrap())
            .collect()
    }

    fn scan(values: &[&str], start: i64, end: i64) -> Vec<String> {
        covering_keys(keys(values).iter(), &range(start, end))
            .into_iter()
            .map(|k| k.to_string())
            .collect()
    }

    #[test]
    fn test_boundary_before_range_is_included() {
        assert_eq!(scan(&["100", "200", "300"], 150, 250), vec!["100", "200"]);
    }

    #[test]
    fn test_key_equal_to_start_needs_no_boundary() {
        assert_eq!(scan(&["100", "200", "300"], 200, 250), vec!["200"]);
    }

    #[test]
    fn test_range_inside_single_span() {
        assert_eq!(scan(&["100", "200", "300"], 210, 250), vec!["200"]);
    }

    #[test]
    fn test_range_after_all_keys_takes_last() {
        assert_eq!(scan(&["100", "200", "300"], 400, 500), vec!["300"]);
    }

    #[test]
    fn test_range_before_all_keys_is_empty() {
        assert!(scan(&["100", "200", "300"], 10, 50).is_empty());
    }

    #[test]
    fn test_first_key_inside_range_without_previous() {
        assert_eq!(scan(&["100", "200", "300"], 50, 150), vec!["100"]);
    }

    #[test]
    fn test_whole_span_of_keys() {
        assert_eq!(
            scan(&["100", "200", "300"], 100, 300),
            vec!["100", "200", "300"]
        );
    }

    #[test]
    fn test_subsecond_keys_compared_by_whole_seconds() {
        // 200.5 的整數秒為 200，視為等於 start
        assert_eq!(scan(&["100", "200.5", "300"], 200, 250), vec!["200.5"]);
    }

    #[test]
    fn test_empty_keys() {
        assert!(scan(&[], 100, 200).is_empty());
    }
}
