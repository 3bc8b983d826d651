use crate::domain::model::Bucket;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One item per line
    #[default]
    Plain,
    /// Array of `{ "key": ..., "items": [...] }`
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => f.write_str("plain"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

pub fn render(buckets: &[Bucket], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(buckets
            .iter()
            .flat_map(|bucket| bucket.items.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(buckets)?),
    }
}
