pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{time_range_from_config, TomlConfig};

pub use crate::core::extract::{TimestampExtractor, DEFAULT_PATTERN};
pub use crate::core::render::{render, OutputFormat};
pub use crate::core::selector::{select, SelectOptions, TimeRangeSelector};
pub use crate::core::time_format::TimeFormat;
pub use crate::domain::model::{Bucket, TimeRange, TimestampKey};
pub use crate::utils::error::{Result, SelectError};
