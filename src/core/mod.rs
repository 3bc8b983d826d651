pub mod extract;
pub mod render;
pub mod selector;
pub mod time_format;

pub use crate::domain::model::{Bucket, TimeRange, TimestampKey};
pub use crate::domain::ports::{ConfigProvider, ItemSource, TimestampParser};
pub use crate::utils::error::Result;
