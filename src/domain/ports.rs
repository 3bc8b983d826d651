use crate::utils::error::Result;
use chrono::{DateTime, Utc};

/// 將擷取到的時間字串轉為絕對時間；失敗時回傳 `None`
pub trait TimestampParser: Send + Sync {
    fn parse_timestamp(&self, raw: &str) -> Option<DateTime<Utc>>;
}

/// 提供待篩選的項目名稱（例如目錄中的檔名）
pub trait ItemSource {
    fn items(&self) -> Result<Vec<String>>;
}

pub trait ConfigProvider {
    fn pattern(&self) -> Option<&str>;
    fn time_format(&self) -> Option<&str>;
    fn timestamp_is_numeric(&self) -> bool;
    fn start(&self) -> Option<&str>;
    fn end(&self) -> Option<&str>;
    fn directory(&self) -> Option<&str>;
}
