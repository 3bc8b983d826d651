#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::domain::model::TimeRange;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::time::parse_time_arg;

/// 依設定解析出時間區間；缺少任一端點即為錯誤
pub fn time_range_from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<TimeRange> {
    let start = config
        .start()
        .map(|value| parse_time_arg("start", value))
        .transpose()?;
    let end = config
        .end()
        .map(|value| parse_time_arg("end", value))
        .transpose()?;

    TimeRange::from_bounds(start, end)
}
