use crate::config::toml_config::TomlConfig;
use crate::core::render::OutputFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_pattern, Validate};
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "capture-range")]
#[command(about = "Select the rotated capture files that cover a time range")]
pub struct CliConfig {
    /// Items to select from; falls back to --dir, then one item per stdin line
    pub items: Vec<String>,

    /// Range start: epoch seconds, RFC 3339, YYYY-MM-DD, 'now' or -30s/-5m/-24h/-7d
    #[arg(short, long, allow_hyphen_values = true)]
    pub start: Option<String>,

    /// Range end, same forms as --start
    #[arg(short, long, allow_hyphen_values = true)]
    pub end: Option<String>,

    /// Regex with a `timestamp` named group and an optional `subsec` group
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// strftime format of the `timestamp` capture (default: epoch seconds)
    #[arg(short = 'f', long)]
    pub time_format: Option<String>,

    /// Use the `timestamp` capture as a literal numeric key
    #[arg(long, overrides_with = "no_numeric")]
    pub numeric: bool,

    /// Parse the `timestamp` capture even if the config file sets numeric keys
    #[arg(long, overrides_with = "numeric")]
    pub no_numeric: bool,

    /// Directory whose file names are the items
    #[arg(short, long)]
    pub dir: Option<String>,

    /// TOML configuration file; command line values take precedence
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Show each item's timestamp key without selecting
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// 以設定檔補齊命令列未指定的欄位
    pub fn merge_file(&mut self, file: TomlConfig) {
        let TomlConfig {
            selection,
            range,
            source,
            output,
        } = file;

        self.pattern = self.pattern.take().or(selection.pattern);
        self.time_format = self.time_format.take().or(selection.time_format);
        if !self.no_numeric {
            self.numeric = self.numeric || selection.timestamp_is_numeric.unwrap_or(false);
        }
        self.start = self.start.take().or(range.start);
        self.end = self.end.take().or(range.end);
        self.format = self.format.or(output.format);

        // 命令列已指定來源（items 或 --dir）時，忽略設定檔的 [source]
        if self.items.is_empty() && self.dir.is_none() {
            match source.items {
                Some(items) if !items.is_empty() => self.items = items,
                _ => self.dir = source.directory,
            }
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

impl ConfigProvider for CliConfig {
    fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    fn time_format(&self) -> Option<&str> {
        self.time_format.as_deref()
    }

    fn timestamp_is_numeric(&self) -> bool {
        self.numeric && !self.no_numeric
    }

    fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    fn end(&self) -> Option<&str> {
        self.end.as_deref()
    }

    fn directory(&self) -> Option<&str> {
        self.dir.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(pattern) = &self.pattern {
            validate_pattern("pattern", pattern)?;
        }

        if let Some(time_format) = &self.time_format {
            validate_non_empty_string("time_format", time_format)?;
        }

        if let Some(dir) = &self.dir {
            validate_path("dir", dir)?;
        }

        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }

        Ok(())
    }
}
