use crate::core::render::OutputFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SelectError};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_pattern, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub range: RangeConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub pattern: Option<String>,
    pub time_format: Option<String>,
    pub timestamp_is_numeric: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RangeConfig {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub directory: Option<String>,
    pub items: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SelectError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SelectError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CAPTURE_DIR})
    fn substitute_env_vars(content: &str) -> String {
        use regex::{Captures, Regex};
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

        re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(pattern) = &self.selection.pattern {
            validate_pattern("selection.pattern", pattern)?;
        }

        if let Some(time_format) = &self.selection.time_format {
            validate_non_empty_string("selection.time_format", time_format)?;
        }

        if let Some(directory) = &self.source.directory {
            validate_path("source.directory", directory)?;
        }

        Ok(())
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output.format.unwrap_or_default()
    }
}

impl ConfigProvider for TomlConfig {
    fn pattern(&self) -> Option<&str> {
        self.selection.pattern.as_deref()
    }

    fn time_format(&self) -> Option<&str> {
        self.selection.time_format.as_deref()
    }

    fn timestamp_is_numeric(&self) -> bool {
        self.selection.timestamp_is_numeric.unwrap_or(false)
    }

    fn start(&self) -> Option<&str> {
        self.range.start.as_deref()
    }

    fn end(&self) -> Option<&str> {
        self.range.end.as_deref()
    }

    fn directory(&self) -> Option<&str> {
        self.source.directory.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
