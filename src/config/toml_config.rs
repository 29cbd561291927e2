use crate::config::{OutputFormat, OutputLayout};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, ShapeError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_PLACEHOLDER: &str = "***";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaperConfig {
    pub shaping: ShapingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapingConfig {
    pub fields: Option<String>,
    pub ignore_case: bool,
    pub redact: Vec<String>,
    pub redact_placeholder: String,
    pub stringify: bool,
    pub datetime_fields: Vec<String>,
    pub datetime_format: Option<String>,
}

impl Default for ShapingConfig {
    fn default() -> Self {
        Self {
            fields: None,
            ignore_case: true,
            redact: Vec::new(),
            redact_placeholder: DEFAULT_PLACEHOLDER.to_string(),
            stringify: false,
            datetime_fields: Vec::new(),
            datetime_format: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub layout: OutputLayout,
    pub pretty: bool,
}

impl ShaperConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ShapeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ShapeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FIELDS})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ShapeError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        for name in &self.shaping.redact {
            validation::validate_non_empty_string("shaping.redact", name)?;
        }
        validation::validate_non_empty_string(
            "shaping.redact_placeholder",
            &self.shaping.redact_placeholder,
        )?;

        if !self.shaping.datetime_fields.is_empty() {
            let format = validation::validate_required_field(
                "shaping.datetime_format",
                &self.shaping.datetime_format,
            )?;
            validation::validate_strftime("shaping.datetime_format", format)?;
        }

        if self.output.format == OutputFormat::Csv && self.output.layout == OutputLayout::Collapsed
        {
            return Err(ShapeError::InvalidConfigValueError {
                field: "output.layout".to_string(),
                value: self.output.layout.to_string(),
                reason: "Collapsed layout is only available for json output".to_string(),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for ShaperConfig {
    fn fields(&self) -> Option<&str> {
        self.shaping.fields.as_deref()
    }

    fn ignore_case(&self) -> bool {
        self.shaping.ignore_case
    }

    fn redact_fields(&self) -> &[String] {
        &self.shaping.redact
    }

    fn redact_placeholder(&self) -> &str {
        &self.shaping.redact_placeholder
    }

    fn stringify(&self) -> bool {
        self.shaping.stringify
    }

    fn datetime_fields(&self) -> &[String] {
        &self.shaping.datetime_fields
    }

    fn datetime_format(&self) -> Option<&str> {
        self.shaping.datetime_format.as_deref()
    }

    fn output_format(&self) -> OutputFormat {
        self.output.format
    }

    fn layout(&self) -> OutputLayout {
        self.output.layout
    }

    fn pretty(&self) -> bool {
        self.output.pretty
    }
}

impl Validate for ShaperConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
