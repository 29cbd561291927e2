pub mod toml_config;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

/// How shaped rows are laid out in JSON output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    /// One object per row.
    #[default]
    Rows,
    /// Every row folded into a single object, later rows winning.
    Collapsed,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

impl fmt::Display for OutputLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputLayout::Rows => write!(f, "rows"),
            OutputLayout::Collapsed => write!(f, "collapsed"),
        }
    }
}

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
pub mod cli {
    use super::{OutputFormat, OutputLayout};
    use crate::config::toml_config::ShaperConfig;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "field-shaper")]
    #[command(about = "Select and reshape fields of JSON records")]
    pub struct CliConfig {
        /// JSON file holding an object or an array of objects ("-" reads stdin)
        #[arg(short, long, default_value = "-")]
        pub input: String,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        pub output: Option<String>,

        /// Comma-separated field list; empty selects every field
        #[arg(short, long)]
        pub fields: Option<String>,

        #[arg(long, help = "Match field names case-sensitively")]
        pub case_sensitive: bool,

        /// Path to a TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(long, value_enum)]
        pub format: Option<OutputFormat>,

        #[arg(long, value_enum)]
        pub layout: Option<OutputLayout>,

        #[arg(long, value_delimiter = ',')]
        pub redact: Vec<String>,

        #[arg(long, help = "Render every value as a string")]
        pub stringify: bool,

        #[arg(long, help = "Pretty-print JSON output")]
        pub pretty: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub log_json: bool,
    }

    impl CliConfig {
        /// 命令列參數覆蓋設定檔
        pub fn apply_to(&self, config: &mut ShaperConfig) {
            if let Some(fields) = &self.fields {
                config.shaping.fields = Some(fields.clone());
            }
            if self.case_sensitive {
                config.shaping.ignore_case = false;
            }
            if !self.redact.is_empty() {
                config.shaping.redact = self.redact.clone();
            }
            if self.stringify {
                config.shaping.stringify = true;
            }
            if let Some(format) = self.format {
                config.output.format = format;
            }
            if let Some(layout) = self.layout {
                config.output.layout = layout;
            }
            if self.pretty {
                config.output.pretty = true;
            }
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_path("input", &self.input)?;
            if let Some(output) = &self.output {
                validation::validate_path("output", output)?;
            }
            for name in &self.redact {
                validation::validate_non_empty_string("redact", name)?;
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_cli_overrides_config() {
            let cli = CliConfig::parse_from([
                "field-shaper",
                "--fields",
                "id,name",
                "--case-sensitive",
                "--format",
                "csv",
                "--redact",
                "password,ssn",
            ]);
            let mut config = ShaperConfig::default();
            cli.apply_to(&mut config);

            assert_eq!(config.shaping.fields.as_deref(), Some("id,name"));
            assert!(!config.shaping.ignore_case);
            assert_eq!(config.shaping.redact, vec!["password", "ssn"]);
            assert_eq!(config.output.format, OutputFormat::Csv);
            assert_eq!(config.output.layout, OutputLayout::Rows);
            assert!(cli.validate().is_ok());
        }

        #[test]
        fn test_cli_rejects_empty_redact_entry() {
            let cli = CliConfig::parse_from(["field-shaper", "--redact", "password,,ssn"]);
            assert!(cli.validate().is_err());
        }

        #[test]
        fn test_cli_without_flags_keeps_config() {
            let cli = CliConfig::parse_from(["field-shaper"]);
            let mut config = ShaperConfig::default();
            config.shaping.fields = Some("email".to_string());
            config.output.pretty = true;
            cli.apply_to(&mut config);

            assert_eq!(cli.input, "-");
            assert_eq!(config.shaping.fields.as_deref(), Some("email"));
            assert!(config.shaping.ignore_case);
            assert!(config.output.pretty);
        }
    }
}
