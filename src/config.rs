//! Configuration management and validation.
//!
//! Provides configuration structures for the record source, the validation
//! pass, output locations and chart rendering. Configuration is layered:
//! built-in defaults, then an optional TOML file, then command-line overrides.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_DELIMITER, DEFAULT_ERROR_CHART_FILE,
    DEFAULT_INPUT_FILE, DEFAULT_SUMMARY_FILE, DEFAULT_VALIDITY_CHART_FILE, chart,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// How the record source splits lines into fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Input file to validate
    pub input_path: PathBuf,

    /// Single ASCII field delimiter (no quoting or escaping is applied)
    pub delimiter: char,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_FILE),
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl SourceConfig {
    /// Delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> Result<u8> {
        if !self.delimiter.is_ascii() {
            return Err(Error::configuration(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }
        if matches!(self.delimiter, '\n' | '\r' | '"') {
            return Err(Error::configuration(format!(
                "Delimiter {:?} cannot be used to split records",
                self.delimiter
            )));
        }
        Ok(self.delimiter as u8)
    }
}

/// How rule columns are located in each row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnResolution {
    /// Rules read their fixed field positions; the header is ignored
    #[default]
    Position,
    /// Rules read the column whose header matches their name
    HeaderName,
}

/// Which rule counters a short row contributes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributionPolicy {
    /// A row missing any required field is counted invalid without touching
    /// any rule counter
    #[default]
    RowOnly,
    /// Every rule is evaluated independently and missing fields count
    /// against the rule that needed them
    PerRule,
}

/// Validation pass settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub column_resolution: ColumnResolution,
    pub attribution: AttributionPolicy,
}

/// Where reports are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the summary file and charts
    pub output_dir: PathBuf,

    pub summary_file: String,
    pub validity_chart_file: String,
    pub error_chart_file: String,

    /// Write the delimited summary file
    pub write_summary: bool,

    /// Render the two PNG charts
    pub render_charts: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            summary_file: DEFAULT_SUMMARY_FILE.to_string(),
            validity_chart_file: DEFAULT_VALIDITY_CHART_FILE.to_string(),
            error_chart_file: DEFAULT_ERROR_CHART_FILE.to_string(),
            write_summary: true,
            render_charts: true,
        }
    }
}

impl OutputConfig {
    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(&self.summary_file)
    }

    pub fn validity_chart_path(&self) -> PathBuf {
        self.output_dir.join(&self.validity_chart_file)
    }

    pub fn error_chart_path(&self) -> PathBuf {
        self.output_dir.join(&self.error_chart_file)
    }
}

/// Chart rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,

    /// TrueType/OpenType font for titles and labels; looked up in well-known
    /// system locations when unset
    pub font_path: Option<PathBuf>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: chart::CANVAS_WIDTH,
            height: chart::CANVAS_HEIGHT,
            font_path: None,
        }
    }
}

/// Global configuration for a validation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub validation: ValidationConfig,
    pub output: OutputConfig,
    pub charts: ChartConfig,
}

impl Config {
    /// Default config file location (`<config dir>/data-validator/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            Error::configuration("Could not determine user configuration directory")
        })?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file; missing sections take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Configuration { message } => {
                Error::configuration(format!("{} ({})", message, path.display()))
            }
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Invalid config file: {}", e)))?;
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Defaults, overlaid by the given file (or the default file when it exists)
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        match config_file {
            Some(path) => Self::from_file(path),
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Create configuration with a custom input file
    pub fn with_input_path(mut self, input_path: impl Into<PathBuf>) -> Self {
        self.source.input_path = input_path.into();
        self
    }

    /// Create configuration with a custom output directory
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output.output_dir = output_dir.into();
        self
    }

    /// Create configuration with a custom delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.source.delimiter = delimiter;
        self
    }

    /// Create configuration resolving rule columns from the header row
    pub fn with_header_resolution(mut self) -> Self {
        self.validation.column_resolution = ColumnResolution::HeaderName;
        self
    }

    /// Create configuration attributing missing fields to their rules
    pub fn with_per_rule_attribution(mut self) -> Self {
        self.validation.attribution = AttributionPolicy::PerRule;
        self
    }

    /// Create configuration without chart rendering
    pub fn without_charts(mut self) -> Self {
        self.output.render_charts = false;
        self
    }

    /// Check the configuration for values that cannot work
    pub fn validate(&self) -> Result<()> {
        self.source.delimiter_byte()?;

        for (label, name) in [
            ("summary file", &self.output.summary_file),
            ("validity chart file", &self.output.validity_chart_file),
            ("error chart file", &self.output.error_chart_file),
        ] {
            if name.trim().is_empty() {
                return Err(Error::configuration(format!(
                    "Output {} name cannot be empty",
                    label
                )));
            }
        }

        if self.charts.width == 0 || self.charts.height == 0 {
            return Err(Error::configuration(format!(
                "Chart dimensions must be non-zero, got {}x{}",
                self.charts.width, self.charts.height
            )));
        }

        if let Some(font_path) = &self.charts.font_path {
            if !font_path.exists() {
                return Err(Error::configuration(format!(
                    "Font file does not exist: {}",
                    font_path.display()
                )));
            }
        }

        Ok(())
    }
}
