/*!
 * Converter configuration.
 *
 * Loaded from a JSON file that is created with defaults on first use,
 * validated before any document is touched.
 */

use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::conversion::ConversionDirection;
use crate::document::{FontPolicy, PackageOptions, PartFilter};
use crate::document::package::{DEFAULT_PART_PREFIX, DEFAULT_PART_SUFFIX, DEFAULT_STYLE_MARKER};

/// Settings read from `conf.json` and overridden from the command line
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Conversion direction
    #[serde(default)]
    pub direction: ConversionDirection,

    /// Convert runs the classifier approves even without a legacy font
    #[serde(default)]
    pub force_convert: bool,

    /// Font names driving per-run decisions
    #[serde(default)]
    pub fonts: FontPolicy,

    /// Package part selection and batch settings
    #[serde(default)]
    pub package: PackageConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Package and batch processing configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PackageConfig {
    // @field: Path prefix of convertible parts
    #[serde(default = "default_part_prefix")]
    pub part_prefix: String,

    // @field: Path suffix of convertible parts
    #[serde(default = "default_part_suffix")]
    pub part_suffix: String,

    // @field: Substring marking style parts
    #[serde(default = "default_style_marker")]
    pub style_marker: String,

    // @field: Inserted between the input stem and `.docx` in output names
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    // @field: Files converted at once in folder mode
    #[serde(default = "default_max_concurrent_files")]
    pub max_concurrent_files: usize,
}

impl PackageConfig {
    // @returns: Part filter for the package layer
    pub fn part_filter(&self) -> PartFilter {
        PartFilter {
            prefix: self.part_prefix.clone(),
            suffix: self.part_suffix.clone(),
            style_marker: self.style_marker.clone(),
        }
    }
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            part_prefix: default_part_prefix(),
            part_suffix: default_part_suffix(),
            style_marker: default_style_marker(),
            output_suffix: default_output_suffix(),
            max_concurrent_files: default_max_concurrent_files(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the `log` facade
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_part_prefix() -> String {
    DEFAULT_PART_PREFIX.to_string()
}

fn default_part_suffix() -> String {
    DEFAULT_PART_SUFFIX.to_string()
}

fn default_style_marker() -> String {
    DEFAULT_STYLE_MARKER.to_string()
}

fn default_output_suffix() -> String {
    "converted".to_string()
}

fn default_max_concurrent_files() -> usize {
    4
}

impl Config {
    /// Load a configuration file, creating it with defaults when missing.
    ///
    /// # Arguments
    /// * `path` - Path of the JSON configuration file
    ///
    /// # Returns
    /// * `Result<Config>` - The loaded (not yet validated) configuration
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.fonts.legacy_markers.is_empty() {
            return Err(anyhow!("At least one legacy font marker is required"));
        }
        if self.fonts.legacy_markers.iter().any(|marker| marker.trim().is_empty()) {
            return Err(anyhow!("Legacy font markers must not be empty"));
        }
        if self.fonts.legacy_font.trim().is_empty() {
            return Err(anyhow!("Legacy output font name must not be empty"));
        }
        if self.fonts.unicode_font.trim().is_empty() {
            return Err(anyhow!("Unicode output font name must not be empty"));
        }
        if self.package.part_prefix.is_empty() || self.package.part_suffix.is_empty() {
            return Err(anyhow!("Part prefix and suffix must not be empty"));
        }
        if self.package.output_suffix.trim().is_empty() {
            return Err(anyhow!("Output file suffix must not be empty"));
        }
        if self.package.max_concurrent_files == 0 {
            return Err(anyhow!("Max concurrent files must be at least 1"));
        }

        Ok(())
    }

    // @returns: Options for converting one package with this configuration
    pub fn package_options(&self) -> PackageOptions {
        PackageOptions {
            direction: self.direction,
            force_convert: self.force_convert,
            parts: self.package.part_filter(),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            direction: ConversionDirection::default(),
            force_convert: false,
            fonts: FontPolicy::default(),
            package: PackageConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
