// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_FONTS_DIR, DEFAULT_LOG_LEVEL};
use crate::error::PlaceTextError;
use crate::placement::FontResolver;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory searched first for font files (default: fonts)
    #[serde(default = "default_fonts_dir")]
    pub fonts_dir: PathBuf,

    /// Directories searched for fonts not found in `fonts_dir`.
    /// Platform defaults apply when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_font_dirs: Option<Vec<PathBuf>>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-field lines (default)
    #[default]
    Pretty,
    /// Single-line human-readable output
    Compact,
    /// JSON lines for log aggregation
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Level filter (trace, debug, info, warn, error). RUST_LOG overrides it.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_fonts_dir() -> PathBuf {
    PathBuf::from(DEFAULT_FONTS_DIR)
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fonts_dir: default_fonts_dir(),
            system_font_dirs: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, PlaceTextError> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| PlaceTextError::Config(e.to_string()))?;

        let mut missing = None;
        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                missing.get_or_insert_with(|| var_name.to_string());
                String::new()
            })
        });

        if let Some(var_name) = missing {
            return Err(PlaceTextError::Config(format!(
                "Environment variable '{}' is referenced but not set",
                var_name
            )));
        }

        // An empty document means "all defaults".
        if substituted.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&substituted).map_err(|e| PlaceTextError::Config(e.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PlaceTextError> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| PlaceTextError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<(), PlaceTextError> {
        if self.fonts_dir.as_os_str().is_empty() {
            return Err(PlaceTextError::Config(
                "fonts_dir cannot be empty".to_string(),
            ));
        }

        if let Some(dirs) = &self.system_font_dirs {
            if dirs.iter().any(|d| d.as_os_str().is_empty()) {
                return Err(PlaceTextError::Config(
                    "system_font_dirs cannot contain empty paths".to_string(),
                ));
            }
        }

        const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
        if !LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(PlaceTextError::Config(format!(
                "Invalid log level '{}': expected one of {}",
                self.logging.level,
                LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// Build the font resolver described by this configuration.
    pub fn font_resolver(&self) -> FontResolver {
        let resolver = FontResolver::new(&self.fonts_dir);
        match &self.system_font_dirs {
            Some(dirs) => resolver.with_system_font_dirs(dirs.clone()),
            None => resolver,
        }
    }
}
