//! Runtime configuration.
//!
//! Values come from a YAML file (`--config`, or `jobsafe.yaml` in the working
//! directory when present) and are then overridden by command-line flags.
//!
//! ```yaml
//! policy: lenient
//! format: json
//! color: never
//! log_level: info
//! preview_width: 60
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use termcolor::ColorChoice;

use crate::diagnostics::JobsafeError;
use crate::validator::StackPolicy;

pub const DEFAULT_CONFIG_FILE: &str = "jobsafe.yaml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn color_choice(self) -> ColorChoice {
        match self {
            ColorMode::Auto if atty::is(atty::Stream::Stdout) => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }

    /// Whether ANSI colors should be used on stderr.
    pub fn stderr_colors(self) -> bool {
        match self {
            ColorMode::Auto => atty::is(atty::Stream::Stderr),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobsafeConfig {
    pub policy: StackPolicy,
    pub format: OutputFormat,
    pub color: ColorMode,
    /// `tracing` filter directive used when no log environment variable is set.
    pub log_level: String,
    /// Maximum display width of line previews in reports.
    pub preview_width: usize,
}

impl Default for JobsafeConfig {
    fn default() -> Self {
        Self {
            policy: StackPolicy::Strict,
            format: OutputFormat::Text,
            color: ColorMode::Auto,
            log_level: "warn".to_string(),
            preview_width: 50,
        }
    }
}

impl JobsafeConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    pub fn load(path: &Path) -> Result<Self, JobsafeError> {
        let content = fs::read_to_string(path).map_err(|source| JobsafeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content).map_err(|source| JobsafeError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `explicit` if given (it must exist), else the default file if it
    /// exists, else built-in defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, JobsafeError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            Self::load(&fallback)
        } else {
            Ok(Self::default())
        }
    }
}
