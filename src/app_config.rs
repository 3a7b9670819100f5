use anyhow::{Context, Result};
use log::{debug, LevelFilter};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::subtitle_processor::LineEnding;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Title of the work being subtitled, embedded in the translation prompt
    #[serde(default = "default_work_title")]
    pub work_title: String,

    /// Target language, free text ("Japanese", "Brazilian Portuguese", ...)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Output config
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_title: default_work_title(),
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file, falling back to defaults if the
    /// file does not exist
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            debug!("Config file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Check the configuration for values that cannot work
    pub fn validate(&self) -> Result<()> {
        if self.translation.candidate_models.is_empty() {
            anyhow::bail!("Configuration error: candidate_models must not be empty");
        }
        if self.translation.retry_count == 0 {
            anyhow::bail!("Configuration error: retry_count must be at least 1");
        }
        Ok(())
    }
}

/// Translation endpoint and retry configuration.
///
/// All the constants that used to be implicit module-level globals: the
/// ordered candidate model list, the retry budget and the backoff duration
/// per failure class.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Candidate model identifiers, probed in order; the first one that
    /// answers is used for the whole run
    #[serde(default = "default_candidate_models")]
    pub candidate_models: Vec<String>,

    /// Base endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Attempts per block before falling back to the untranslated text
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff after a rate-limiting response, in milliseconds
    #[serde(default = "default_rate_limit_backoff_ms")]
    pub rate_limit_backoff_ms: u64,

    /// Backoff after any other failure, in milliseconds
    #[serde(default = "default_error_backoff_ms")]
    pub error_backoff_ms: u64,

    /// Per-request timeout for translation calls, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Per-request timeout for the connectivity probe, in seconds
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// Pause between consecutive block requests, in milliseconds
    #[serde(default = "default_pacing_delay_ms")]
    pub pacing_delay_ms: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            candidate_models: default_candidate_models(),
            endpoint: default_endpoint(),
            retry_count: default_retry_count(),
            rate_limit_backoff_ms: default_rate_limit_backoff_ms(),
            error_backoff_ms: default_error_backoff_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            probe_timeout_secs: default_probe_timeout_secs(),
            pacing_delay_ms: default_pacing_delay_ms(),
        }
    }
}

/// Output encoding configuration for the web-oriented tools
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Line-ending convention for serialized output
    #[serde(default = "default_line_ending")]
    pub line_ending: LineEnding,

    /// Whether to prefix the output with a UTF-8 byte-order mark;
    /// browser-extension players require it, most native players do not
    #[serde(default = "default_with_bom")]
    pub with_bom: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            line_ending: default_line_ending(),
            with_bom: default_with_bom(),
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warn level
    Warn,
    /// Info level
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's level filter
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_work_title() -> String {
    "Unknown Title".to_string()
}

fn default_target_language() -> String {
    "Japanese".to_string()
}

fn default_candidate_models() -> Vec<String> {
    vec![
        "gemini-2.0-flash".to_string(),
        "gemini-1.5-flash".to_string(),
        "gemini-1.5-pro".to_string(),
        "gemini-1.5-flash-8b".to_string(),
        "gemini-2.0-flash-exp".to_string(),
    ]
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_retry_count() -> u32 {
    3
}

fn default_rate_limit_backoff_ms() -> u64 {
    5000
}

fn default_error_backoff_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_probe_timeout_secs() -> u64 {
    5
}

fn default_pacing_delay_ms() -> u64 {
    500
}

fn default_line_ending() -> LineEnding {
    LineEnding::Crlf
}

fn default_with_bom() -> bool {
    true
}
