use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use crate::allocation::DEFAULT_READING_RATE;
use crate::output::OutputFormat;
use crate::validation::TimelineValidatorConfig;
use crate::validation::timecodes::DEFAULT_MAX_CPS;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.

/// Slowest reading rate accepted, in characters per second
pub const MIN_READING_RATE: f64 = 1.0;

/// Fastest reading rate accepted, in characters per second
pub const MAX_READING_RATE: f64 = 30.0;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Time allocation mode used when none is given on the command line
    #[serde(default)]
    pub mode: AllocationMode,

    /// Reading rate for fixed-rate mode (characters per second)
    #[serde(default = "default_reading_rate")]
    pub reading_rate: f64,

    /// Speaker placeholder written to every CSV row
    #[serde(default = "default_speaker")]
    pub speaker: String,

    /// Output config
    #[serde(default)]
    pub output: OutputConfig,

    /// Timeline check config
    #[serde(default)]
    pub timeline: TimelineConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Time allocation mode
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AllocationMode {
    // @mode: Deal sentences into the timing file's slots
    #[default]
    RoundRobin,
    // @mode: Stretch reading-rate durations to the timing file's total
    Proportional,
    // @mode: Chain durations at a fixed reading rate
    FixedRate,
}

impl AllocationMode {
    // @returns: Human readable mode name
    pub fn display_name(&self) -> &str {
        match self {
            Self::RoundRobin => "Round-robin slot fill",
            Self::Proportional => "Proportional scaling",
            Self::FixedRate => "Fixed reading rate",
        }
    }

    // @returns: Kebab-case mode identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoundRobin => "round-robin",
            Self::Proportional => "proportional",
            Self::FixedRate => "fixed-rate",
        }
    }

    /// Whether the mode cannot run without a timing file. An explicit total
    /// duration stands in for the timing file in proportional mode.
    pub fn requires_timing(&self, has_duration: bool) -> bool {
        match self {
            Self::RoundRobin => true,
            Self::Proportional => !has_duration,
            Self::FixedRate => false,
        }
    }
}

// Implement Display trait for AllocationMode
impl std::fmt::Display for AllocationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Implement FromStr trait for AllocationMode
impl std::str::FromStr for AllocationMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "round-robin" => Ok(Self::RoundRobin),
            "proportional" => Ok(Self::Proportional),
            "fixed-rate" => Ok(Self::FixedRate),
            _ => Err(anyhow!("Invalid allocation mode: {}", s)),
        }
    }
}

/// Which artifacts to produce and what to call them
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Produce the SRT file
    #[serde(default = "default_true")]
    pub srt: bool,

    /// Produce the CSV file
    #[serde(default = "default_true")]
    pub csv: bool,

    /// SRT file name
    #[serde(default = "default_srt_file_name")]
    pub srt_file_name: String,

    /// CSV file name
    #[serde(default = "default_csv_file_name")]
    pub csv_file_name: String,
}

impl OutputConfig {
    /// Enabled formats, SRT first
    pub fn formats(&self) -> Vec<OutputFormat> {
        let mut formats = Vec::with_capacity(2);
        if self.srt {
            formats.push(OutputFormat::Srt);
        }
        if self.csv {
            formats.push(OutputFormat::Csv);
        }
        formats
    }

    pub fn file_name(&self, format: OutputFormat) -> &str {
        match format {
            OutputFormat::Srt => &self.srt_file_name,
            OutputFormat::Csv => &self.csv_file_name,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            srt: true,
            csv: true,
            srt_file_name: default_srt_file_name(),
            csv_file_name: default_csv_file_name(),
        }
    }
}

/// Timeline check configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimelineConfig {
    /// Reading speed above which a segment is reported
    #[serde(default = "default_max_cps")]
    pub max_cps: f64,

    /// Whether to report overlapping segments
    #[serde(default = "default_true")]
    pub check_overlaps: bool,
}

impl TimelineConfig {
    pub fn validator_config(&self) -> TimelineValidatorConfig {
        TimelineValidatorConfig {
            max_cps: self.max_cps,
            check_overlaps: self.check_overlaps,
        }
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            max_cps: default_max_cps(),
            check_overlaps: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
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
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_reading_rate() -> f64 {
    DEFAULT_READING_RATE
}

fn default_speaker() -> String {
    "Speaker 1".to_string()
}

fn default_max_cps() -> f64 {
    DEFAULT_MAX_CPS
}

fn default_true() -> bool {
    true
}

fn default_srt_file_name() -> String {
    "translated.srt".to_string()
}

fn default_csv_file_name() -> String {
    "translated.csv".to_string()
}

impl Config {

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        validate_reading_rate(self.reading_rate)?;

        if !self.output.srt && !self.output.csv {
            return Err(anyhow!("At least one output format (srt or csv) must be enabled"));
        }

        if self.output.srt && self.output.srt_file_name.trim().is_empty() {
            return Err(anyhow!("SRT output file name must not be empty"));
        }

        if self.output.csv && self.output.csv_file_name.trim().is_empty() {
            return Err(anyhow!("CSV output file name must not be empty"));
        }

        if !(self.timeline.max_cps.is_finite() && self.timeline.max_cps > 0.0) {
            return Err(anyhow!("Timeline max_cps must be a positive number, got {}", self.timeline.max_cps));
        }

        Ok(())
    }
}

/// Check a reading rate against the accepted range
pub fn validate_reading_rate(rate: f64) -> Result<()> {
    if !(MIN_READING_RATE..=MAX_READING_RATE).contains(&rate) {
        return Err(anyhow!(
            "Reading rate must be between {} and {} characters per second, got {}",
            MIN_READING_RATE, MAX_READING_RATE, rate
        ));
    }
    Ok(())
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            mode: AllocationMode::default(),
            reading_rate: default_reading_rate(),
            speaker: default_speaker(),
            output: OutputConfig::default(),
            timeline: TimelineConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
