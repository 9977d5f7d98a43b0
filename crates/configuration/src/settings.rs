use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// Leading periods dropped from every series in the original deployment:
/// 801 training steps followed by 55 validation steps.
pub const DEFAULT_TRIM_OFFSET: usize = 801 + 55;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub strategy: StrategyParams,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Locations of the input array files and the trim applied to them.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// `[asset, time, 2]` long/short confidence scores.
    pub predictions_path: PathBuf,
    /// `[time, asset]` period returns.
    pub returns_path: PathBuf,
    /// `[time]` benchmark index returns.
    pub benchmark_path: PathBuf,
    /// One date label per line.
    pub dates_path: PathBuf,
    /// Number of leading periods dropped from returns, benchmark and dates.
    #[serde(default = "default_trim_offset")]
    pub trim_offset: usize,
    /// Also drop `trim_offset` periods from the predictions. Off by default
    /// because predictions are usually produced for the trimmed window only.
    #[serde(default)]
    pub trim_predictions: bool,
}

/// Parameters for the threshold long/short strategy.
#[derive(Debug, Clone, Deserialize)]
pub struct StrategyParams {
    /// Assets whose long score is strictly above this join the long sleeve.
    #[serde(default = "default_long_threshold")]
    pub long_threshold: f64,
    /// Assets whose short score is strictly above this join the short sleeve.
    #[serde(default = "default_short_threshold")]
    pub short_threshold: f64,
}

/// Presentation settings for the cumulative return comparison.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Number of evenly spaced date labels along the time axis.
    #[serde(default = "default_n_ticks")]
    pub n_ticks: usize,
    #[serde(default = "default_benchmark_label")]
    pub benchmark_label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Fallback filter directive when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for daily rolling log files. File logging is off when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default = "default_log_file_prefix")]
    pub file_prefix: String,
}

// --- Default Implementations ---
// This allows a user to omit whole sections from their toml
// and still get the thresholds of the original deployment.

fn default_trim_offset() -> usize {
    DEFAULT_TRIM_OFFSET
}

fn default_long_threshold() -> f64 {
    0.65
}

// Short signals are harder to forecast, hence the stricter cut-off.
fn default_short_threshold() -> f64 {
    0.80
}

fn default_n_ticks() -> usize {
    20
}

fn default_benchmark_label() -> String {
    "S&P 500 Index".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file_prefix() -> String {
    "mom-backtest.log".to_string()
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            long_threshold: default_long_threshold(),
            short_threshold: default_short_threshold(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            n_ticks: default_n_ticks(),
            benchmark_label: default_benchmark_label(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
            file_prefix: default_log_file_prefix(),
        }
    }
}

/// Command-line overrides for the strategy thresholds.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct StrategyOverrides {
    /// Override `strategy.long_threshold` (0.0 to 1.0).
    #[cfg_attr(feature = "clap", arg(long))]
    pub long_threshold: Option<f64>,
    /// Override `strategy.short_threshold` (0.0 to 1.0).
    #[cfg_attr(feature = "clap", arg(long))]
    pub short_threshold: Option<f64>,
}

impl Config {
    /// Applies any command-line overrides and re-validates the result.
    pub fn apply_overrides(&mut self, overrides: &StrategyOverrides) -> Result<(), ConfigError> {
        if let Some(long) = overrides.long_threshold {
            self.strategy.long_threshold = long;
        }
        if let Some(short) = overrides.short_threshold {
            self.strategy.short_threshold = short;
        }
        self.validate()
    }

    /// Rejects settings the backtest cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_threshold("strategy.long_threshold", self.strategy.long_threshold)?;
        check_threshold("strategy.short_threshold", self.strategy.short_threshold)?;
        if self.report.n_ticks == 0 {
            return Err(ConfigError::ValidationError(
                "report.n_ticks must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_threshold(name: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ValidationError(format!(
            "{name} must lie in [0, 1], got {value}"
        )));
    }
    Ok(())
}
