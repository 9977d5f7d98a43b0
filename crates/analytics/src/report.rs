use core_types::SelectionDiagnostics;
use serde::{Deserialize, Serialize};

/// Summary statistics of one period return series.
///
/// All return figures are in the same units as the input series and are
/// aggregated additively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    /// Final point of the cumulative curve.
    pub total_return: f64,
    pub mean_return: f64,
    /// Population standard deviation of the period returns.
    pub volatility: f64,
    pub sharpe_ratio: Option<f64>, // Option<> for cases with no stdev
    /// Largest peak-to-trough fall of the cumulative curve.
    pub max_drawdown: f64,
    /// Share of periods with a strictly positive return, in percent.
    pub hit_rate_pct: f64,
}

/// Strategy-versus-benchmark comparison over one backtest window.
///
/// This struct is the final output of the `AnalyticsEngine` and is what the
/// CLI prints and exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub n_periods: usize,
    pub strategy: SeriesStats,
    pub benchmark: SeriesStats,
    /// Strategy total return minus benchmark total return.
    pub excess_return: f64,
    pub selection: SelectionDiagnostics,
}
