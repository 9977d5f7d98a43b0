use crate::curve::cumulative_curve;
use crate::error::AnalyticsError;
use crate::report::{PerformanceReport, SeriesStats};
use core_types::SelectionDiagnostics;

/// A stateless calculator for deriving performance metrics from period returns.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating performance metrics.
    ///
    /// # Arguments
    ///
    /// * `strategy` - Per-period strategy returns.
    /// * `benchmark` - Per-period benchmark returns on the same time axis.
    /// * `selection` - Degenerate-selection counts from the backtest run.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `PerformanceReport` or an `AnalyticsError`.
    pub fn calculate(
        &self,
        strategy: &[f64],
        benchmark: &[f64],
        selection: SelectionDiagnostics,
    ) -> Result<PerformanceReport, AnalyticsError> {
        if strategy.len() != benchmark.len() {
            return Err(AnalyticsError::LengthMismatch {
                strategy: strategy.len(),
                benchmark: benchmark.len(),
            });
        }
        if strategy.is_empty() {
            return Err(AnalyticsError::NotEnoughData(
                "return series are empty".to_string(),
            ));
        }

        let strategy_stats = self.series_stats(strategy);
        let benchmark_stats = self.series_stats(benchmark);
        let excess_return = strategy_stats.total_return - benchmark_stats.total_return;

        tracing::debug!(
            periods = strategy.len(),
            strategy_total = strategy_stats.total_return,
            benchmark_total = benchmark_stats.total_return,
            "Performance report calculated"
        );

        Ok(PerformanceReport {
            n_periods: strategy.len(),
            strategy: strategy_stats,
            benchmark: benchmark_stats,
            excess_return,
            selection,
        })
    }

    /// Calculates the statistics of a single non-empty series.
    fn series_stats(&self, returns: &[f64]) -> SeriesStats {
        let curve = cumulative_curve(returns);
        let n = returns.len() as f64;

        let total_return = curve.last().copied().unwrap_or(0.0);
        let mean_return = total_return / n;

        let variance = returns
            .iter()
            .map(|r| (r - mean_return) * (r - mean_return))
            .sum::<f64>()
            / n;
        let volatility = variance.sqrt();

        // Non-annualised; the period length is not known here.
        let sharpe_ratio = if returns.len() >= 2 && volatility > 0.0 {
            Some(mean_return / volatility)
        } else {
            None
        };

        let winners = returns.iter().filter(|r| **r > 0.0).count();

        SeriesStats {
            total_return,
            mean_return,
            volatility,
            sharpe_ratio,
            max_drawdown: self.max_drawdown(&curve),
            hit_rate_pct: winners as f64 / n * 100.0,
        }
    }

    /// Maximum drawdown of an additive cumulative curve, measured from a
    /// starting level of zero.
    fn max_drawdown(&self, curve: &[f64]) -> f64 {
        let mut peak = 0.0_f64;
        let mut max_drawdown = 0.0_f64;

        for &level in curve {
            if level > peak {
                peak = level;
            }
            max_drawdown = max_drawdown.max(peak - level);
        }

        max_drawdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn report_matches_hand_computed_figures() {
        let engine = AnalyticsEngine::new();
        // Curve: 0.10, 0.05, 0.15, -0.05
        let strategy = [0.10, -0.05, 0.10, -0.20];
        let benchmark = [0.01, 0.01, 0.01, 0.01];

        let report = engine
            .calculate(&strategy, &benchmark, SelectionDiagnostics::default())
            .unwrap();

        assert_eq!(report.n_periods, 4);
        assert_abs_diff_eq!(report.strategy.total_return, -0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(report.strategy.mean_return, -0.0125, epsilon = 1e-12);
        assert_abs_diff_eq!(report.strategy.max_drawdown, 0.20, epsilon = 1e-12);
        assert_abs_diff_eq!(report.strategy.hit_rate_pct, 50.0, epsilon = 1e-12);
        assert_abs_diff_eq!(report.benchmark.total_return, 0.04, epsilon = 1e-12);
        assert_abs_diff_eq!(report.excess_return, -0.09, epsilon = 1e-12);
    }

    #[test]
    fn constant_series_has_no_sharpe_ratio() {
        let engine = AnalyticsEngine::new();
        let returns = [0.25, 0.25, 0.25];

        let report = engine
            .calculate(&returns, &returns, SelectionDiagnostics::default())
            .unwrap();

        assert_eq!(report.benchmark.volatility, 0.0);
        assert_eq!(report.benchmark.sharpe_ratio, None);
        assert_eq!(report.benchmark.max_drawdown, 0.0);
    }

    #[test]
    fn losing_from_the_start_counts_as_drawdown() {
        let engine = AnalyticsEngine::new();
        let report = engine
            .calculate(&[-0.02, -0.03], &[0.0, 0.0], SelectionDiagnostics::default())
            .unwrap();

        assert_abs_diff_eq!(report.strategy.max_drawdown, 0.05, epsilon = 1e-12);
        assert_eq!(report.strategy.hit_rate_pct, 0.0);
    }

    #[test]
    fn empty_or_misaligned_series_are_rejected() {
        let engine = AnalyticsEngine::new();
        assert!(matches!(
            engine.calculate(&[], &[], SelectionDiagnostics::default()),
            Err(AnalyticsError::NotEnoughData(_))
        ));
        assert_eq!(
            engine.calculate(&[0.1], &[0.1, 0.2], SelectionDiagnostics::default()),
            Err(AnalyticsError::LengthMismatch {
                strategy: 1,
                benchmark: 2
            })
        );
    }
}
