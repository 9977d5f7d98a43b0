use crate::error::PortfolioError;
use crate::weights::{side_returns, SideWeights};
use analytics::cumulative_curve;
use configuration::StrategyParams;
use core_types::{
    BenchmarkSeries, DateIndex, PredictionMatrix, ReturnSeries, SelectionDiagnostics, Side,
};

/// The immutable, already trimmed and aligned inputs of one backtest run.
#[derive(Debug, Clone)]
pub struct BacktestInputs {
    pub predictions: PredictionMatrix,
    pub returns: ReturnSeries,
    pub benchmark: BenchmarkSeries,
    pub dates: DateIndex,
}

/// Everything a run produces. The strategy and benchmark series share one
/// time axis.
#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub strategy_returns: Vec<f64>,
    /// Passed through unchanged from the inputs.
    pub benchmark_returns: Vec<f64>,
    pub long_returns: Vec<f64>,
    pub short_returns: Vec<f64>,
    pub long: SideWeights,
    pub short: SideWeights,
    pub diagnostics: SelectionDiagnostics,
}

impl BacktestResult {
    pub fn n_periods(&self) -> usize {
        self.strategy_returns.len()
    }

    pub fn cumulative_strategy(&self) -> Vec<f64> {
        cumulative_curve(&self.strategy_returns)
    }

    pub fn cumulative_benchmark(&self) -> Vec<f64> {
        cumulative_curve(&self.benchmark_returns)
    }
}

/// Threshold long/short backtester.
///
/// Holds only the two thresholds; every call to `compute_strategy_returns`
/// is a pure function of its inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortfolioBacktester {
    long_threshold: f64,
    short_threshold: f64,
}

impl PortfolioBacktester {
    pub fn new(params: &StrategyParams) -> Result<Self, PortfolioError> {
        Self::with_thresholds(params.long_threshold, params.short_threshold)
    }

    /// Fails with `InvalidThreshold` when either threshold is outside `[0, 1]`
    /// or NaN.
    pub fn with_thresholds(long_threshold: f64, short_threshold: f64) -> Result<Self, PortfolioError> {
        for (side, value) in [(Side::Long, long_threshold), (Side::Short, short_threshold)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PortfolioError::InvalidThreshold { side, value });
            }
        }
        Ok(Self {
            long_threshold,
            short_threshold,
        })
    }

    /// Runs the strategy over a bundled set of inputs.
    pub fn run(&self, inputs: &BacktestInputs) -> Result<BacktestResult, PortfolioError> {
        self.compute_strategy_returns(&inputs.predictions, &inputs.returns, &inputs.benchmark)
    }

    /// Converts predictions into per-period strategy returns.
    ///
    /// 1. Select per period the assets whose score strictly exceeds each
    ///    side's threshold.
    /// 2. Weight the selected assets equally; an empty selection leaves the
    ///    side flat for that period.
    /// 3. Long sleeve return is the weighted sum of asset returns; the short
    ///    sleeve earns the negated weighted sum.
    /// 4. The strategy return is the sum of the two sleeves.
    ///
    /// The inputs must already be trimmed to a common time axis; only their
    /// shapes are checked here.
    pub fn compute_strategy_returns(
        &self,
        predictions: &PredictionMatrix,
        returns: &ReturnSeries,
        benchmark: &BenchmarkSeries,
    ) -> Result<BacktestResult, PortfolioError> {
        check_shapes(predictions, returns, benchmark)?;

        let long = SideWeights::from_predictions(predictions, Side::Long, self.long_threshold);
        let short = SideWeights::from_predictions(predictions, Side::Short, self.short_threshold);

        let long_returns = side_returns(returns, &long)?;
        let short_returns = side_returns(returns, &short)?;
        let strategy_returns = &long_returns + &short_returns;

        let mut diagnostics = SelectionDiagnostics::default();
        for (t, (&n_long, &n_short)) in long.selected.iter().zip(&short.selected).enumerate() {
            if long.is_degenerate(t) || short.is_degenerate(t) {
                tracing::debug!(period = t, n_long, n_short, "Degenerate selection, sleeve flat");
            }
            diagnostics.record(n_long, n_short);
        }
        log_diagnostics(&diagnostics);

        Ok(BacktestResult {
            strategy_returns: strategy_returns.to_vec(),
            benchmark_returns: benchmark.to_vec(),
            long_returns: long_returns.to_vec(),
            short_returns: short_returns.to_vec(),
            long,
            short,
            diagnostics,
        })
    }
}

fn check_shapes(
    predictions: &PredictionMatrix,
    returns: &ReturnSeries,
    benchmark: &BenchmarkSeries,
) -> Result<(), PortfolioError> {
    if predictions.n_assets() != returns.n_assets() {
        return Err(PortfolioError::ShapeMismatch {
            axis: "asset",
            detail: format!(
                "predictions cover {} assets, returns cover {}",
                predictions.n_assets(),
                returns.n_assets()
            ),
        });
    }

    let periods = [
        predictions.n_periods(),
        returns.n_periods(),
        benchmark.n_periods(),
    ];
    if periods.iter().any(|n| *n != periods[0]) {
        return Err(PortfolioError::ShapeMismatch {
            axis: "time",
            detail: format!(
                "predictions have {} periods, returns {}, benchmark {}",
                periods[0], periods[1], periods[2]
            ),
        });
    }

    Ok(())
}

fn log_diagnostics(diagnostics: &SelectionDiagnostics) {
    tracing::info!(
        periods = diagnostics.n_periods,
        degenerate_long = diagnostics.degenerate_long,
        degenerate_short = diagnostics.degenerate_short,
        flat = diagnostics.flat_periods,
        "Strategy returns computed"
    );
    for side in Side::ALL {
        if diagnostics.always_flat(side) {
            tracing::warn!(%side, "No asset was ever selected; this sleeve stayed flat for the whole run");
        }
    }
}
