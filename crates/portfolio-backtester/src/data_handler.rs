use crate::backtester::BacktestInputs;
use crate::error::PortfolioError;
use configuration::DataConfig;
use core_types::{BenchmarkSeries, DateIndex, PredictionMatrix, ReturnSeries};
use ndarray::{Array, Dimension, Ix1, Ix2, Ix3};
use ndarray_npy::{read_npy, ReadNpyError};
use std::path::Path;

/// Loads the four input series and applies the configured trim to all of
/// them together, so they share one time axis.
///
/// After trimming, returns, benchmark and dates must have the same number of
/// periods. Whether they also line up with the predictions is left to the
/// backtester's shape check.
pub fn load_inputs(config: &DataConfig) -> Result<BacktestInputs, PortfolioError> {
    let predictions = PredictionMatrix::new(read_float_array::<Ix3>(&config.predictions_path)?)?;
    let returns = ReturnSeries::new(read_float_array::<Ix2>(&config.returns_path)?);
    let benchmark = BenchmarkSeries::new(read_float_array::<Ix1>(&config.benchmark_path)?);
    let dates = read_dates(&config.dates_path)?;

    tracing::info!(
        assets = predictions.n_assets(),
        prediction_periods = predictions.n_periods(),
        return_periods = returns.n_periods(),
        benchmark_periods = benchmark.n_periods(),
        dates = dates.len(),
        "Loaded input series"
    );

    let raw = BacktestInputs {
        predictions,
        returns,
        benchmark,
        dates,
    };
    trim_inputs(raw, config.trim_offset, config.trim_predictions)
}

/// Drops the first `offset` periods from returns, benchmark and dates, and
/// from the predictions too when `trim_predictions` is set.
pub fn trim_inputs(
    inputs: BacktestInputs,
    offset: usize,
    trim_predictions: bool,
) -> Result<BacktestInputs, PortfolioError> {
    let trimmed = BacktestInputs {
        predictions: if trim_predictions {
            inputs.predictions.trim(offset)?
        } else {
            inputs.predictions
        },
        returns: inputs.returns.trim(offset)?,
        benchmark: inputs.benchmark.trim(offset)?,
        dates: inputs.dates.trim(offset)?,
    };

    let periods = trimmed.returns.n_periods();
    if trimmed.benchmark.n_periods() != periods || trimmed.dates.len() != periods {
        return Err(PortfolioError::Data(format!(
            "after trimming {offset} periods: returns have {periods}, benchmark {}, dates {}",
            trimmed.benchmark.n_periods(),
            trimmed.dates.len()
        )));
    }

    tracing::debug!(offset, periods, trim_predictions, "Trimmed input series");
    Ok(trimmed)
}

/// Reads one date label per line. Surrounding whitespace is stripped and
/// blank lines are skipped.
pub fn read_dates(path: &Path) -> Result<DateIndex, PortfolioError> {
    let contents = std::fs::read_to_string(path).map_err(|source| PortfolioError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let labels = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    Ok(DateIndex::new(labels))
}

/// Reads an `.npy` array of `f64`, widening `f32` files on the fly.
fn read_float_array<D: Dimension>(path: &Path) -> Result<Array<f64, D>, PortfolioError> {
    let wrap = |source| PortfolioError::ArrayFile {
        path: path.to_path_buf(),
        source,
    };

    match read_npy::<_, Array<f64, D>>(path) {
        Ok(array) => Ok(array),
        Err(ReadNpyError::WrongDescriptor(_)) => {
            let narrow: Array<f32, D> = read_npy(path).map_err(wrap)?;
            tracing::debug!(path = %path.display(), "Widened f32 array to f64");
            Ok(narrow.mapv(f64::from))
        }
        Err(source) => Err(wrap(source)),
    }
}
