use approx::assert_abs_diff_eq;
use configuration::DataConfig;
use core_types::Side;
use ndarray::{array, Array3};
use ndarray_npy::write_npy;
use portfolio_backtester::{load_inputs, PortfolioBacktester, PortfolioError};
use std::fs;
use std::path::Path;

/// Writes a data set with two warm-up periods followed by two evaluated
/// periods over three assets. Predictions cover only the evaluated window.
fn write_fixture(dir: &Path) -> DataConfig {
    // [asset, time, signal]
    let mut predictions = Array3::<f64>::zeros((3, 2, 2));
    let long = [[0.9, 0.5, 0.7], [0.1, 0.1, 0.1]];
    let short = [[0.1, 0.2, 0.3], [0.85, 0.1, 0.9]];
    for t in 0..2 {
        for a in 0..3 {
            predictions[[a, t, 0]] = long[t][a];
            predictions[[a, t, 1]] = short[t][a];
        }
    }

    let returns = array![
        [9.0, 9.0, 9.0],
        [9.0, 9.0, 9.0],
        [0.02, -0.01, 0.05],
        [-0.04, 0.03, 0.02],
    ];
    let benchmark = array![9.0, 9.0, 0.012, -0.008];

    let config = DataConfig {
        predictions_path: dir.join("Prediction.npy"),
        returns_path: dir.join("ret_w.npy"),
        benchmark_path: dir.join("index_ret_w.npy"),
        dates_path: dir.join("dates_w.txt"),
        trim_offset: 2,
        trim_predictions: false,
    };
    write_npy(&config.predictions_path, &predictions).unwrap();
    write_npy(&config.returns_path, &returns).unwrap();
    write_npy(&config.benchmark_path, &benchmark).unwrap();
    fs::write(
        &config.dates_path,
        "2017-01-06\n2017-01-13\n2017-01-20\n2017-01-27\n",
    )
    .unwrap();
    config
}

#[test]
fn loads_trims_and_backtests_the_evaluation_window() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path());

    let inputs = load_inputs(&config).unwrap();
    assert_eq!(inputs.returns.n_periods(), 2);
    assert_eq!(inputs.dates.first(), Some("2017-01-20"));

    let backtester = PortfolioBacktester::with_thresholds(0.65, 0.80).unwrap();
    let result = backtester.run(&inputs).unwrap();

    // Period 0: long {0, 2} -> 0.035, short empty.
    // Period 1: long empty, short {0, 2} -> -(0.5 * -0.04 + 0.5 * 0.02) = 0.01.
    assert_abs_diff_eq!(result.strategy_returns[0], 0.035, epsilon = 1e-12);
    assert_abs_diff_eq!(result.strategy_returns[1], 0.01, epsilon = 1e-12);
    assert_eq!(result.benchmark_returns, vec![0.012, -0.008]);

    let curve = result.cumulative_strategy();
    assert_abs_diff_eq!(curve[1], 0.045, epsilon = 1e-12);

    assert_eq!(result.diagnostics.degenerate(Side::Long), 1);
    assert_eq!(result.diagnostics.degenerate(Side::Short), 1);
    assert_eq!(result.diagnostics.flat_periods, 0);
}

#[test]
fn misaligned_trim_is_caught_by_the_shape_check() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = write_fixture(dir.path());
    config.trim_offset = 1;

    // Returns keep 3 periods while predictions only have 2.
    let inputs = load_inputs(&config).unwrap();
    let backtester = PortfolioBacktester::with_thresholds(0.65, 0.80).unwrap();
    assert!(matches!(
        backtester.run(&inputs),
        Err(PortfolioError::ShapeMismatch { axis: "time", .. })
    ));

    config.trim_offset = 2;
    config.trim_predictions = true;
    let inputs = load_inputs(&config).unwrap();
    assert_eq!(inputs.predictions.n_periods(), 0);
    assert!(backtester.run(&inputs).is_err());
}

#[test]
fn prediction_file_without_two_signals_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path());
    write_npy(&config.predictions_path, &Array3::<f64>::zeros((3, 2, 3))).unwrap();

    assert!(matches!(
        load_inputs(&config),
        Err(PortfolioError::Core(_))
    ));
}
