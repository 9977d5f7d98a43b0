use crate::error::PortfolioError;
use core_types::{PredictionMatrix, ReturnSeries, Side, WeightMatrix};
use ndarray::{Array1, Array2, Zip};

/// Equal-weight portfolio for one side, plus how many assets were selected
/// in each period.
#[derive(Debug, Clone, PartialEq)]
pub struct SideWeights {
    pub side: Side,
    pub weights: WeightMatrix,
    pub selected: Vec<usize>,
}

impl SideWeights {
    /// Selects, per period, the assets whose `side` score is strictly above
    /// `threshold` and spreads the sleeve equally across them.
    ///
    /// A period with no selection keeps a denominator of 1, so its row is
    /// all zero and the sleeve is flat. NaN scores are never selected.
    pub fn from_predictions(predictions: &PredictionMatrix, side: Side, threshold: f64) -> Self {
        // [asset, time] -> [time, asset]
        let scores = predictions.scores(side).reversed_axes();
        let mut weights = Array2::<f64>::zeros(scores.raw_dim());
        let mut selected = Vec::with_capacity(scores.nrows());

        for (score_row, mut weight_row) in scores.rows().into_iter().zip(weights.rows_mut()) {
            let count = score_row.iter().filter(|s| **s > threshold).count();
            let denominator = count.max(1) as f64;

            Zip::from(&mut weight_row)
                .and(&score_row)
                .for_each(|w, &s| {
                    if s > threshold {
                        *w = 1.0 / denominator;
                    }
                });
            selected.push(count);
        }

        Self {
            side,
            weights: WeightMatrix::new(weights),
            selected,
        }
    }

    pub fn is_degenerate(&self, t: usize) -> bool {
        self.selected.get(t).is_some_and(|count| *count == 0)
    }
}

/// Per-period return of one sleeve: the weighted sum of asset returns, with
/// the sign flipped for the short side.
///
/// Fails with `ShapeMismatch` unless both inputs share the `[time, asset]`
/// shape.
pub fn side_returns(
    returns: &ReturnSeries,
    weights: &SideWeights,
) -> Result<Array1<f64>, PortfolioError> {
    let w = &weights.weights;
    if returns.n_periods() != w.n_periods() || returns.n_assets() != w.n_assets() {
        return Err(PortfolioError::ShapeMismatch {
            axis: if returns.n_assets() != w.n_assets() { "asset" } else { "time" },
            detail: format!(
                "{} weights are {}x{}, returns are {}x{}",
                weights.side,
                w.n_periods(),
                w.n_assets(),
                returns.n_periods(),
                returns.n_assets()
            ),
        });
    }

    let direction = weights.side.direction();
    let mut out = Array1::<f64>::zeros(returns.n_periods());

    Zip::from(&mut out)
        .and(returns.view().rows())
        .and(weights.weights.view().rows())
        .for_each(|r, asset_returns, w| {
            *r = direction * asset_returns.dot(&w);
        });

    Ok(out)
}
