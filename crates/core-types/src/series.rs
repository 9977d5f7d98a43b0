use crate::enums::Side;
use crate::error::CoreError;
use ndarray::{s, Array1, Array2, Array3, ArrayView1, ArrayView2, Axis};

/// Number of confidence scores carried per asset and period (long, short).
pub const SIGNAL_WIDTH: usize = 2;

/// Per-asset long/short confidence scores, indexed `[asset, time, signal]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionMatrix(Array3<f64>);

impl PredictionMatrix {
    /// Wraps a raw `[asset, time, signal]` array. The signal axis must hold
    /// exactly one long and one short score.
    pub fn new(scores: Array3<f64>) -> Result<Self, CoreError> {
        let width = scores.len_of(Axis(2));
        if width != SIGNAL_WIDTH {
            return Err(CoreError::InvalidInput(
                "predictions".to_string(),
                format!("signal axis has width {width}, expected {SIGNAL_WIDTH}"),
            ));
        }
        Ok(Self(scores))
    }

    pub fn n_assets(&self) -> usize {
        self.0.len_of(Axis(0))
    }

    pub fn n_periods(&self) -> usize {
        self.0.len_of(Axis(1))
    }

    /// The `[asset, time]` plane of confidence scores for one side.
    pub fn scores(&self, side: Side) -> ArrayView2<'_, f64> {
        self.0.index_axis(Axis(2), side.signal_index())
    }

    /// Drops the first `offset` periods.
    pub fn trim(&self, offset: usize) -> Result<Self, CoreError> {
        check_offset("predictions", offset, self.n_periods())?;
        Ok(Self(self.0.slice(s![.., offset.., ..]).to_owned()))
    }
}

/// Realized period returns, indexed `[time, asset]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries(Array2<f64>);

impl ReturnSeries {
    pub fn new(returns: Array2<f64>) -> Self {
        Self(returns)
    }

    pub fn n_periods(&self) -> usize {
        self.0.nrows()
    }

    pub fn n_assets(&self) -> usize {
        self.0.ncols()
    }

    /// Returns of every asset for period `t`.
    pub fn period(&self, t: usize) -> ArrayView1<'_, f64> {
        self.0.row(t)
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.0.view()
    }

    /// Drops the first `offset` periods.
    pub fn trim(&self, offset: usize) -> Result<Self, CoreError> {
        check_offset("returns", offset, self.n_periods())?;
        Ok(Self(self.0.slice(s![offset.., ..]).to_owned()))
    }
}

/// Benchmark index return per period.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkSeries(Array1<f64>);

impl BenchmarkSeries {
    pub fn new(returns: Array1<f64>) -> Self {
        Self(returns)
    }

    pub fn n_periods(&self) -> usize {
        self.0.len()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }

    /// Drops the first `offset` periods.
    pub fn trim(&self, offset: usize) -> Result<Self, CoreError> {
        check_offset("benchmark", offset, self.n_periods())?;
        Ok(Self(self.0.slice(s![offset..]).to_owned()))
    }
}

/// One label per period. Only used to annotate output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateIndex(Vec<String>);

impl DateIndex {
    pub fn new(labels: Vec<String>) -> Self {
        Self(labels)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, t: usize) -> Option<&str> {
        self.0.get(t).map(String::as_str)
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Drops the first `offset` labels.
    pub fn trim(&self, offset: usize) -> Result<Self, CoreError> {
        check_offset("dates", offset, self.len())?;
        Ok(Self(self.0[offset..].to_vec()))
    }
}

/// Portfolio weights for one side, indexed `[time, asset]`.
///
/// Every row either sums to 1.0 (equal weights over the selected assets) or
/// is all zero when nothing was selected in that period.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix(Array2<f64>);

impl WeightMatrix {
    pub fn new(weights: Array2<f64>) -> Self {
        Self(weights)
    }

    pub fn n_periods(&self) -> usize {
        self.0.nrows()
    }

    pub fn n_assets(&self) -> usize {
        self.0.ncols()
    }

    pub fn row(&self, t: usize) -> ArrayView1<'_, f64> {
        self.0.row(t)
    }

    pub fn row_sums(&self) -> Array1<f64> {
        self.0.sum_axis(Axis(1))
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.0.view()
    }
}

fn check_offset(what: &'static str, offset: usize, len: usize) -> Result<(), CoreError> {
    if offset > len {
        return Err(CoreError::OutOfBounds {
            what,
            index: offset,
            len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array};

    #[test]
    fn prediction_matrix_rejects_wrong_signal_width() {
        let scores = Array::zeros((3, 4, 3));
        assert!(matches!(
            PredictionMatrix::new(scores),
            Err(CoreError::InvalidInput(..))
        ));
    }

    #[test]
    fn prediction_scores_select_the_side_plane() {
        let mut scores = Array::zeros((2, 3, 2));
        scores[[1, 2, 0]] = 0.9;
        scores[[1, 2, 1]] = 0.1;
        let predictions = PredictionMatrix::new(scores).unwrap();

        assert_eq!(predictions.n_assets(), 2);
        assert_eq!(predictions.n_periods(), 3);
        assert_eq!(predictions.scores(Side::Long)[[1, 2]], 0.9);
        assert_eq!(predictions.scores(Side::Short)[[1, 2]], 0.1);
    }

    #[test]
    fn trim_drops_leading_periods_on_the_time_axis() {
        let returns = ReturnSeries::new(array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let trimmed = returns.trim(2).unwrap();
        assert_eq!(trimmed.n_periods(), 1);
        assert_eq!(trimmed.period(0).to_vec(), vec![5.0, 6.0]);

        let dates = DateIndex::new(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(dates.trim(1).unwrap().first(), Some("b"));

        let benchmark = BenchmarkSeries::new(array![0.1, 0.2, 0.3]);
        assert_eq!(benchmark.trim(3).unwrap().n_periods(), 0);
    }

    #[test]
    fn trim_past_the_end_is_rejected() {
        let benchmark = BenchmarkSeries::new(array![0.1, 0.2]);
        assert_eq!(
            benchmark.trim(3),
            Err(CoreError::OutOfBounds {
                what: "benchmark",
                index: 3,
                len: 2
            })
        );
    }

    #[test]
    fn weight_matrix_reports_row_sums() {
        let weights = WeightMatrix::new(array![[0.5, 0.0, 0.5], [0.0, 0.0, 0.0]]);
        assert_eq!(weights.row_sums().to_vec(), vec![1.0, 0.0]);
        assert_eq!(weights.row(0).iter().filter(|w| **w > 0.0).count(), 2);
    }
}
