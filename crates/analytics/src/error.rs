use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AnalyticsError {
    #[error("Not enough data to perform calculation: {0}")]
    NotEnoughData(String),

    #[error("Series length mismatch: strategy has {strategy} periods, benchmark has {benchmark}")]
    LengthMismatch { strategy: usize, benchmark: usize },
}
