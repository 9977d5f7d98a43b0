use core_types::Side;
use ndarray_npy::ReadNpyError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("Shape mismatch on the {axis} axis: {detail}")]
    ShapeMismatch { axis: &'static str, detail: String },

    #[error("Invalid {side} threshold {value}: must lie in [0, 1]")]
    InvalidThreshold { side: Side, value: f64 },

    #[error("Failed to read array file {}: {source}", path.display())]
    ArrayFile {
        path: PathBuf,
        #[source]
        source: ReadNpyError,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input data: {0}")]
    Core(#[from] core_types::CoreError),

    #[error("Data handler error: {0}")]
    Data(String),
}
