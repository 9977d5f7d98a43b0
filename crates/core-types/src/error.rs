use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Index {index} is out of bounds for {what} of length {len}")]
    OutOfBounds {
        what: &'static str,
        index: usize,
        len: usize,
    },
}
