use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Empty feature matrix: fit/predict require at least one row and one column")]
    EmptyMatrix,

    #[error("Ragged feature matrix: row {row} has {actual} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Row count mismatch: {rows} feature rows, {aligned} row-aligned entries")]
    RowCountMismatch { rows: usize, aligned: usize },

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Detector is not fitted: call fit() before predict/score_samples")]
    NotFitted,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Text service error: {0}")]
    TextService(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
