use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PercolationError>;

#[derive(Debug, Error)]
pub enum PercolationError {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("site ({row}, {col}) is outside the {n}x{n} grid")]
    IndexOutOfBounds { row: isize, col: isize, n: usize },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PercolationError {
    pub fn invalid_argument<S: Into<String>>(message: S) -> PercolationError {
        PercolationError::InvalidArgument { message: message.into() }
    }

    pub fn config<S: Into<String>>(message: S) -> PercolationError {
        PercolationError::Config { message: message.into() }
    }
}
