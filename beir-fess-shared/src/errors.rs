//! Dataset error types.

use thiserror::Error;

/// Errors raised while reading or writing BEIR dataset files.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Underlying file or stream failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSONL line could not be decoded.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl DatasetError {
    /// Create a parse error for a 1-based line number.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
