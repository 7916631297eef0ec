use std::io;

use thiserror::Error;

/// Error type for dataset loading and analytical query failures.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// A dataset row had the wrong field count or an unparseable value.
    #[error("malformed input at line {line}: {reason}")]
    MalformedInput {
        /// 1-based line where the row starts.
        line: u64,
        /// What was wrong with the row.
        reason: String,
    },
    /// The CSV reader failed.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// The dataset file could not be read.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Top-K asked for more distinct titles than the dataset holds.
    #[error("requested {requested} distinct titles but the dataset only has {available}")]
    InsufficientData {
        /// Titles asked for.
        requested: usize,
        /// Distinct titles in the dataset.
        available: usize,
    },
    /// A caller-supplied value was not recognized.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
