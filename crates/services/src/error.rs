//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted while turning a question file into a bank.
///
/// `NoValidQuestions` means decoding worked but every row was rejected; the
/// other variants mean the file itself could not be read or decoded.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("file was read but contains no valid questions ({rows} rows checked)")]
    NoValidQuestions { rows: usize },
    #[error("unsupported question file format: {0}")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors emitted by `Playthrough`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,
    #[error("session already completed")]
    Completed,
    #[error("current question has not been answered yet")]
    Unresolved,
}
