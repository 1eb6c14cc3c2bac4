//! Report building over engine outputs: summaries, alerts, JSON/CSV export.

mod alerts;
mod summary;

pub use alerts::*;
pub use summary::*;

use thiserror::Error;

/// Report export errors.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
