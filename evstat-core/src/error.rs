//! Error types for evstat.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while loading or classifying events.
#[derive(Error, Debug)]
pub enum EvstatError {
    #[error("Invalid {field} '{value}'. Expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    #[error("End date {end} is before start date {start}")]
    InvertedWindow { start: NaiveDate, end: NaiveDate },

    #[error("Event source error: {0}")]
    Source(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EvstatError {
    pub(crate) fn invalid_date(field: &'static str, value: &str) -> Self {
        EvstatError::InvalidDate {
            field,
            value: value.to_string(),
        }
    }
}

/// Result type alias for evstat operations.
pub type EvstatResult<T> = Result<T, EvstatError>;
