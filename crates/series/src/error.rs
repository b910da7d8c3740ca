//! Error types for eflow-series.

use chrono::NaiveDate;
use eflow_calendar::CalendarError;

/// Error type for all fallible operations in the eflow-series crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when an exclusion range ends before it starts.
    #[error("invalid exclusion range: {start} is after {end}")]
    InvalidExclusion {
        /// First day of the range.
        start: NaiveDate,
        /// Last day of the range.
        end: NaiveDate,
    },

    /// Wraps an error originating from the eflow-calendar crate.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}
