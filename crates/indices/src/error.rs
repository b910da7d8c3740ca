//! Error types for eflow-indices.

use eflow_series::SeriesError;

/// Error type for all fallible operations in the eflow-indices crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IndicesError {
    /// Returned when a configuration value is out of range.
    #[error("invalid configuration for {field}: {reason}")]
    InvalidConfig {
        /// Name of the offending option.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Wraps an error from series validation or segmentation.
    #[error(transparent)]
    Series(#[from] SeriesError),

    /// Returned when no water year of the series is complete.
    #[error("no complete water year among {n_years} water year(s)")]
    NoCompleteYears {
        /// Number of water years touched by the series.
        n_years: usize,
    },

    /// Returned when a Colwell statistic falls outside `[0, 1]`.
    #[error("colwell {statistic} out of bounds: {value}")]
    ColwellOutOfBounds {
        /// Which statistic failed the check.
        statistic: &'static str,
        /// The computed value.
        value: f64,
    },

    /// Returned when the result table cannot be serialized.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Underlying serializer message.
        reason: String,
    },
}
