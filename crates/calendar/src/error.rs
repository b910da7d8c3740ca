//! Error types for the eflow-calendar crate.

/// Error type for all fallible operations in the eflow-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a water-year label produces a date outside the range
    /// representable by `chrono::NaiveDate`.
    #[error("water year {label} is outside the supported date range")]
    LabelOutOfRange {
        /// The water-year label that could not be resolved.
        label: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_month() {
        let err = CalendarError::InvalidMonth { month: 13 };
        assert_eq!(err.to_string(), "invalid month: 13 (must be 1..=12)");
    }

    #[test]
    fn error_label_out_of_range() {
        let err = CalendarError::LabelOutOfRange { label: i32::MAX };
        assert!(err.to_string().contains("outside the supported date range"));
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CalendarError>();
    }
}
