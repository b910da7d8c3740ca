//! Date ranges removed from analysis.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

/// Inclusive date range whose days are treated as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl ExclusionRange {
    /// # Errors
    ///
    /// Returns [`SeriesError::InvalidExclusion`] if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, SeriesError> {
        if start > end {
            return Err(SeriesError::InvalidExclusion { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days shared with the inclusive range `[from, to]`.
    pub fn overlap_days(&self, from: NaiveDate, to: NaiveDate) -> usize {
        let lo = self.start.max(from);
        let hi = self.end.min(to);
        if lo > hi {
            0
        } else {
            (hi - lo).num_days() as usize + 1
        }
    }
}
