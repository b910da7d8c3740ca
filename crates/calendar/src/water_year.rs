//! Water year labels and spans on the Gregorian calendar.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::CalendarError;

fn check_month(month: u8) -> Result<(), CalendarError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(CalendarError::InvalidMonth { month })
    }
}

/// Returns the water-year label of `date`.
///
/// Water years are labelled by the calendar year in which they end. With
/// `start_month = 10`, 1999-10-01 through 2000-09-30 is water year 2000.
/// With `start_month = 1` the label is the calendar year.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `start_month` is outside 1..=12.
pub fn water_year(date: NaiveDate, start_month: u8) -> Result<i32, CalendarError> {
    check_month(start_month)?;
    if start_month > 1 && date.month() >= u32::from(start_month) {
        Ok(date.year() + 1)
    } else {
        Ok(date.year())
    }
}

/// The inclusive date range covered by one water year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WaterYearSpan {
    label: i32,
    start: NaiveDate,
    end: NaiveDate,
}

impl WaterYearSpan {
    /// Builds the span of water year `label` for the given `start_month`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] for a bad `start_month` and
    /// [`CalendarError::LabelOutOfRange`] if the dates cannot be represented.
    pub fn new(label: i32, start_month: u8) -> Result<Self, CalendarError> {
        check_month(start_month)?;
        let start_year = if start_month == 1 { label } else { label - 1 };
        let start = NaiveDate::from_ymd_opt(start_year, u32::from(start_month), 1)
            .ok_or(CalendarError::LabelOutOfRange { label })?;
        let next_start = NaiveDate::from_ymd_opt(start_year + 1, u32::from(start_month), 1)
            .ok_or(CalendarError::LabelOutOfRange { label })?;
        let end = next_start
            .pred_opt()
            .ok_or(CalendarError::LabelOutOfRange { label })?;
        Ok(Self { label, start, end })
    }

    /// Returns the water-year label (ending calendar year).
    pub fn label(&self) -> i32 {
        self.label
    }

    /// Returns the first day of the water year.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last day of the water year.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the span (365 or 366).
    pub fn n_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Iterates over every date of the span in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let start = self.start;
        (0..self.n_days() as u64).filter_map(move |i| start.checked_add_days(Days::new(i)))
    }
}
