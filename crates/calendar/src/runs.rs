//! Collapsing sorted dates into consecutive runs.

use chrono::NaiveDate;

/// An inclusive run of consecutive calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRun {
    /// First day of the run.
    pub start: NaiveDate,
    /// Last day of the run.
    pub end: NaiveDate,
}

impl DateRun {
    /// Number of days in the run.
    pub fn n_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }
}

impl std::fmt::Display for DateRun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{} -> {}", self.start, self.end)
        }
    }
}

/// Returns `true` if `next` is the calendar day after `prev`.
pub fn is_next_day(prev: NaiveDate, next: NaiveDate) -> bool {
    prev.succ_opt() == Some(next)
}

/// Groups ascending `dates` into maximal runs of consecutive days.
///
/// Duplicate dates are absorbed into the run they belong to.
pub fn date_runs(dates: &[NaiveDate]) -> Vec<DateRun> {
    let mut runs: Vec<DateRun> = Vec::new();
    for &d in dates {
        match runs.last_mut() {
            Some(run) if d == run.end => {}
            Some(run) if is_next_day(run.end, d) => run.end = d,
            _ => runs.push(DateRun { start: d, end: d }),
        }
    }
    runs
}
