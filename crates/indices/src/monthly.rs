//! Monthly mean and median flows.

use chrono::{Datelike, NaiveDate};

/// Mean and median flow for each calendar month (index 0 = January).
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyStats {
    pub mean: [Option<f64>; 12],
    pub median: [Option<f64>; 12],
}

/// Groups `flows` by the calendar month of `dates`.
///
/// A month without days is undefined.
pub fn monthly_stats(dates: &[NaiveDate], flows: &[f64]) -> MonthlyStats {
    let mut buckets: [Vec<f64>; 12] = Default::default();
    for (d, &q) in dates.iter().zip(flows) {
        buckets[d.month0() as usize].push(q);
    }
    let mut stats = MonthlyStats {
        mean: [None; 12],
        median: [None; 12],
    };
    for (m, bucket) in buckets.iter().enumerate() {
        stats.mean[m] = eflow_stats::mean(bucket);
        stats.median[m] = eflow_stats::median(&eflow_stats::sorted(bucket));
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Days;

    #[test]
    fn groups_by_calendar_month() {
        let start = NaiveDate::from_ymd_opt(2001, 1, 30).unwrap();
        let dates: Vec<NaiveDate> = (0..4).map(|i| start + Days::new(i)).collect();
        // Jan 30, Jan 31, Feb 1, Feb 2
        let flows = [1.0, 3.0, 10.0, 20.0];
        let s = monthly_stats(&dates, &flows);
        assert_relative_eq!(s.mean[0].unwrap(), 2.0);
        assert_relative_eq!(s.median[1].unwrap(), 15.0);
        assert!(s.mean[2].is_none());
        assert!(s.median[11].is_none());
    }
}
