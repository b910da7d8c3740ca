//! Validated daily flow series.

use chrono::NaiveDate;

use crate::error::SeriesError;
use crate::validate::{
    ValidationCollector, validate_flows, validate_lengths, validate_strictly_increasing,
};

/// A daily streamflow record with strictly increasing dates.
///
/// Missing observations are carried as `NaN`. Dates absent from the record
/// are also missing; segmentation reports both.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSeries {
    dates: Vec<NaiveDate>,
    flows: Vec<f64>,
}

impl FlowSeries {
    /// Build a series from parallel date and flow vectors.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::Validation`] listing every failed check:
    /// mismatched lengths, an empty record, dates that are not strictly
    /// increasing, and negative or infinite flows.
    pub fn new(dates: Vec<NaiveDate>, flows: Vec<f64>) -> Result<Self, SeriesError> {
        let mut c = ValidationCollector::new();
        c.extend(validate_lengths(dates.len(), flows.len()));
        c.extend(validate_strictly_increasing(&dates));
        c.extend(validate_flows(&flows));
        c.finish()?;
        Ok(Self { dates, flows })
    }

    /// Build a series from `(date, flow)` pairs. Same rules as [`FlowSeries::new`].
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (NaiveDate, f64)>,
    ) -> Result<Self, SeriesError> {
        let (dates, flows) = pairs.into_iter().unzip();
        Self::new(dates, flows)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn flows(&self) -> &[f64] {
        &self.flows
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// First and last date of the record.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((*self.dates.first()?, *self.dates.last()?))
    }

    /// Flow on `date`, `None` if the date is absent or the value is missing.
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        let i = self.dates.binary_search(&date).ok()?;
        let q = self.flows[i];
        q.is_finite().then_some(q)
    }

    /// Number of entries with a missing (`NaN`) flow.
    pub fn n_missing_values(&self) -> usize {
        self.flows.iter().filter(|q| q.is_nan()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn builds_valid_series() {
        let s = FlowSeries::new(
            vec![ymd(2000, 1, 1), ymd(2000, 1, 2)],
            vec![1.0, f64::NAN],
        )
        .unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.get(ymd(2000, 1, 1)), Some(1.0));
        assert_eq!(s.get(ymd(2000, 1, 2)), None);
        assert_eq!(s.get(ymd(2000, 1, 3)), None);
        assert_eq!(s.n_missing_values(), 1);
        assert_eq!(s.date_range(), Some((ymd(2000, 1, 1), ymd(2000, 1, 2))));
    }

    #[test]
    fn collects_all_failures() {
        let err = FlowSeries::new(
            vec![ymd(2000, 1, 2), ymd(2000, 1, 1)],
            vec![-1.0, 2.0],
        )
        .unwrap_err();
        match err {
            SeriesError::Validation { count, .. } => assert_eq!(count, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_empty() {
        assert!(FlowSeries::new(vec![], vec![]).is_err());
    }

    #[test]
    fn from_pairs_unzips() {
        let s = FlowSeries::from_pairs([(ymd(2000, 1, 1), 3.0)]).unwrap();
        assert_eq!(s.flows(), &[3.0]);
    }
}
