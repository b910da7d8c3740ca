//! The analysis record: complete water years laid end to end.

use std::ops::Range;

use chrono::NaiveDate;
use eflow_calendar::{WaterYearSpan, is_next_day};

use crate::flow::FlowSeries;
use crate::segment::Segmentation;

/// One complete year inside an [`AnalysisRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordYear {
    /// Calendar span of the year.
    pub span: WaterYearSpan,
    /// Index range into the record (not the source series).
    pub range: Range<usize>,
}

impl RecordYear {
    pub fn label(&self) -> i32 {
        self.span.label()
    }
}

/// Days of all complete water years, in date order.
///
/// `contiguous[i]` is `true` when day `i - 1` of the record is the calendar
/// day before day `i`. It is `false` for the first day and after every gap
/// left by an excluded year.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRecord {
    dates: Vec<NaiveDate>,
    flows: Vec<f64>,
    contiguous: Vec<bool>,
    years: Vec<RecordYear>,
}

impl AnalysisRecord {
    /// Gathers the complete years of `segmentation` from `series`.
    pub fn from_segmentation(series: &FlowSeries, segmentation: &Segmentation) -> Self {
        let mut dates = Vec::new();
        let mut flows = Vec::new();
        let mut years = Vec::new();
        for year in segmentation.complete_years() {
            let start = dates.len();
            dates.extend_from_slice(year.dates(series));
            flows.extend_from_slice(year.flows(series));
            years.push(RecordYear {
                span: *year.span(),
                range: start..dates.len(),
            });
        }
        let contiguous = std::iter::once(false)
            .chain(dates.windows(2).map(|w| is_next_day(w[0], w[1])))
            .take(dates.len())
            .collect();
        Self {
            dates,
            flows,
            contiguous,
            years,
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn flows(&self) -> &[f64] {
        &self.flows
    }

    pub fn contiguous(&self) -> &[bool] {
        &self.contiguous
    }

    pub fn years(&self) -> &[RecordYear] {
        &self.years
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Maximal index ranges of consecutive calendar days.
    pub fn runs(&self) -> Vec<Range<usize>> {
        let mut runs = Vec::new();
        let mut start = 0;
        for i in 1..self.len() {
            if !self.contiguous[i] {
                runs.push(start..i);
                start = i;
            }
        }
        if !self.is_empty() {
            runs.push(start..self.len());
        }
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::segment_water_years;
    use chrono::Days;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar_years(years: &[i32]) -> FlowSeries {
        let mut dates = Vec::new();
        for &y in years {
            let start = ymd(y, 1, 1);
            let n = (ymd(y, 12, 31) - start).num_days() as u64 + 1;
            dates.extend((0..n).map(|i| start + Days::new(i)));
        }
        let flows = (0..dates.len()).map(|i| i as f64).collect();
        FlowSeries::new(dates, flows).unwrap()
    }

    #[test]
    fn adjacent_years_are_one_run() {
        let s = calendar_years(&[2001, 2002]);
        let seg = segment_water_years(&s, 1, &[]).unwrap();
        let rec = AnalysisRecord::from_segmentation(&s, &seg);
        assert_eq!(rec.len(), 730);
        assert_eq!(rec.runs(), vec![0..730]);
        assert_eq!(rec.years()[1].range, 365..730);
        assert!(!rec.contiguous()[0]);
        assert!(rec.contiguous()[365]);
    }

    #[test]
    fn excluded_year_splits_runs() {
        let mut s = calendar_years(&[2001, 2002, 2003]);
        let mut flows = s.flows().to_vec();
        flows[400] = f64::NAN;
        s = FlowSeries::new(s.dates().to_vec(), flows).unwrap();
        let seg = segment_water_years(&s, 1, &[]).unwrap();
        let rec = AnalysisRecord::from_segmentation(&s, &seg);
        let labels: Vec<i32> = rec.years().iter().map(RecordYear::label).collect();
        assert_eq!(labels, vec![2001, 2003]);
        assert_eq!(rec.runs(), vec![0..365, 365..730]);
        assert!(!rec.contiguous()[365]);
    }

    #[test]
    fn empty_when_no_complete_year() {
        let s = FlowSeries::new(vec![ymd(2001, 5, 5)], vec![1.0]).unwrap();
        let seg = segment_water_years(&s, 1, &[]).unwrap();
        let rec = AnalysisRecord::from_segmentation(&s, &seg);
        assert!(rec.is_empty());
        assert!(rec.runs().is_empty());
    }
}
