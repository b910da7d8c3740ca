//! Water-year segmentation and completeness checks.

use std::ops::Range;

use chrono::NaiveDate;
use eflow_calendar::{DateRun, WaterYearSpan, date_runs, water_year};
use tracing::{debug, warn};

use crate::error::SeriesError;
use crate::exclusion::ExclusionRange;
use crate::flow::FlowSeries;

/// Why a water year is incomplete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearGaps {
    /// Expected dates absent from the series, collapsed into runs.
    pub missing_runs: Vec<DateRun>,
    /// Number of expected dates absent from the series.
    pub missing_days: usize,
    /// Number of present dates carrying a missing (`NaN`) flow.
    pub nan_days: usize,
    /// Number of dates of the year inside an exclusion range.
    pub excluded_days: usize,
}

impl YearGaps {
    pub fn is_empty(&self) -> bool {
        self.missing_days == 0 && self.nan_days == 0 && self.excluded_days == 0
    }
}

/// One water year of a [`FlowSeries`].
#[derive(Debug, Clone, PartialEq)]
pub struct WaterYear {
    span: WaterYearSpan,
    range: Range<usize>,
    gaps: YearGaps,
}

impl WaterYear {
    pub fn label(&self) -> i32 {
        self.span.label()
    }

    pub fn span(&self) -> &WaterYearSpan {
        &self.span
    }

    pub fn start_date(&self) -> NaiveDate {
        self.span.start()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.span.end()
    }

    /// Calendar days in the year (365 or 366).
    pub fn n_days(&self) -> usize {
        self.span.n_days()
    }

    /// Index range of the year's entries in the source series.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn gaps(&self) -> &YearGaps {
        &self.gaps
    }

    /// Every expected date is present, finite and not excluded.
    pub fn is_complete(&self) -> bool {
        self.gaps.is_empty()
    }

    /// Missing-date runs formatted as `start -> end`.
    pub fn missing_runs(&self) -> Vec<String> {
        self.gaps.missing_runs.iter().map(ToString::to_string).collect()
    }

    /// The year's flows in `series` (the series it was segmented from).
    pub fn flows<'a>(&self, series: &'a FlowSeries) -> &'a [f64] {
        &series.flows()[self.range.clone()]
    }

    /// The year's dates in `series` (the series it was segmented from).
    pub fn dates<'a>(&self, series: &'a FlowSeries) -> &'a [NaiveDate] {
        &series.dates()[self.range.clone()]
    }
}

/// Ordered water years of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    start_month: u8,
    years: Vec<WaterYear>,
}

impl Segmentation {
    pub fn start_month(&self) -> u8 {
        self.start_month
    }

    /// All water years touched by the series, ascending.
    pub fn years(&self) -> &[WaterYear] {
        &self.years
    }

    pub fn complete_years(&self) -> impl Iterator<Item = &WaterYear> + '_ {
        self.years.iter().filter(|y| y.is_complete())
    }

    pub fn n_complete(&self) -> usize {
        self.complete_years().count()
    }

    /// Labels of years dropped for incompleteness, ascending.
    pub fn excluded_labels(&self) -> Vec<i32> {
        self.years
            .iter()
            .filter(|y| !y.is_complete())
            .map(WaterYear::label)
            .collect()
    }
}

/// Splits `series` into water years starting in `start_month`.
///
/// Every water year containing at least one observation is returned, in
/// ascending order. Incomplete years are logged at `warn` with their gaps.
///
/// # Errors
///
/// Returns [`SeriesError::Calendar`] if `start_month` is outside 1..=12.
pub fn segment_water_years(
    series: &FlowSeries,
    start_month: u8,
    exclusions: &[ExclusionRange],
) -> Result<Segmentation, SeriesError> {
    let dates = series.dates();
    let flows = series.flows();
    let mut years = Vec::new();

    let Some((first, last)) = series.date_range() else {
        return Ok(Segmentation { start_month, years });
    };
    let first_label = water_year(first, start_month)?;
    let last_label = water_year(last, start_month)?;

    for label in first_label..=last_label {
        let span = WaterYearSpan::new(label, start_month)?;
        let lo = dates.partition_point(|d| *d < span.start());
        let hi = dates.partition_point(|d| *d <= span.end());
        if lo == hi {
            continue;
        }

        let present = &dates[lo..hi];
        let mut missing = Vec::new();
        let mut cursor = present.iter().peekable();
        for expected in span.dates() {
            if cursor.peek() == Some(&&expected) {
                cursor.next();
            } else {
                missing.push(expected);
            }
        }

        let gaps = YearGaps {
            missing_days: missing.len(),
            missing_runs: date_runs(&missing),
            nan_days: flows[lo..hi].iter().filter(|q| !q.is_finite()).count(),
            excluded_days: exclusions
                .iter()
                .map(|r| r.overlap_days(span.start(), span.end()))
                .sum(),
        };

        let year = WaterYear {
            span,
            range: lo..hi,
            gaps,
        };
        if year.is_complete() {
            debug!(label, "complete water year");
        } else {
            warn!(
                label,
                missing_days = year.gaps.missing_days,
                missing = %year.missing_runs().join(", "),
                nan_days = year.gaps.nan_days,
                excluded_days = year.gaps.excluded_days,
                "excluding incomplete water year"
            );
        }
        years.push(year);
    }

    Ok(Segmentation { start_month, years })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn daily(start: NaiveDate, n: u64) -> FlowSeries {
        let dates: Vec<NaiveDate> = (0..n).map(|i| start + Days::new(i)).collect();
        let flows = vec![1.0; dates.len()];
        FlowSeries::new(dates, flows).unwrap()
    }

    #[test]
    fn full_year_is_complete() {
        let s = daily(ymd(1999, 10, 1), 366);
        let seg = segment_water_years(&s, 10, &[]).unwrap();
        assert_eq!(seg.years().len(), 1);
        let y = &seg.years()[0];
        assert_eq!(y.label(), 2000);
        assert_eq!(y.end_date(), ymd(2000, 9, 30));
        assert_eq!(y.n_days(), 366);
        assert!(y.is_complete());
        assert_eq!(y.range(), 0..366);
    }

    #[test]
    fn partial_edges_are_incomplete() {
        // 2000-06-01 .. 2001-09-30: WY2000 partial, WY2001 complete.
        let start = ymd(2000, 6, 1);
        let n = (ymd(2001, 9, 30) - start).num_days() as u64 + 1;
        let seg = segment_water_years(&daily(start, n), 10, &[]).unwrap();
        assert_eq!(seg.excluded_labels(), vec![2000]);
        let complete: Vec<i32> = seg.complete_years().map(WaterYear::label).collect();
        assert_eq!(complete, vec![2001]);
        assert_eq!(seg.years()[0].gaps().missing_days, 244);
    }

    #[test]
    fn nan_day_makes_year_incomplete() {
        let mut flows = vec![1.0; 365];
        flows[100] = f64::NAN;
        let dates: Vec<NaiveDate> = (0..365).map(|i| ymd(2001, 1, 1) + Days::new(i)).collect();
        let s = FlowSeries::new(dates, flows).unwrap();
        let seg = segment_water_years(&s, 1, &[]).unwrap();
        assert_eq!(seg.years()[0].label(), 2001);
        assert_eq!(seg.years()[0].gaps().nan_days, 1);
        assert_eq!(seg.n_complete(), 0);
    }

    #[test]
    fn exclusion_range_removes_year() {
        let s = daily(ymd(2001, 1, 1), 730);
        let ex = ExclusionRange::new(ymd(2002, 12, 30), ymd(2003, 1, 5)).unwrap();
        let seg = segment_water_years(&s, 1, &[ex]).unwrap();
        assert_eq!(seg.excluded_labels(), vec![2002]);
        assert_eq!(seg.years()[1].gaps().excluded_days, 2);
    }

    #[test]
    fn missing_runs_are_collapsed() {
        let dates: Vec<NaiveDate> = (0..365)
            .map(|i| ymd(2001, 1, 1) + Days::new(i))
            .filter(|d| !(ymd(2001, 3, 1)..=ymd(2001, 3, 3)).contains(d) && *d != ymd(2001, 7, 4))
            .collect();
        let flows = vec![2.0; dates.len()];
        let s = FlowSeries::new(dates, flows).unwrap();
        let seg = segment_water_years(&s, 1, &[]).unwrap();
        assert_eq!(
            seg.years()[0].missing_runs(),
            vec!["2001-03-01 -> 2001-03-03".to_string(), "2001-07-04".to_string()]
        );
    }

    #[test]
    fn years_without_observations_are_skipped() {
        let mut dates: Vec<NaiveDate> = (0..365).map(|i| ymd(2001, 1, 1) + Days::new(i)).collect();
        dates.extend((0..365).map(|i| ymd(2005, 1, 1) + Days::new(i)));
        let flows = vec![1.0; dates.len()];
        let s = FlowSeries::new(dates, flows).unwrap();
        let seg = segment_water_years(&s, 1, &[]).unwrap();
        let labels: Vec<i32> = seg.years().iter().map(WaterYear::label).collect();
        assert_eq!(labels, vec![2001, 2005]);
        assert_eq!(seg.n_complete(), 2);
    }

    #[test]
    fn bad_start_month() {
        let s = daily(ymd(2001, 1, 1), 10);
        assert!(matches!(
            segment_water_years(&s, 13, &[]),
            Err(SeriesError::Calendar(_))
        ));
    }
}
