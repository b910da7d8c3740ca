//! Hydrologic indices of daily streamflow, by water year.
//!
//! Each complete water year gets one row of indices; a trailing `all_years`
//! row aggregates them and adds the statistics that only exist across
//! years.
//!
//! | Group | Module | Columns |
//! |-------|--------|---------|
//! | Monthly | [`monthly`] | `mean_month_MM`, `median_month_MM` |
//! | Extremes | [`extremes`] | `max_{w}day`, `min_{w}day` |
//! | Pulses | [`pulses`] | high/low pulse counts and durations, pulse rates, flood/drought |
//! | Flood frequency | [`frequency`] | `fh5_days`, `fh5_mean`, `fh5_median` |
//! | Rise/fall | [`rates`] | `mean_rise_rate`, `mean_fall_rate`, `reversals` |
//! | Timing | [`timing`] | `julian_min`, `julian_max`, `center_of_timing`, `cv_julian_*`, `amplitude`, `phase` |
//! | Variability | [`variability`] | `std_daily`, `cv_daily`, `cv_interannual` |
//! | Baseflow | [`baseflow`] | `baseflow_index` (Lyne-Hollick) |
//! | Colwell | [`colwell`] | constancy, contingency, predictability |
//! | L-moments | [`lmoments`] | `lam1`, `tau2`, `tau3`, `tau4`, `ar1` |
//!
//! # Quick start
//!
//! ```
//! use chrono::{Days, NaiveDate};
//! use eflow_indices::{IndicesConfig, RowLabel, compute_indices};
//! use eflow_series::FlowSeries;
//!
//! let start = NaiveDate::from_ymd_opt(2000, 10, 1).unwrap();
//! let dates: Vec<NaiveDate> = (0..730).map(|i| start + Days::new(i)).collect();
//! let flows = (0..730).map(|i| 5.0 + (i % 17) as f64).collect();
//! let series = FlowSeries::new(dates, flows).unwrap();
//!
//! let table = compute_indices(&series, &IndicesConfig::new()).unwrap();
//! assert_eq!(table.year_rows().count(), 2);
//! assert!(table.value(RowLabel::AllYears, "baseflow_index").is_some());
//! ```
//!
//! # Architecture
//!
//! ```text
//! compute_indices()
//!   ├─ IndicesConfig::validate()
//!   ├─ segment_water_years()         (eflow-series)
//!   ├─ AnalysisRecord                (complete years only)
//!   ├─ SharedArtifacts::build()      (prepass.rs, sequential)
//!   ├─ compute_year() per year       (year.rs, rayon when parallel)
//!   └─ aggregate()                   (aggregate.rs)
//! ```

pub mod baseflow;
pub mod colwell;
pub mod config;
pub mod error;
pub mod extremes;
pub mod frequency;
pub mod lmoments;
pub mod monthly;
pub mod naming;
pub mod pulses;
pub mod rates;
pub mod table;
pub mod timing;
pub mod variability;

pub(crate) mod aggregate;
pub(crate) mod prepass;
pub(crate) mod year;

use eflow_series::{AnalysisRecord, FlowSeries, segment_water_years};
use rayon::prelude::*;
use tracing::{debug, info};

pub use config::{
    AggregationMethod, Ar1Scope, ColwellBinning, ColwellPeriod, IndicesConfig, PulseThresholdMode,
};
pub use error::IndicesError;
pub use naming::{NamingConvention, project};
pub use table::{MAG7_COLUMNS, ResultRow, ResultTable, RowLabel, StatIssue, column_names};

use crate::aggregate::aggregate;
use crate::prepass::SharedArtifacts;
use crate::year::{YearIndices, compute_year};

/// Computes every index for each complete water year of `series`.
///
/// Rows are in ascending water-year order followed by `all_years`.
/// Incomplete years are skipped and listed in
/// [`ResultTable::excluded_years`]. The result does not depend on
/// [`IndicesConfig::parallel`].
///
/// # Errors
///
/// - [`IndicesError::InvalidConfig`] if `config` fails validation.
/// - [`IndicesError::Series`] if segmentation fails.
/// - [`IndicesError::NoCompleteYears`] if no water year is complete.
#[tracing::instrument(skip_all, fields(n_days = series.len()))]
pub fn compute_indices(
    series: &FlowSeries,
    config: &IndicesConfig,
) -> Result<ResultTable, IndicesError> {
    config.validate()?;

    let segmentation =
        segment_water_years(series, config.start_month(), config.exclusion_ranges())?;
    let record = AnalysisRecord::from_segmentation(series, &segmentation);
    if record.is_empty() {
        return Err(IndicesError::NoCompleteYears {
            n_years: segmentation.years().len(),
        });
    }
    info!(
        n_complete = segmentation.n_complete(),
        n_excluded = segmentation.years().len() - segmentation.n_complete(),
        n_days = record.len(),
        "analysis record assembled"
    );

    let artifacts = SharedArtifacts::build(&record, config);

    let years: Vec<YearIndices> = if config.parallel() {
        record
            .years()
            .par_iter()
            .map(|y| compute_year(&record, y, &artifacts, config))
            .collect()
    } else {
        record
            .years()
            .iter()
            .map(|y| compute_year(&record, y, &artifacts, config))
            .collect()
    };
    debug!(n_years = years.len(), "per-year indices computed");

    let columns = column_names(config.extreme_windows());
    let mut rows: Vec<ResultRow> = years
        .iter()
        .map(|y| ResultRow {
            label: RowLabel::WaterYear(y.label),
            values: y.values(),
        })
        .collect();

    let mut issues = Vec::new();
    let all_years = aggregate(
        &columns,
        &years,
        &rows,
        &record,
        &artifacts,
        config,
        &mut issues,
    );
    rows.push(all_years);

    Ok(ResultTable::new(
        columns,
        rows,
        issues,
        segmentation.excluded_labels(),
    ))
}

/// The Magnificent Seven columns of [`compute_indices`].
///
/// `lam1`, `tau2`, `tau3`, `tau4`, `ar1`, `amplitude` and `phase`, in that
/// order, for the same rows.
///
/// # Errors
///
/// Same as [`compute_indices`].
pub fn compute_magnificent_seven(
    series: &FlowSeries,
    config: &IndicesConfig,
) -> Result<ResultTable, IndicesError> {
    Ok(compute_indices(series, config)?.select(&MAG7_COLUMNS))
}
