//! Folding per-year rows into the `all_years` row.

use eflow_series::AnalysisRecord;
use eflow_stats::circular::circular_mean_day;
use tracing::warn;

use crate::colwell::{ColwellStats, colwell_stats};
use crate::config::{Ar1Scope, IndicesConfig};
use crate::error::IndicesError;
use crate::frequency::flood_frequency;
use crate::lmoments::{ar1, lag1_pairs};
use crate::prepass::SharedArtifacts;
use crate::table::{CIRCULAR_DAY_COLUMNS, COLWELL_COLUMNS, ResultRow, RowLabel, StatIssue};
use crate::timing::{MEAN_YEAR_DAYS, cv_julian};
use crate::variability::cv_interannual;
use crate::year::YearIndices;

/// Builds the `all_years` row.
///
/// Each per-year column collapses its defined values with the configured
/// method; day-of-year columns use the circular mean instead. Columns that
/// only make sense across years are computed here. Degenerate Colwell
/// tables are pushed to `issues` and left undefined.
pub fn aggregate(
    columns: &[String],
    years: &[YearIndices],
    year_rows: &[ResultRow],
    record: &AnalysisRecord,
    artifacts: &SharedArtifacts,
    config: &IndicesConfig,
    issues: &mut Vec<StatIssue>,
) -> ResultRow {
    let method = config.aggregation_method();
    let mut values: Vec<Option<f64>> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let defined: Vec<f64> = year_rows.iter().filter_map(|r| r.values[i]).collect();
            if defined.is_empty() {
                None
            } else if CIRCULAR_DAY_COLUMNS.contains(&name.as_str()) {
                circular_mean_day(&defined, MEAN_YEAR_DAYS)
            } else {
                method.apply(&defined)
            }
        })
        .collect();

    let mut set = |name: &str, value: Option<f64>| {
        if let Some(i) = columns.iter().position(|c| c == name) {
            values[i] = value;
        }
    };

    let julian = |pick: fn(&YearIndices) -> Option<f64>| -> Vec<f64> {
        years.iter().filter_map(pick).collect()
    };
    set("cv_julian_min", cv_julian(&julian(|y| y.timing.julian_min)));
    set("cv_julian_max", cv_julian(&julian(|y| y.timing.julian_max)));

    let means: Vec<f64> = years.iter().filter_map(|y| y.mean_flow).collect();
    set("cv_interannual", cv_interannual(&means));

    let fh5: Vec<f64> = years.iter().filter_map(|y| y.fh5_days).map(|n| n as f64).collect();
    let (fh5_mean, fh5_median) = flood_frequency(&fh5);
    set("fh5_mean", fh5_mean);
    set("fh5_median", fh5_median);

    let colwell = colwell_values(colwell_stats(&artifacts.colwell), issues);
    for (name, value) in COLWELL_COLUMNS.into_iter().zip(colwell) {
        set(name, value);
    }

    if config.ar1_scope() == Ar1Scope::Record {
        let pairs = lag1_pairs(record.flows(), Some(record.contiguous()));
        set("ar1", ar1(&pairs));
    }

    ResultRow {
        label: RowLabel::AllYears,
        values: values
            .into_iter()
            .map(|x| x.filter(|f| f.is_finite()))
            .collect(),
    }
}

/// Colwell columns, or an issue per column when the statistics are out of bounds.
fn colwell_values(
    outcome: Result<Option<ColwellStats>, IndicesError>,
    issues: &mut Vec<StatIssue>,
) -> [Option<f64>; 3] {
    match outcome {
        Ok(Some(s)) => [Some(s.constancy), Some(s.contingency), Some(s.predictability)],
        Ok(None) => [None; 3],
        Err(e) => {
            warn!(error = %e, "colwell statistics undefined");
            for name in COLWELL_COLUMNS {
                issues.push(StatIssue {
                    column: name.to_string(),
                    message: e.to_string(),
                });
            }
            [None; 3]
        }
    }
}
