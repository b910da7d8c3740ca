//! Colwell (1974) predictability of periodic flow.
//!
//! Flows are classed into `s` states and counted per time period. With
//! natural-log entropies `H(X)` of the states, `H(Y)` of the periods and
//! `H(X,Y)` of the joint table:
//!
//! ```text
//! constancy      C = 1 - H(X) / ln s
//! contingency    M = (H(X) + H(Y) - H(X,Y)) / ln s
//! predictability P = C + M
//! ```

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::config::{ColwellBinning, ColwellPeriod};
use crate::error::IndicesError;

/// Allowed excursion outside `[0, 1]` before a value is rejected.
const BOUNDS_TOLERANCE: f64 = 1e-9;

/// State-by-period count table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColwellMatrix {
    n_classes: usize,
    n_periods: usize,
    /// Row-major, `class * n_periods + period`.
    counts: Vec<usize>,
}

fn period_of(date: NaiveDate, period: ColwellPeriod) -> usize {
    match period {
        ColwellPeriod::Month => date.month0() as usize,
        ColwellPeriod::Week => (date.ordinal0() as usize / 7).min(51),
    }
}

/// Class index of every flow.
fn classify(flows: &[f64], n_classes: usize, binning: ColwellBinning) -> Vec<usize> {
    match binning {
        ColwellBinning::LogSpaced => {
            let logs: Vec<f64> = flows.iter().map(|q| q.ln_1p()).collect();
            let lo = logs.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = logs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let width = (hi - lo) / n_classes as f64;
            logs.iter()
                .map(|&y| {
                    if width > 0.0 {
                        (((y - lo) / width) as usize).min(n_classes - 1)
                    } else {
                        0
                    }
                })
                .collect()
        }
        ColwellBinning::Quantile => {
            let sorted = eflow_stats::sorted(flows);
            let mut edges: Vec<f64> = (1..n_classes)
                .filter_map(|k| eflow_stats::quantile_type7(&sorted, k as f64 / n_classes as f64))
                .collect();
            edges.dedup();
            flows
                .iter()
                .map(|&q| edges.partition_point(|&e| e < q))
                .collect()
        }
    }
}

impl ColwellMatrix {
    /// Counts each day of `flows` by flow class and time period.
    pub fn build(
        dates: &[NaiveDate],
        flows: &[f64],
        n_classes: usize,
        binning: ColwellBinning,
        period: ColwellPeriod,
    ) -> Self {
        let n_periods = period.n_periods();
        let mut counts = vec![0; n_classes * n_periods];
        for (date, class) in dates.iter().zip(classify(flows, n_classes, binning)) {
            counts[class * n_periods + period_of(*date, period)] += 1;
        }
        Self {
            n_classes,
            n_periods,
            counts,
        }
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn n_periods(&self) -> usize {
        self.n_periods
    }

    pub fn count(&self, class: usize, period: usize) -> usize {
        self.counts[class * self.n_periods + period]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Constancy, contingency and predictability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColwellStats {
    pub constancy: f64,
    pub contingency: f64,
    pub predictability: f64,
}

fn entropy(counts: impl Iterator<Item = usize>, total: f64) -> f64 {
    counts
        .filter(|&c| c > 0)
        .map(|c| {
            let p = c as f64 / total;
            -p * p.ln()
        })
        .sum()
}

fn check_bounds(statistic: &'static str, value: f64) -> Result<f64, IndicesError> {
    if !value.is_finite() || !(-BOUNDS_TOLERANCE..=1.0 + BOUNDS_TOLERANCE).contains(&value) {
        return Err(IndicesError::ColwellOutOfBounds { statistic, value });
    }
    Ok(value.clamp(0.0, 1.0))
}

/// Colwell statistics of `matrix`. `Ok(None)` for an empty table.
///
/// # Errors
///
/// Returns [`IndicesError::ColwellOutOfBounds`] when a statistic leaves
/// `[0, 1]` by more than a rounding tolerance.
pub fn colwell_stats(matrix: &ColwellMatrix) -> Result<Option<ColwellStats>, IndicesError> {
    let total = matrix.total();
    if total == 0 || matrix.n_classes < 2 {
        return Ok(None);
    }
    let total = total as f64;
    let (s, p) = (matrix.n_classes, matrix.n_periods);

    let h_x = entropy((0..s).map(|c| (0..p).map(|t| matrix.count(c, t)).sum::<usize>()), total);
    let h_y = entropy((0..p).map(|t| (0..s).map(|c| matrix.count(c, t)).sum::<usize>()), total);
    let h_xy = entropy(matrix.counts.iter().copied(), total);

    let ln_s = (s as f64).ln();
    let constancy = check_bounds("constancy", 1.0 - h_x / ln_s)?;
    let contingency = check_bounds("contingency", (h_x + h_y - h_xy) / ln_s)?;
    let predictability = check_bounds("predictability", constancy + contingency)?;
    Ok(Some(ColwellStats {
        constancy,
        contingency,
        predictability,
    }))
}
