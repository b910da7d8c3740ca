//! Indices of one complete water year.

use eflow_series::{AnalysisRecord, RecordYear};

use crate::baseflow::baseflow_index;
use crate::config::{Ar1Scope, IndicesConfig};
use crate::extremes::{ExtremeWindow, extreme_windows};
use crate::frequency::days_above;
use crate::lmoments::{LMomentSet, ar1, l_moments, lag1_pairs};
use crate::monthly::{MonthlyStats, monthly_stats};
use crate::prepass::SharedArtifacts;
use crate::pulses::{
    FloodDroughtStats, PulseRates, PulseStats, PulseThresholds, flood_drought_stats, pulse_rates,
    pulse_stats,
};
use crate::rates::{RiseFallStats, rise_fall_stats};
use crate::timing::{TimingStats, timing_stats};
use crate::variability::{VariabilityStats, variability_stats};

/// Everything computed for one water year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearIndices {
    pub label: i32,
    pub mean_flow: Option<f64>,
    pub monthly: MonthlyStats,
    pub extremes: Vec<ExtremeWindow>,
    pub pulses: Option<PulseStats>,
    pub pulse_rates: Option<PulseRates>,
    pub flood_drought: Option<FloodDroughtStats>,
    /// Days above the record median flow.
    pub fh5_days: Option<usize>,
    pub rise_fall: RiseFallStats,
    pub timing: TimingStats,
    pub variability: VariabilityStats,
    pub baseflow_index: Option<f64>,
    pub lmoments: LMomentSet,
    pub ar1: Option<f64>,
}

/// Computes one year from its slice of the record and the shared artifacts.
pub fn compute_year(
    record: &AnalysisRecord,
    year: &RecordYear,
    artifacts: &SharedArtifacts,
    config: &IndicesConfig,
) -> YearIndices {
    let range = year.range.clone();
    let dates = &record.dates()[range.clone()];
    let flows = &record.flows()[range.clone()];
    let deltas = &artifacts.deltas.deltas[range.clone()];

    let thresholds = artifacts.pulse_thresholds.or_else(|| {
        PulseThresholds::from_flows(flows, config.high_percentile(), config.low_percentile())
    });
    let fd_thresholds = artifacts.flood_drought_thresholds.or_else(|| {
        PulseThresholds::from_flows(
            flows,
            config.mag7_high_percentile(),
            config.mag7_low_percentile(),
        )
    });

    let year_ar1 = match config.ar1_scope() {
        Ar1Scope::WaterYear => ar1(&lag1_pairs(flows, None)),
        Ar1Scope::Record => None,
    };

    YearIndices {
        label: year.label(),
        mean_flow: eflow_stats::mean(flows),
        monthly: monthly_stats(dates, flows),
        extremes: extreme_windows(dates, flows, config.extreme_windows()),
        pulses: thresholds.map(|t| pulse_stats(dates, flows, t)),
        pulse_rates: thresholds.map(|t| pulse_rates(flows, deltas, t)),
        flood_drought: fd_thresholds.map(|t| flood_drought_stats(flows, t)),
        fh5_days: artifacts.median_flow.map(|m| days_above(flows, m)),
        rise_fall: rise_fall_stats(deltas, &artifacts.deltas.reversals[range.clone()]),
        timing: timing_stats(flows),
        variability: variability_stats(flows),
        baseflow_index: baseflow_index(flows, &artifacts.baseflow[range]),
        lmoments: l_moments(flows),
        ar1: year_ar1,
    }
}

fn count(n: usize) -> Option<f64> {
    Some(n as f64)
}

impl YearIndices {
    /// Values in the order of [`column_names`](crate::table::column_names).
    ///
    /// Aggregate-only columns are `None`; non-finite results become `None`.
    pub fn values(&self) -> Vec<Option<f64>> {
        let mut v: Vec<Option<f64>> = Vec::new();
        v.extend(self.monthly.mean);
        v.extend(self.monthly.median);
        v.extend(self.extremes.iter().map(|e| e.value));

        match &self.pulses {
            Some(p) => v.extend([
                count(p.high.count),
                Some(p.high.avg_duration),
                count(p.high.max_duration),
                Some(p.thresholds.high),
                count(p.low.count),
                Some(p.low.avg_duration),
                count(p.low.max_duration),
                Some(p.thresholds.low),
            ]),
            None => v.extend([None; 8]),
        }
        match &self.pulse_rates {
            Some(r) => v.extend([r.high_rise, r.high_fall, r.low_rise, r.low_fall]),
            None => v.extend([None; 4]),
        }
        match &self.flood_drought {
            Some(f) => v.extend([
                Some(f.thresholds.high),
                count(f.freq_high),
                count(f.high.count),
                Some(f.high.avg_duration),
                count(f.high.max_duration),
                Some(f.thresholds.low),
                count(f.freq_low),
                count(f.low.count),
                Some(f.low.avg_duration),
                count(f.low.max_duration),
            ]),
            None => v.extend([None; 10]),
        }
        // fh5_mean and fh5_median are aggregate-only
        v.extend([self.fh5_days.and_then(count), None, None]);

        v.extend([
            self.rise_fall.mean_rise_rate,
            self.rise_fall.mean_fall_rate,
            count(self.rise_fall.reversals),
        ]);
        // cv_julian_* are aggregate-only
        v.extend([
            self.timing.julian_min,
            self.timing.julian_max,
            self.timing.center_of_timing,
            None,
            None,
        ]);
        // cv_interannual is aggregate-only
        v.extend([self.variability.std_daily, self.variability.cv_daily, None]);
        v.push(self.baseflow_index);
        // Colwell is aggregate-only
        v.extend([None; 3]);
        v.extend([
            self.lmoments.lambda1,
            self.lmoments.tau2,
            self.lmoments.tau3,
            self.lmoments.tau4,
            self.ar1,
            self.timing.amplitude,
            self.timing.phase,
        ]);

        v.into_iter().map(|x| x.filter(|f| f.is_finite())).collect()
    }
}
