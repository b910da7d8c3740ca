//! Timing of flows within the water year.
//!
//! Day `d` of an `N`-day water year sits at angle `2*pi*d/N`, so the end of
//! one year is adjacent to the start of the next.

use eflow_stats::circular::{
    angle_to_day, circular_mean_day, circular_sd_days, weighted_day_resultant,
};

use crate::extremes::Direction;

/// Circle used when days from years of different length are compared.
pub const MEAN_YEAR_DAYS: f64 = 365.25;

/// Timing statistics of one water year.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimingStats {
    pub julian_min: Option<f64>,
    pub julian_max: Option<f64>,
    pub center_of_timing: Option<f64>,
    pub amplitude: Option<f64>,
    pub phase: Option<f64>,
}

/// 1-based day of the first minimum or maximum of `flows`.
pub fn day_of_extreme(flows: &[f64], direction: Direction) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &q) in flows.iter().enumerate() {
        let better = match (best, direction) {
            (None, _) => true,
            (Some((_, b)), Direction::Max) => q > b,
            (Some((_, b)), Direction::Min) => q < b,
        };
        if better {
            best = Some((i, q));
        }
    }
    best.map(|(i, _)| i + 1)
}

/// Flow-weighted circular mean day in `(0, N]`, `N = flows.len()`.
///
/// Undefined for zero total flow or a vanishing resultant.
pub fn center_of_timing(flows: &[f64]) -> Option<f64> {
    let n = flows.len() as f64;
    let total: f64 = flows.iter().sum();
    if flows.is_empty() || total <= 0.0 {
        return None;
    }
    let r = weighted_day_resultant(
        flows.iter().enumerate().map(|(i, &q)| ((i + 1) as f64, q)),
        n,
    );
    r.direction().map(|a| angle_to_day(a, n))
}

/// Amplitude and peak day of the annual harmonic of `q - mean(q)`.
///
/// The amplitude of a flat year is 0 and its phase undefined.
pub fn annual_harmonic(flows: &[f64]) -> (Option<f64>, Option<f64>) {
    let Some(mean) = eflow_stats::mean(flows) else {
        return (None, None);
    };
    let n = flows.len() as f64;
    let r = weighted_day_resultant(
        flows
            .iter()
            .enumerate()
            .map(|(i, &q)| ((i + 1) as f64, q - mean)),
        n,
    );
    let amplitude = 2.0 * r.length() / n;
    let phase = r.direction().map(|a| angle_to_day(a, n));
    (Some(amplitude), phase)
}

pub fn timing_stats(flows: &[f64]) -> TimingStats {
    let (amplitude, phase) = annual_harmonic(flows);
    TimingStats {
        julian_min: day_of_extreme(flows, Direction::Min).map(|d| d as f64),
        julian_max: day_of_extreme(flows, Direction::Max).map(|d| d as f64),
        center_of_timing: center_of_timing(flows),
        amplitude,
        phase,
    }
}

/// Circular coefficient of variation of per-year days.
///
/// Circular standard deviation in days divided by the circular mean day,
/// both on a [`MEAN_YEAR_DAYS`] circle. Undefined for fewer than two days;
/// identical days give 0.
pub fn cv_julian(days: &[f64]) -> Option<f64> {
    let sd = circular_sd_days(days, MEAN_YEAR_DAYS)?;
    let mean = circular_mean_day(days, MEAN_YEAR_DAYS)?;
    Some(sd / mean)
}
