//! High and low flow pulses.
//!
//! A pulse is a maximal run of consecutive days at or beyond a threshold.
//! Runs are detected inside one water year, so a pulse never crosses a year
//! boundary or a gap in the record.

use std::ops::Range;

use chrono::NaiveDate;
use serde::Serialize;

/// Side of the flow distribution a pulse belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PulseKind {
    High,
    Low,
}

/// One detected pulse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pulse {
    pub kind: PulseKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: usize,
}

/// High and low flow thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseThresholds {
    pub high: f64,
    pub low: f64,
}

impl PulseThresholds {
    /// Type-7 percentiles (0-100) of `flows`. `None` for empty input.
    pub fn from_flows(flows: &[f64], high_percentile: f64, low_percentile: f64) -> Option<Self> {
        let sorted = eflow_stats::sorted(flows);
        Some(Self {
            high: eflow_stats::quantile_type7(&sorted, high_percentile / 100.0)?,
            low: eflow_stats::quantile_type7(&sorted, low_percentile / 100.0)?,
        })
    }
}

/// Maximal index runs where `pred` holds.
fn runs(flows: &[f64], pred: impl Fn(f64) -> bool) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, &q) in flows.iter().enumerate() {
        match (pred(q), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                out.push(s..i);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push(s..flows.len());
    }
    out
}

/// Pulses of `kind` using closed comparisons: `q >= threshold` for high,
/// `q <= threshold` for low.
pub fn detect_pulses(
    dates: &[NaiveDate],
    flows: &[f64],
    kind: PulseKind,
    threshold: f64,
) -> Vec<Pulse> {
    let hit = |q: f64| match kind {
        PulseKind::High => q >= threshold,
        PulseKind::Low => q <= threshold,
    };
    runs(flows, hit)
        .into_iter()
        .map(|r| Pulse {
            kind,
            start_date: dates[r.start],
            end_date: dates[r.end - 1],
            duration_days: r.len(),
        })
        .collect()
}

/// Count and durations of a set of events.
///
/// Durations are 0 when there is no event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PulseSummary {
    pub count: usize,
    pub avg_duration: f64,
    pub max_duration: usize,
}

impl PulseSummary {
    pub fn from_durations(durations: impl IntoIterator<Item = usize>) -> Self {
        let mut s = Self::default();
        let mut total = 0usize;
        for d in durations {
            s.count += 1;
            total += d;
            s.max_duration = s.max_duration.max(d);
        }
        if s.count > 0 {
            s.avg_duration = total as f64 / s.count as f64;
        }
        s
    }

    pub fn from_pulses(pulses: &[Pulse]) -> Self {
        Self::from_durations(pulses.iter().map(|p| p.duration_days))
    }
}

/// Pulse statistics of one water year.
#[derive(Debug, Clone, PartialEq)]
pub struct PulseStats {
    pub thresholds: PulseThresholds,
    pub high: PulseSummary,
    pub low: PulseSummary,
}

pub fn pulse_stats(dates: &[NaiveDate], flows: &[f64], thresholds: PulseThresholds) -> PulseStats {
    PulseStats {
        thresholds,
        high: PulseSummary::from_pulses(&detect_pulses(
            dates,
            flows,
            PulseKind::High,
            thresholds.high,
        )),
        low: PulseSummary::from_pulses(&detect_pulses(
            dates,
            flows,
            PulseKind::Low,
            thresholds.low,
        )),
    }
}

/// Mean daily rise and fall inside high and low pulses.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PulseRates {
    pub high_rise: Option<f64>,
    pub high_fall: Option<f64>,
    pub low_rise: Option<f64>,
    pub low_fall: Option<f64>,
}

fn mean_where(deltas: impl Iterator<Item = f64>, pred: impl Fn(f64) -> bool) -> Option<f64> {
    let picked: Vec<f64> = deltas.filter(|&d| pred(d)).collect();
    eflow_stats::mean(&picked)
}

fn deltas_inside<'a>(
    flows: &'a [f64],
    deltas: &'a [Option<f64>],
    in_pulse: impl Fn(f64) -> bool + 'a,
) -> impl Iterator<Item = f64> + 'a {
    flows
        .iter()
        .zip(deltas)
        .filter(move |&(&q, _)| in_pulse(q))
        .filter_map(|(_, d)| *d)
}

/// Rates over the days inside pulses.
///
/// `deltas[i]` is the change from the previous day into day `i`, `None`
/// where the previous day is not available. A rate with no qualifying
/// delta is undefined.
pub fn pulse_rates(flows: &[f64], deltas: &[Option<f64>], thresholds: PulseThresholds) -> PulseRates {
    let PulseThresholds { high, low } = thresholds;
    PulseRates {
        high_rise: mean_where(deltas_inside(flows, deltas, move |q| q >= high), |d| d > 0.0),
        high_fall: mean_where(deltas_inside(flows, deltas, move |q| q >= high), |d| d < 0.0),
        low_rise: mean_where(deltas_inside(flows, deltas, move |q| q <= low), |d| d > 0.0),
        low_fall: mean_where(deltas_inside(flows, deltas, move |q| q <= low), |d| d < 0.0),
    }
}

/// Flood and drought indicators: days strictly beyond the outer
/// percentiles and the runs they form.
#[derive(Debug, Clone, PartialEq)]
pub struct FloodDroughtStats {
    pub thresholds: PulseThresholds,
    pub freq_high: usize,
    pub freq_low: usize,
    pub high: PulseSummary,
    pub low: PulseSummary,
}

pub fn flood_drought_stats(flows: &[f64], thresholds: PulseThresholds) -> FloodDroughtStats {
    let high = runs(flows, |q| q > thresholds.high);
    let low = runs(flows, |q| q < thresholds.low);
    FloodDroughtStats {
        thresholds,
        freq_high: high.iter().map(|r| r.len()).sum(),
        freq_low: low.iter().map(|r| r.len()).sum(),
        high: PulseSummary::from_durations(high.iter().map(|r| r.len())),
        low: PulseSummary::from_durations(low.iter().map(|r| r.len())),
    }
}
