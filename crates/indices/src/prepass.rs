//! Record-wide artifacts shared by every per-year computation.

use eflow_series::AnalysisRecord;
use tracing::debug;

use crate::baseflow::baseflow_by_runs;
use crate::colwell::ColwellMatrix;
use crate::config::{IndicesConfig, PulseThresholdMode};
use crate::frequency::record_median;
use crate::pulses::PulseThresholds;
use crate::rates::DailyDeltas;

/// Immutable results of the sequential pass over the analysis record.
///
/// Per-record vectors are indexed like the record itself.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedArtifacts {
    /// Pulse thresholds of the whole record in global mode.
    pub pulse_thresholds: Option<PulseThresholds>,
    /// Flood/drought thresholds of the whole record in global mode.
    pub flood_drought_thresholds: Option<PulseThresholds>,
    /// Median flow of the record, the `fh5` flood threshold.
    pub median_flow: Option<f64>,
    pub baseflow: Vec<f64>,
    pub deltas: DailyDeltas,
    pub colwell: ColwellMatrix,
}

impl SharedArtifacts {
    pub fn build(record: &AnalysisRecord, config: &IndicesConfig) -> Self {
        let flows = record.flows();
        let global = config.pulse_threshold_mode() == PulseThresholdMode::Global;

        let pulse_thresholds = global
            .then(|| {
                PulseThresholds::from_flows(flows, config.high_percentile(), config.low_percentile())
            })
            .flatten();
        let flood_drought_thresholds = global
            .then(|| {
                PulseThresholds::from_flows(
                    flows,
                    config.mag7_high_percentile(),
                    config.mag7_low_percentile(),
                )
            })
            .flatten();
        if let Some(t) = pulse_thresholds {
            debug!(high = t.high, low = t.low, "global pulse thresholds");
        }
        let median_flow = record_median(flows);

        let runs = record.runs();
        debug!(n_runs = runs.len(), "filtering baseflow");
        let baseflow = baseflow_by_runs(
            flows,
            &runs,
            config.baseflow_recession_constant(),
            config.baseflow_passes(),
        );

        let deltas = DailyDeltas::new(flows, record.contiguous());
        let colwell = ColwellMatrix::build(
            record.dates(),
            flows,
            config.colwell_classes(),
            config.colwell_binning(),
            config.colwell_period(),
        );

        Self {
            pulse_thresholds,
            flood_drought_thresholds,
            median_flow,
            baseflow,
            deltas,
            colwell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use eflow_series::{FlowSeries, segment_water_years};

    fn record(n: u64) -> AnalysisRecord {
        let start = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
        let dates: Vec<NaiveDate> = (0..n).map(|i| start + Days::new(i)).collect();
        let flows = (0..n).map(|i| (i % 10) as f64).collect();
        let series = FlowSeries::new(dates, flows).unwrap();
        let seg = segment_water_years(&series, 1, &[]).unwrap();
        AnalysisRecord::from_segmentation(&series, &seg)
    }

    #[test]
    fn global_mode_sets_thresholds() {
        let rec = record(365);
        let a = SharedArtifacts::build(&rec, &IndicesConfig::new().with_start_month(1));
        assert!(a.pulse_thresholds.is_some());
        assert!(a.flood_drought_thresholds.is_some());
        assert_eq!(a.median_flow, Some(4.0));
        assert_eq!(a.baseflow.len(), rec.len());
        assert_eq!(a.deltas.len(), rec.len());
        assert_eq!(a.colwell.total(), rec.len());
    }

    #[test]
    fn per_year_mode_leaves_thresholds_unset() {
        let rec = record(365);
        let cfg = IndicesConfig::new()
            .with_start_month(1)
            .with_pulse_threshold_mode(PulseThresholdMode::PerYear);
        let a = SharedArtifacts::build(&rec, &cfg);
        assert!(a.pulse_thresholds.is_none());
        assert!(a.flood_drought_thresholds.is_none());
        assert!(a.median_flow.is_some());
    }
}
