//! Configuration for index computation.

use eflow_series::ExclusionRange;
use serde::{Deserialize, Serialize};

use crate::error::IndicesError;

/// Where pulse thresholds come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PulseThresholdMode {
    /// Percentiles of the whole analysis record, computed once.
    #[default]
    Global,
    /// Percentiles of each water year's own flows.
    PerYear,
}

/// How several values collapse into one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMethod {
    #[default]
    Mean,
    Median,
}

impl AggregationMethod {
    /// Mean or median of `values`; `None` when empty.
    pub fn apply(self, values: &[f64]) -> Option<f64> {
        match self {
            Self::Mean => eflow_stats::mean(values),
            Self::Median => eflow_stats::median(&eflow_stats::sorted(values)),
        }
    }
}

/// Which day pairs feed the lag-1 autocorrelation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ar1Scope {
    /// Pairs inside each water year; `all_years` aggregates the per-year values.
    #[default]
    WaterYear,
    /// All consecutive-day pairs of the record; reported on `all_years` only.
    Record,
}

/// Flow classes of the Colwell contingency table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColwellBinning {
    /// Equal-width bins of `ln(1 + q)` between the record minimum and maximum.
    #[default]
    LogSpaced,
    /// Type-7 quantile edges; duplicate edges are dropped.
    Quantile,
}

/// Time periods of the Colwell contingency table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColwellPeriod {
    /// Calendar months (12 periods).
    #[default]
    Month,
    /// Seven-day blocks of the calendar year (52 periods).
    Week,
}

impl ColwellPeriod {
    pub fn n_periods(self) -> usize {
        match self {
            Self::Month => 12,
            Self::Week => 52,
        }
    }
}

/// Options for [`compute_indices`](crate::compute_indices).
///
/// # Example
///
/// ```
/// use eflow_indices::{IndicesConfig, PulseThresholdMode};
///
/// let config = IndicesConfig::new()
///     .with_start_month(1)
///     .with_pulse_threshold_mode(PulseThresholdMode::PerYear)
///     .with_extreme_windows(vec![1, 7, 30]);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IndicesConfig {
    start_month: u8,
    exclusion_ranges: Vec<ExclusionRange>,
    pulse_threshold_mode: PulseThresholdMode,
    high_percentile: f64,
    low_percentile: f64,
    mag7_high_percentile: f64,
    mag7_low_percentile: f64,
    extreme_windows: Vec<usize>,
    baseflow_recession_constant: f64,
    baseflow_passes: usize,
    aggregation_method: AggregationMethod,
    ar1_scope: Ar1Scope,
    colwell_classes: usize,
    colwell_binning: ColwellBinning,
    colwell_period: ColwellPeriod,
    parallel: bool,
}

impl Default for IndicesConfig {
    fn default() -> Self {
        Self {
            start_month: 10,
            exclusion_ranges: Vec::new(),
            pulse_threshold_mode: PulseThresholdMode::Global,
            high_percentile: 75.0,
            low_percentile: 25.0,
            mag7_high_percentile: 90.0,
            mag7_low_percentile: 10.0,
            extreme_windows: vec![1, 3, 7, 30, 90],
            baseflow_recession_constant: 0.925,
            baseflow_passes: 3,
            aggregation_method: AggregationMethod::Mean,
            ar1_scope: Ar1Scope::WaterYear,
            colwell_classes: 10,
            colwell_binning: ColwellBinning::LogSpaced,
            colwell_period: ColwellPeriod::Month,
            parallel: true,
        }
    }
}

impl IndicesConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the first month of the water year (1-12).
    pub fn with_start_month(mut self, month: u8) -> Self {
        self.start_month = month;
        self
    }

    /// Sets date ranges whose days are treated as missing.
    pub fn with_exclusion_ranges(mut self, ranges: Vec<ExclusionRange>) -> Self {
        self.exclusion_ranges = ranges;
        self
    }

    pub fn with_pulse_threshold_mode(mut self, mode: PulseThresholdMode) -> Self {
        self.pulse_threshold_mode = mode;
        self
    }

    /// Sets the high/low pulse percentiles (0-100).
    pub fn with_pulse_percentiles(mut self, high: f64, low: f64) -> Self {
        self.high_percentile = high;
        self.low_percentile = low;
        self
    }

    /// Sets the flood/drought percentiles (0-100).
    pub fn with_mag7_percentiles(mut self, high: f64, low: f64) -> Self {
        self.mag7_high_percentile = high;
        self.mag7_low_percentile = low;
        self
    }

    /// Sets the moving-average window lengths in days.
    pub fn with_extreme_windows(mut self, windows: Vec<usize>) -> Self {
        self.extreme_windows = windows;
        self
    }

    pub fn with_baseflow_recession_constant(mut self, alpha: f64) -> Self {
        self.baseflow_recession_constant = alpha;
        self
    }

    pub fn with_baseflow_passes(mut self, passes: usize) -> Self {
        self.baseflow_passes = passes;
        self
    }

    pub fn with_aggregation_method(mut self, method: AggregationMethod) -> Self {
        self.aggregation_method = method;
        self
    }

    pub fn with_ar1_scope(mut self, scope: Ar1Scope) -> Self {
        self.ar1_scope = scope;
        self
    }

    pub fn with_colwell_classes(mut self, classes: usize) -> Self {
        self.colwell_classes = classes;
        self
    }

    pub fn with_colwell_binning(mut self, binning: ColwellBinning) -> Self {
        self.colwell_binning = binning;
        self
    }

    pub fn with_colwell_period(mut self, period: ColwellPeriod) -> Self {
        self.colwell_period = period;
        self
    }

    /// Enables or disables the parallel per-year stage.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn start_month(&self) -> u8 {
        self.start_month
    }

    pub fn exclusion_ranges(&self) -> &[ExclusionRange] {
        &self.exclusion_ranges
    }

    pub fn pulse_threshold_mode(&self) -> PulseThresholdMode {
        self.pulse_threshold_mode
    }

    pub fn high_percentile(&self) -> f64 {
        self.high_percentile
    }

    pub fn low_percentile(&self) -> f64 {
        self.low_percentile
    }

    pub fn mag7_high_percentile(&self) -> f64 {
        self.mag7_high_percentile
    }

    pub fn mag7_low_percentile(&self) -> f64 {
        self.mag7_low_percentile
    }

    pub fn extreme_windows(&self) -> &[usize] {
        &self.extreme_windows
    }

    pub fn baseflow_recession_constant(&self) -> f64 {
        self.baseflow_recession_constant
    }

    pub fn baseflow_passes(&self) -> usize {
        self.baseflow_passes
    }

    pub fn aggregation_method(&self) -> AggregationMethod {
        self.aggregation_method
    }

    pub fn ar1_scope(&self) -> Ar1Scope {
        self.ar1_scope
    }

    pub fn colwell_classes(&self) -> usize {
        self.colwell_classes
    }

    pub fn colwell_binning(&self) -> ColwellBinning {
        self.colwell_binning
    }

    pub fn colwell_period(&self) -> ColwellPeriod {
        self.colwell_period
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IndicesError::InvalidConfig`] naming the first bad option.
    pub fn validate(&self) -> Result<(), IndicesError> {
        if !(1..=12).contains(&self.start_month) {
            return Err(invalid(
                "start_month",
                format!("must be 1..=12, got {}", self.start_month),
            ));
        }
        check_percentile_pair("pulse percentiles", self.high_percentile, self.low_percentile)?;
        check_percentile_pair(
            "mag7 percentiles",
            self.mag7_high_percentile,
            self.mag7_low_percentile,
        )?;

        if self.extreme_windows.is_empty() {
            return Err(invalid("extreme_windows", "must not be empty".to_string()));
        }
        for (i, &w) in self.extreme_windows.iter().enumerate() {
            if w == 0 {
                return Err(invalid("extreme_windows", "window of 0 days".to_string()));
            }
            if self.extreme_windows[..i].contains(&w) {
                return Err(invalid("extreme_windows", format!("duplicate window {w}")));
            }
        }

        let alpha = self.baseflow_recession_constant;
        if !alpha.is_finite() || alpha <= 0.0 || alpha >= 1.0 {
            return Err(invalid(
                "baseflow_recession_constant",
                format!("must be in (0, 1), got {alpha}"),
            ));
        }
        if self.baseflow_passes < 1 {
            return Err(invalid("baseflow_passes", "must be >= 1, got 0".to_string()));
        }
        if self.colwell_classes < 2 {
            return Err(invalid(
                "colwell_classes",
                format!("must be >= 2, got {}", self.colwell_classes),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> IndicesError {
    IndicesError::InvalidConfig { field, reason }
}

fn check_percentile_pair(field: &'static str, high: f64, low: f64) -> Result<(), IndicesError> {
    for p in [high, low] {
        if !p.is_finite() || p <= 0.0 || p >= 100.0 {
            return Err(invalid(field, format!("{p} is outside (0, 100)")));
        }
    }
    if low >= high {
        return Err(invalid(field, format!("low {low} must be below high {high}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = IndicesConfig::default();
        assert_eq!(cfg.start_month(), 10);
        assert!(cfg.exclusion_ranges().is_empty());
        assert_eq!(cfg.pulse_threshold_mode(), PulseThresholdMode::Global);
        assert_eq!(cfg.high_percentile(), 75.0);
        assert_eq!(cfg.low_percentile(), 25.0);
        assert_eq!(cfg.mag7_high_percentile(), 90.0);
        assert_eq!(cfg.mag7_low_percentile(), 10.0);
        assert_eq!(cfg.extreme_windows(), &[1, 3, 7, 30, 90]);
        assert_eq!(cfg.baseflow_recession_constant(), 0.925);
        assert_eq!(cfg.baseflow_passes(), 3);
        assert_eq!(cfg.aggregation_method(), AggregationMethod::Mean);
        assert_eq!(cfg.ar1_scope(), Ar1Scope::WaterYear);
        assert_eq!(cfg.colwell_classes(), 10);
        assert_eq!(cfg.colwell_binning(), ColwellBinning::LogSpaced);
        assert_eq!(cfg.colwell_period(), ColwellPeriod::Month);
        assert!(cfg.parallel());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_builder_chaining() {
        let cfg = IndicesConfig::new()
            .with_start_month(1)
            .with_pulse_percentiles(80.0, 20.0)
            .with_mag7_percentiles(95.0, 5.0)
            .with_baseflow_passes(1)
            .with_aggregation_method(AggregationMethod::Median)
            .with_ar1_scope(Ar1Scope::Record)
            .with_colwell_period(ColwellPeriod::Week)
            .with_parallel(false);
        assert_eq!(cfg.start_month(), 1);
        assert_eq!(cfg.high_percentile(), 80.0);
        assert_eq!(cfg.mag7_low_percentile(), 5.0);
        assert_eq!(cfg.baseflow_passes(), 1);
        assert_eq!(cfg.aggregation_method(), AggregationMethod::Median);
        assert_eq!(cfg.ar1_scope(), Ar1Scope::Record);
        assert_eq!(cfg.colwell_period().n_periods(), 52);
        assert!(!cfg.parallel());
        assert!(cfg.validate().is_ok());
    }

    fn field_of(cfg: IndicesConfig) -> &'static str {
        match cfg.validate() {
            Err(IndicesError::InvalidConfig { field, .. }) => field,
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert_eq!(field_of(IndicesConfig::new().with_start_month(0)), "start_month");
        assert_eq!(field_of(IndicesConfig::new().with_start_month(13)), "start_month");
        assert_eq!(
            field_of(IndicesConfig::new().with_pulse_percentiles(25.0, 75.0)),
            "pulse percentiles"
        );
        assert_eq!(
            field_of(IndicesConfig::new().with_mag7_percentiles(100.0, 10.0)),
            "mag7 percentiles"
        );
        assert_eq!(
            field_of(IndicesConfig::new().with_extreme_windows(vec![1, 0])),
            "extreme_windows"
        );
        assert_eq!(
            field_of(IndicesConfig::new().with_extreme_windows(vec![7, 3, 7])),
            "extreme_windows"
        );
        assert_eq!(
            field_of(IndicesConfig::new().with_baseflow_recession_constant(1.0)),
            "baseflow_recession_constant"
        );
        assert_eq!(
            field_of(IndicesConfig::new().with_baseflow_passes(0)),
            "baseflow_passes"
        );
        assert_eq!(
            field_of(IndicesConfig::new().with_colwell_classes(1)),
            "colwell_classes"
        );
    }

    #[test]
    fn test_aggregation_apply() {
        let v = [1.0, 2.0, 10.0];
        assert_eq!(AggregationMethod::Mean.apply(&v), Some(13.0 / 3.0));
        assert_eq!(AggregationMethod::Median.apply(&v), Some(2.0));
        assert_eq!(AggregationMethod::Mean.apply(&[]), None);
    }

    #[test]
    fn test_enums_deserialize_snake_case() {
        let mode: PulseThresholdMode = serde_json::from_str("\"per_year\"").unwrap();
        assert_eq!(mode, PulseThresholdMode::PerYear);
        let binning: ColwellBinning = serde_json::from_str("\"log_spaced\"").unwrap();
        assert_eq!(binning, ColwellBinning::LogSpaced);
    }
}
