use chrono::NaiveDate;
use serde::Deserialize;

/// Top-level eflow configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EflowConfig {
    /// Water-year boundary and excluded periods.
    #[serde(default)]
    pub water_year: WaterYearToml,

    /// Moving-average windows, ar1 scope, parallelism.
    #[serde(default)]
    pub indices: IndicesToml,

    /// Pulse and flood/drought thresholds.
    #[serde(default)]
    pub pulses: PulsesToml,

    /// Baseflow filter settings.
    #[serde(default)]
    pub baseflow: BaseflowToml,

    /// Colwell table settings.
    #[serde(default)]
    pub colwell: ColwellToml,

    /// Aggregation and naming of the result table.
    #[serde(default)]
    pub output: OutputToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaterYearToml {
    #[serde(default = "default_start_month")]
    pub start_month: u8,
    #[serde(default)]
    pub exclude: Vec<ExclusionToml>,
}

impl Default for WaterYearToml {
    fn default() -> Self {
        Self {
            start_month: default_start_month(),
            exclude: Vec::new(),
        }
    }
}

fn default_start_month() -> u8 {
    10
}

/// Inclusive `YYYY-MM-DD` date range.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExclusionToml {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndicesToml {
    #[serde(default = "default_extreme_windows")]
    pub extreme_windows: Vec<usize>,
    #[serde(default = "default_ar1_scope")]
    pub ar1_scope: String,
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for IndicesToml {
    fn default() -> Self {
        Self {
            extreme_windows: default_extreme_windows(),
            ar1_scope: default_ar1_scope(),
            parallel: true,
        }
    }
}

fn default_extreme_windows() -> Vec<usize> {
    vec![1, 3, 7, 30, 90]
}
fn default_ar1_scope() -> String {
    "water_year".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PulsesToml {
    #[serde(default = "default_threshold_mode")]
    pub threshold_mode: String,
    #[serde(default = "default_high_percentile")]
    pub high_percentile: f64,
    #[serde(default = "default_low_percentile")]
    pub low_percentile: f64,
    #[serde(default = "default_mag7_high_percentile")]
    pub mag7_high_percentile: f64,
    #[serde(default = "default_mag7_low_percentile")]
    pub mag7_low_percentile: f64,
}

impl Default for PulsesToml {
    fn default() -> Self {
        Self {
            threshold_mode: default_threshold_mode(),
            high_percentile: default_high_percentile(),
            low_percentile: default_low_percentile(),
            mag7_high_percentile: default_mag7_high_percentile(),
            mag7_low_percentile: default_mag7_low_percentile(),
        }
    }
}

fn default_threshold_mode() -> String {
    "global".to_string()
}
fn default_high_percentile() -> f64 {
    75.0
}
fn default_low_percentile() -> f64 {
    25.0
}
fn default_mag7_high_percentile() -> f64 {
    90.0
}
fn default_mag7_low_percentile() -> f64 {
    10.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaseflowToml {
    #[serde(default = "default_recession_constant")]
    pub recession_constant: f64,
    #[serde(default = "default_passes")]
    pub passes: usize,
}

impl Default for BaseflowToml {
    fn default() -> Self {
        Self {
            recession_constant: default_recession_constant(),
            passes: default_passes(),
        }
    }
}

fn default_recession_constant() -> f64 {
    0.925
}
fn default_passes() -> usize {
    3
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColwellToml {
    #[serde(default = "default_classes")]
    pub classes: usize,
    #[serde(default = "default_binning")]
    pub binning: String,
    #[serde(default = "default_period")]
    pub period: String,
}

impl Default for ColwellToml {
    fn default() -> Self {
        Self {
            classes: default_classes(),
            binning: default_binning(),
            period: default_period(),
        }
    }
}

fn default_classes() -> usize {
    10
}
fn default_binning() -> String {
    "log_spaced".to_string()
}
fn default_period() -> String {
    "month".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    #[serde(default = "default_aggregation")]
    pub aggregation: String,
    #[serde(default = "default_convention")]
    pub convention: String,
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            aggregation: default_aggregation(),
            convention: default_convention(),
        }
    }
}

fn default_aggregation() -> String {
    "mean".to_string()
}
fn default_convention() -> String {
    "canonical".to_string()
}
