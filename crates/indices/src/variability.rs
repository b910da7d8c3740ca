//! Spread of daily and annual flows.

/// Variability of one water year's daily flows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VariabilityStats {
    /// Sample standard deviation.
    pub std_daily: Option<f64>,
    /// `std_daily / mean`, 0 for a constant non-zero year.
    pub cv_daily: Option<f64>,
}

pub fn variability_stats(flows: &[f64]) -> VariabilityStats {
    VariabilityStats {
        std_daily: eflow_stats::sd(flows),
        cv_daily: eflow_stats::coefficient_of_variation(flows),
    }
}

/// CV of annual mean flows. Undefined for fewer than two years or a zero
/// mean.
pub fn cv_interannual(annual_means: &[f64]) -> Option<f64> {
    eflow_stats::coefficient_of_variation(annual_means)
}
