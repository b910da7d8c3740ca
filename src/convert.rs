//! Pure conversion functions: TOML config structs -> crate API config types.

use std::path::Path;

use anyhow::{Context, Result, bail};

use eflow_indices::{
    AggregationMethod, Ar1Scope, ColwellBinning, ColwellPeriod, IndicesConfig, NamingConvention,
    PulseThresholdMode,
};
use eflow_series::ExclusionRange;

use crate::cli::ConventionArg;
use crate::config::*;

/// Reads and parses a TOML config file, or returns defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<EflowConfig> {
    let Some(path) = path else {
        return Ok(EflowConfig::default());
    };
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

/// Parses a pulse threshold mode name.
pub fn parse_threshold_mode(s: &str) -> Result<PulseThresholdMode> {
    match s.to_lowercase().as_str() {
        "global" => Ok(PulseThresholdMode::Global),
        "per_year" => Ok(PulseThresholdMode::PerYear),
        other => bail!("unknown pulse threshold mode: {other:?}"),
    }
}

/// Parses an aggregation method name.
pub fn parse_aggregation(s: &str) -> Result<AggregationMethod> {
    match s.to_lowercase().as_str() {
        "mean" => Ok(AggregationMethod::Mean),
        "median" => Ok(AggregationMethod::Median),
        other => bail!("unknown aggregation method: {other:?}"),
    }
}

/// Parses an ar1 scope name.
pub fn parse_ar1_scope(s: &str) -> Result<Ar1Scope> {
    match s.to_lowercase().as_str() {
        "water_year" => Ok(Ar1Scope::WaterYear),
        "record" => Ok(Ar1Scope::Record),
        other => bail!("unknown ar1 scope: {other:?}"),
    }
}

/// Parses a Colwell binning name.
pub fn parse_binning(s: &str) -> Result<ColwellBinning> {
    match s.to_lowercase().as_str() {
        "log_spaced" => Ok(ColwellBinning::LogSpaced),
        "quantile" => Ok(ColwellBinning::Quantile),
        other => bail!("unknown colwell binning: {other:?}"),
    }
}

/// Parses a Colwell period name.
pub fn parse_period(s: &str) -> Result<ColwellPeriod> {
    match s.to_lowercase().as_str() {
        "month" => Ok(ColwellPeriod::Month),
        "week" => Ok(ColwellPeriod::Week),
        other => bail!("unknown colwell period: {other:?}"),
    }
}

/// Parses a naming convention name.
pub fn parse_convention(s: &str) -> Result<NamingConvention> {
    match s.to_lowercase().as_str() {
        "canonical" => Ok(NamingConvention::Canonical),
        "eflowstats" => Ok(NamingConvention::EflowStats),
        other => bail!("unknown naming convention: {other:?}"),
    }
}

/// Resolves the naming convention; the CLI flag wins over the config file.
pub fn resolve_convention(
    output: &OutputToml,
    flag: Option<ConventionArg>,
) -> Result<NamingConvention> {
    match flag {
        Some(ConventionArg::Canonical) => Ok(NamingConvention::Canonical),
        Some(ConventionArg::Eflowstats) => Ok(NamingConvention::EflowStats),
        None => parse_convention(&output.convention),
    }
}

/// Builds the exclusion ranges of the `[water_year]` section.
pub fn build_exclusions(water_year: &WaterYearToml) -> Result<Vec<ExclusionRange>> {
    water_year
        .exclude
        .iter()
        .map(|e| ExclusionRange::new(e.start, e.end).context("invalid [water_year].exclude entry"))
        .collect()
}

/// Builds an [`IndicesConfig`] from the whole TOML configuration.
///
/// Value ranges are checked later by [`IndicesConfig::validate`].
pub fn build_indices_config(config: &EflowConfig) -> Result<IndicesConfig> {
    let pulses = &config.pulses;
    Ok(IndicesConfig::new()
        .with_start_month(config.water_year.start_month)
        .with_exclusion_ranges(build_exclusions(&config.water_year)?)
        .with_extreme_windows(config.indices.extreme_windows.clone())
        .with_ar1_scope(parse_ar1_scope(&config.indices.ar1_scope)?)
        .with_parallel(config.indices.parallel)
        .with_pulse_threshold_mode(parse_threshold_mode(&pulses.threshold_mode)?)
        .with_pulse_percentiles(pulses.high_percentile, pulses.low_percentile)
        .with_mag7_percentiles(pulses.mag7_high_percentile, pulses.mag7_low_percentile)
        .with_baseflow_recession_constant(config.baseflow.recession_constant)
        .with_baseflow_passes(config.baseflow.passes)
        .with_colwell_classes(config.colwell.classes)
        .with_colwell_binning(parse_binning(&config.colwell.binning)?)
        .with_colwell_period(parse_period(&config.colwell.period)?)
        .with_aggregation_method(parse_aggregation(&config.output.aggregation)?))
}
