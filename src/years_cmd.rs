//! Years command: water-year completeness report.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::info_span;

use eflow_series::{Segmentation, segment_water_years};

use crate::cli::YearsArgs;
use crate::convert;
use crate::input::read_flow_csv;

/// One line per water year: label, span, status and gaps.
pub fn format_report(segmentation: &Segmentation) -> String {
    let mut out = String::new();
    for year in segmentation.years() {
        let status = if year.is_complete() { "complete" } else { "incomplete" };
        out.push_str(&format!(
            "{}\t{}\t{}\t{}",
            year.label(),
            year.start_date(),
            year.end_date(),
            status
        ));
        let gaps = year.gaps();
        if !gaps.is_empty() {
            out.push_str(&format!(
                "\tmissing={} nan={} excluded={}",
                gaps.missing_days, gaps.nan_days, gaps.excluded_days
            ));
            let runs = year.missing_runs();
            if !runs.is_empty() {
                out.push_str(&format!(" [{}]", runs.join(", ")));
            }
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "{} of {} water years complete\n",
        segmentation.n_complete(),
        segmentation.years().len()
    ));
    out
}

/// Run the completeness report.
pub fn run(args: YearsArgs) -> Result<()> {
    let _cmd = info_span!("years").entered();
    let config = convert::load_config(args.config.as_deref())?;
    let exclusions = convert::build_exclusions(&config.water_year)?;

    let series = read_flow_csv(&args.input)?;
    let segmentation = segment_water_years(&series, config.water_year.start_month, &exclusions)
        .context("water-year segmentation failed")?;

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", format_report(&segmentation)).context("failed to write to stdout")?;
    Ok(())
}
