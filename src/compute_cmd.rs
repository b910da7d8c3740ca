//! Compute command: indices of every complete water year as JSON.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use eflow_indices::{MAG7_COLUMNS, compute_indices, project};

use crate::cli::ComputeArgs;
use crate::convert;
use crate::input::read_flow_csv;

/// Run the compute pipeline.
pub fn run(args: ComputeArgs) -> Result<()> {
    let _cmd = info_span!("compute").entered();

    // 1. Configuration
    let config = convert::load_config(args.config.as_deref())?;
    let indices_cfg = convert::build_indices_config(&config)?;
    let convention = convert::resolve_convention(&config.output, args.convention)?;

    // 2. Input series
    let series = read_flow_csv(&args.input)?;

    // 3. Indices, optionally restricted to the Mag7 columns
    let mut table = compute_indices(&series, &indices_cfg).context("index computation failed")?;
    if args.mag7 {
        table = table.select(&MAG7_COLUMNS);
    }
    let table = project(&table, convention, indices_cfg.aggregation_method());
    info!(
        n_rows = table.rows().len(),
        n_columns = table.columns().len(),
        excluded = ?table.excluded_years(),
        "indices computed"
    );

    // 4. Output
    let json = table.to_json().context("failed to serialize result table")?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, &json)
                .with_context(|| format!("failed to write output: {}", path.display()))?;
            info!(path = %path.display(), "results written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("failed to write to stdout")?;
        }
    }
    Ok(())
}
