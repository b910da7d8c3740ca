//! Daily flow CSV reader.

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use eflow_series::FlowSeries;

const DATE_COLUMN: &str = "datetime";
const FLOW_COLUMN: &str = "q";

fn find_column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| anyhow!("column {name:?} not found in header"))
}

/// Date part of a timestamp such as `2001-10-01 00:00:00`.
fn parse_date(field: &str) -> Result<NaiveDate> {
    let field = field.trim();
    let day = field.get(..10).unwrap_or(field);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").with_context(|| format!("invalid date {field:?}"))
}

/// Flow value; blank, `NA` and `NaN` are missing.
fn parse_flow(field: &str) -> Result<f64> {
    let field = field.trim();
    if field.is_empty() || field.eq_ignore_ascii_case("na") || field.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    field
        .parse()
        .with_context(|| format!("invalid flow value {field:?}"))
}

/// Reads a `datetime,q` CSV into a [`FlowSeries`].
///
/// Rows are sorted by date. Duplicate dates are rejected.
pub fn read_flow_csv(path: &Path) -> Result<FlowSeries> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("failed to open CSV: {}", path.display()))?;
    let headers = rdr.headers().context("failed to read CSV header")?.clone();
    let date_idx = find_column(&headers, DATE_COLUMN)?;
    let flow_idx = find_column(&headers, FLOW_COLUMN)?;

    let mut rows: Vec<(NaiveDate, f64)> = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("failed to read CSV row {}", i + 2))?;
        let line = i + 2;
        let date = parse_date(record.get(date_idx).unwrap_or_default())
            .with_context(|| format!("line {line}"))?;
        let flow = parse_flow(record.get(flow_idx).unwrap_or_default())
            .with_context(|| format!("line {line}"))?;
        rows.push((date, flow));
    }
    debug!(n_rows = rows.len(), "CSV rows parsed");

    rows.sort_by_key(|&(d, _)| d);
    if let Some(w) = rows.windows(2).find(|w| w[0].0 == w[1].0) {
        bail!("duplicate date {} in {}", w[0].0, path.display());
    }

    let series = FlowSeries::from_pairs(rows).context("invalid flow series")?;
    info!(
        path = %path.display(),
        n_days = series.len(),
        n_missing = series.n_missing_values(),
        "flow series loaded"
    );
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_unsorted_rows_with_missing_values() {
        let file = csv_file(
            "datetime,q\n\
             2001-01-03 00:00:00,3.5\n\
             2001-01-01 00:00:00,1.0\n\
             2001-01-02,NA\n\
             2001-01-04,\n",
        );
        let series = read_flow_csv(file.path()).unwrap();
        assert_eq!(series.len(), 4);
        assert_eq!(series.dates()[0], NaiveDate::from_ymd_opt(2001, 1, 1).unwrap());
        assert_eq!(series.flows()[2], 3.5);
        assert!(series.flows()[1].is_nan());
        assert_eq!(series.n_missing_values(), 2);
    }

    #[test]
    fn duplicate_dates_are_rejected() {
        let file = csv_file("datetime,q\n2001-01-01,1\n2001-01-01 12:00:00,2\n");
        let err = read_flow_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("duplicate date 2001-01-01"));
    }

    #[test]
    fn missing_column_is_reported() {
        let file = csv_file("date,flow\n2001-01-01,1\n");
        let err = read_flow_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("\"datetime\""));
    }

    #[test]
    fn bad_values_name_the_line() {
        let file = csv_file("datetime,q\n2001-01-01,1\n2001-01-02,lots\n");
        let err = read_flow_csv(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("line 3"));
    }

    #[test]
    fn negative_flow_is_rejected() {
        let file = csv_file("datetime,q\n2001-01-01,1\n2001-01-02,-4\n");
        assert!(read_flow_csv(file.path()).is_err());
    }
}
