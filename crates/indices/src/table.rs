//! The result table: one row per complete water year plus `all_years`.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::error::IndicesError;

pub const PULSE_COLUMNS: [&str; 8] = [
    "high_pulse_count",
    "high_pulse_avg_dur",
    "high_pulse_max_dur",
    "high_thresh_used",
    "low_pulse_count",
    "low_pulse_avg_dur",
    "low_pulse_max_dur",
    "low_thresh_used",
];

pub const PULSE_RATE_COLUMNS: [&str; 4] = [
    "high_pulse_rise_mean",
    "high_pulse_fall_mean",
    "low_pulse_rise_mean",
    "low_pulse_fall_mean",
];

pub const FLOOD_DROUGHT_COLUMNS: [&str; 10] = [
    "mag_high",
    "freq_high",
    "dur_high_count",
    "dur_high_avg",
    "dur_high_max",
    "mag_low",
    "freq_low",
    "dur_low_count",
    "dur_low_avg",
    "dur_low_max",
];

pub const FREQUENCY_COLUMNS: [&str; 3] = ["fh5_days", "fh5_mean", "fh5_median"];

pub const RISE_FALL_COLUMNS: [&str; 3] = ["mean_rise_rate", "mean_fall_rate", "reversals"];

pub const TIMING_COLUMNS: [&str; 5] = [
    "julian_min",
    "julian_max",
    "center_of_timing",
    "cv_julian_min",
    "cv_julian_max",
];

pub const VARIABILITY_COLUMNS: [&str; 3] = ["std_daily", "cv_daily", "cv_interannual"];

pub const BASEFLOW_COLUMNS: [&str; 1] = ["baseflow_index"];

pub const COLWELL_COLUMNS: [&str; 3] = [
    "colwell_constancy",
    "colwell_contingency",
    "colwell_predictability",
];

pub const MAG7_COLUMNS: [&str; 7] = ["lam1", "tau2", "tau3", "tau4", "ar1", "amplitude", "phase"];

/// Day-of-year columns, aggregated on the circle.
pub const CIRCULAR_DAY_COLUMNS: [&str; 4] = ["julian_min", "julian_max", "center_of_timing", "phase"];

/// Full column order for the given moving-average windows.
pub fn column_names(extreme_windows: &[usize]) -> Vec<String> {
    let mut cols: Vec<String> = Vec::new();
    cols.extend((1..=12).map(|m| format!("mean_month_{m:02}")));
    cols.extend((1..=12).map(|m| format!("median_month_{m:02}")));
    cols.extend(extreme_windows.iter().map(|w| format!("max_{w}day")));
    cols.extend(extreme_windows.iter().map(|w| format!("min_{w}day")));
    let groups: [&[&str]; 10] = [
        &PULSE_COLUMNS,
        &PULSE_RATE_COLUMNS,
        &FLOOD_DROUGHT_COLUMNS,
        &FREQUENCY_COLUMNS,
        &RISE_FALL_COLUMNS,
        &TIMING_COLUMNS,
        &VARIABILITY_COLUMNS,
        &BASEFLOW_COLUMNS,
        &COLWELL_COLUMNS,
        &MAG7_COLUMNS,
    ];
    for group in groups {
        cols.extend(group.iter().map(|c| c.to_string()));
    }
    cols
}

/// Row identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowLabel {
    WaterYear(i32),
    AllYears,
}

impl std::fmt::Display for RowLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WaterYear(y) => write!(f, "{y}"),
            Self::AllYears => f.write_str("all_years"),
        }
    }
}

impl Serialize for RowLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::WaterYear(y) => serializer.serialize_i32(*y),
            Self::AllYears => serializer.serialize_str("all_years"),
        }
    }
}

/// One row of values aligned with [`ResultTable::columns`].
///
/// `None` marks an undefined statistic.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub label: RowLabel,
    pub values: Vec<Option<f64>>,
}

/// A degenerate statistic that was reported as undefined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatIssue {
    pub column: String,
    pub message: String,
}

/// Indices of every complete water year, ascending, then `all_years`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<ResultRow>,
    issues: Vec<StatIssue>,
    excluded_years: Vec<i32>,
}

impl ResultTable {
    pub(crate) fn new(
        columns: Vec<String>,
        rows: Vec<ResultRow>,
        issues: Vec<StatIssue>,
        excluded_years: Vec<i32>,
    ) -> Self {
        debug_assert!(rows.iter().all(|r| r.values.len() == columns.len()));
        Self {
            columns,
            rows,
            issues,
            excluded_years,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn issues(&self) -> &[StatIssue] {
        &self.issues
    }

    /// Water years dropped for incompleteness.
    pub fn excluded_years(&self) -> &[i32] {
        &self.excluded_years
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn row(&self, label: RowLabel) -> Option<&ResultRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Per-year rows, without `all_years`.
    pub fn year_rows(&self) -> impl Iterator<Item = &ResultRow> + '_ {
        self.rows.iter().filter(|r| r.label != RowLabel::AllYears)
    }

    pub fn all_years(&self) -> Option<&ResultRow> {
        self.row(RowLabel::AllYears)
    }

    /// Value of `column` in the row labelled `label`.
    pub fn value(&self, label: RowLabel, column: &str) -> Option<f64> {
        let i = self.column_index(column)?;
        self.row(label)?.values[i]
    }

    /// Values of `column` down all rows.
    pub fn column(&self, column: &str) -> Option<Vec<Option<f64>>> {
        let i = self.column_index(column)?;
        Some(self.rows.iter().map(|r| r.values[i]).collect())
    }

    /// A table restricted to `names`, in that order. Unknown names are skipped.
    pub fn select(&self, names: &[&str]) -> Self {
        let picked: Vec<usize> = names.iter().filter_map(|n| self.column_index(n)).collect();
        let rows = self
            .rows
            .iter()
            .map(|r| ResultRow {
                label: r.label,
                values: picked.iter().map(|&i| r.values[i]).collect(),
            })
            .collect();
        let issues = self
            .issues
            .iter()
            .filter(|issue| names.contains(&issue.column.as_str()))
            .cloned()
            .collect();
        Self::new(
            picked.iter().map(|&i| self.columns[i].clone()).collect(),
            rows,
            issues,
            self.excluded_years.clone(),
        )
    }

    /// Pretty-printed JSON; rows become objects keyed by column name.
    pub fn to_json(&self) -> Result<String, IndicesError> {
        serde_json::to_string_pretty(self).map_err(|e| IndicesError::Serialization {
            reason: e.to_string(),
        })
    }
}

struct RowRecord<'a> {
    columns: &'a [String],
    row: &'a ResultRow,
}

impl Serialize for RowRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len() + 1))?;
        map.serialize_entry("water_year", &self.row.label)?;
        for (name, value) in self.columns.iter().zip(&self.row.values) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Serialize for ResultTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<RowRecord<'_>> = self
            .rows
            .iter()
            .map(|row| RowRecord {
                columns: &self.columns,
                row,
            })
            .collect();
        let mut s = serializer.serialize_struct("ResultTable", 4)?;
        s.serialize_field("columns", &self.columns)?;
        s.serialize_field("rows", &rows)?;
        s.serialize_field("issues", &self.issues)?;
        s.serialize_field("excluded_years", &self.excluded_years)?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table() -> ResultTable {
        ResultTable::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                ResultRow {
                    label: RowLabel::WaterYear(2001),
                    values: vec![Some(1.0), None],
                },
                ResultRow {
                    label: RowLabel::AllYears,
                    values: vec![Some(1.0), Some(0.5)],
                },
            ],
            vec![StatIssue {
                column: "b".to_string(),
                message: "degenerate".to_string(),
            }],
            vec![2000],
        )
    }

    #[test]
    fn default_column_order() {
        let cols = column_names(&[1, 7]);
        assert_eq!(cols[0], "mean_month_01");
        assert_eq!(cols[12], "median_month_01");
        assert_eq!(&cols[24..28], &["max_1day", "max_7day", "min_1day", "min_7day"]);
        assert_eq!(cols.last().map(String::as_str), Some("phase"));
        assert_eq!(cols.len(), 24 + 4 + 8 + 4 + 10 + 3 + 3 + 5 + 3 + 1 + 3 + 7);
    }

    #[test]
    fn lookup() {
        let t = small_table();
        assert_eq!(t.value(RowLabel::WaterYear(2001), "a"), Some(1.0));
        assert_eq!(t.value(RowLabel::WaterYear(2001), "b"), None);
        assert_eq!(t.value(RowLabel::AllYears, "b"), Some(0.5));
        assert_eq!(t.value(RowLabel::AllYears, "zzz"), None);
        assert_eq!(t.year_rows().count(), 1);
        assert_eq!(t.column("a"), Some(vec![Some(1.0), Some(1.0)]));
    }

    #[test]
    fn select_reorders_and_filters_issues() {
        let t = small_table().select(&["b", "missing", "a"]);
        assert_eq!(t.columns(), &["b".to_string(), "a".to_string()]);
        assert_eq!(t.rows()[0].values, vec![None, Some(1.0)]);
        assert_eq!(t.issues().len(), 1);
        assert!(small_table().select(&["a"]).issues().is_empty());
    }

    #[test]
    fn json_uses_null_and_all_years_label() {
        let json = small_table().to_json().unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["rows"][0]["water_year"], 2001);
        assert!(v["rows"][0]["b"].is_null());
        assert_eq!(v["rows"][1]["water_year"], "all_years");
        assert_eq!(v["excluded_years"][0], 2000);
        assert_eq!(v["issues"][0]["column"], "b");
    }

    #[test]
    fn label_display() {
        assert_eq!(RowLabel::WaterYear(1999).to_string(), "1999");
        assert_eq!(RowLabel::AllYears.to_string(), "all_years");
    }
}
