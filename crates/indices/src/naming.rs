//! Column naming conventions applied to a finished [`ResultTable`].

use serde::{Deserialize, Serialize};

use crate::config::AggregationMethod;
use crate::table::{ResultRow, ResultTable, StatIssue};

/// Published naming scheme for the output columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamingConvention {
    /// Names as computed.
    #[default]
    #[serde(rename = "canonical")]
    Canonical,
    /// Names of the EflowStats index set.
    #[serde(rename = "eflowstats")]
    EflowStats,
}

const EFLOWSTATS_NAMES: &[(&str, &str)] = &[
    ("julian_min", "doy_min"),
    ("julian_max", "doy_max"),
    ("high_pulse_count", "freq_high_pulses"),
    ("high_pulse_avg_dur", "dur_high_mean"),
    ("dur_high_avg", "dur_high_mean"),
    ("high_pulse_max_dur", "dur_high_max"),
    ("low_pulse_count", "freq_low_pulses"),
    ("low_pulse_avg_dur", "dur_low_mean"),
    ("dur_low_avg", "dur_low_mean"),
    ("low_pulse_max_dur", "dur_low_max"),
    ("mean_rise_rate", "rise_rate"),
    ("mean_fall_rate", "fall_rate"),
    ("lam1", "mean_l_moment"),
    ("tau2", "l_cv"),
    ("tau3", "l_skew"),
    ("tau4", "l_kurt"),
    ("ar1", "ar1_coefficient"),
    ("cv_interannual", "cv_annual"),
];

impl NamingConvention {
    /// Name of the canonical column `column` under this convention.
    pub fn rename(self, column: &str) -> &str {
        match self {
            Self::Canonical => column,
            Self::EflowStats => EFLOWSTATS_NAMES
                .iter()
                .find(|(from, _)| *from == column)
                .map_or(column, |&(_, to)| to),
        }
    }
}

/// Renames the columns of `table`.
///
/// Canonical columns that map onto the same name are merged in order of
/// first appearance; each row combines their defined values with `method`.
pub fn project(
    table: &ResultTable,
    convention: NamingConvention,
    method: AggregationMethod,
) -> ResultTable {
    let mut columns: Vec<String> = Vec::new();
    let mut sources: Vec<Vec<usize>> = Vec::new();
    for (i, name) in table.columns().iter().enumerate() {
        let target = convention.rename(name);
        match columns.iter().position(|c| c == target) {
            Some(j) => sources[j].push(i),
            None => {
                columns.push(target.to_string());
                sources.push(vec![i]);
            }
        }
    }

    let rows = table
        .rows()
        .iter()
        .map(|row| ResultRow {
            label: row.label,
            values: sources
                .iter()
                .map(|src| match src.as_slice() {
                    [single] => row.values[*single],
                    many => {
                        let defined: Vec<f64> = many.iter().filter_map(|&i| row.values[i]).collect();
                        method.apply(&defined)
                    }
                })
                .collect(),
        })
        .collect();

    let issues = table
        .issues()
        .iter()
        .map(|issue| StatIssue {
            column: convention.rename(&issue.column).to_string(),
            message: issue.message.clone(),
        })
        .collect();

    ResultTable::new(columns, rows, issues, table.excluded_years().to_vec())
}
