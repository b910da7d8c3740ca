//! Accumulated validation for flow series inputs.
//!
//! [`ValidationCollector`] gathers every violation so the caller sees all of
//! them in a single [`SeriesError::Validation`].

use chrono::NaiveDate;

use crate::error::SeriesError;

/// Upper bound on the number of messages kept per check.
const MAX_MESSAGES_PER_CHECK: usize = 10;

pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub(crate) fn extend(&mut self, other: ValidationCollector) {
        self.errors.extend(other.errors);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or a single `Err(SeriesError::Validation)` joining all messages.
    pub(crate) fn finish(self) -> Result<(), SeriesError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(SeriesError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

/// Records one message per offending index, up to a cap, then a summary.
fn push_capped(c: &mut ValidationCollector, offending: Vec<String>, what: &str) {
    let total = offending.len();
    for msg in offending.into_iter().take(MAX_MESSAGES_PER_CHECK) {
        c.push(msg);
    }
    if total > MAX_MESSAGES_PER_CHECK {
        c.push(format!(
            "{} more {what} not shown",
            total - MAX_MESSAGES_PER_CHECK
        ));
    }
}

pub(crate) fn validate_lengths(dates_len: usize, flows_len: usize) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    if dates_len != flows_len {
        c.push(format!(
            "dates length {dates_len} != flows length {flows_len}"
        ));
    }
    if dates_len == 0 {
        c.push("series is empty");
    }
    c
}

pub(crate) fn validate_strictly_increasing(dates: &[NaiveDate]) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    let offending: Vec<String> = dates
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[1] <= w[0])
        .map(|(i, w)| {
            format!(
                "dates not strictly increasing at index {}: {} follows {}",
                i + 1,
                w[1],
                w[0]
            )
        })
        .collect();
    push_capped(&mut c, offending, "ordering errors");
    c
}

/// Flows must be NaN (missing) or finite and non-negative.
pub(crate) fn validate_flows(flows: &[f64]) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    let offending: Vec<String> = flows
        .iter()
        .enumerate()
        .filter(|(_, q)| q.is_infinite() || **q < 0.0)
        .map(|(i, q)| format!("invalid flow at index {i}: {q}"))
        .collect();
    push_capped(&mut c, offending, "invalid flows");
    c
}
