//! Flood frequency against the median flow of the analysis record.
//!
//! `fh5_days` counts the days of a water year above the record median;
//! `fh5_mean` and `fh5_median` summarise those counts across years.

/// Median of the whole record, the flood threshold of every year.
pub fn record_median(flows: &[f64]) -> Option<f64> {
    eflow_stats::median(&eflow_stats::sorted(flows))
}

/// Number of days strictly above `threshold`.
pub fn days_above(flows: &[f64], threshold: f64) -> usize {
    flows.iter().filter(|&&q| q > threshold).count()
}

/// Mean and median of the per-year day counts.
pub fn flood_frequency(counts: &[f64]) -> (Option<f64>, Option<f64>) {
    (
        eflow_stats::mean(counts),
        eflow_stats::median(&eflow_stats::sorted(counts)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_threshold_is_strict() {
        let flows = [1.0, 2.0, 3.0, 3.0, 8.0];
        let m = record_median(&flows).unwrap();
        assert_eq!(m, 3.0);
        assert_eq!(days_above(&flows, m), 1);
        assert_eq!(days_above(&[3.0; 4], 3.0), 0);
    }

    #[test]
    fn empty_record_has_no_threshold() {
        assert_eq!(record_median(&[]), None);
        assert_eq!(flood_frequency(&[]), (None, None));
    }

    #[test]
    fn counts_summarised_across_years() {
        let (mean, median) = flood_frequency(&[4.0, 1.0, 2.0, 9.0]);
        assert_eq!(mean, Some(4.0));
        assert_eq!(median, Some(3.0));
    }
}
