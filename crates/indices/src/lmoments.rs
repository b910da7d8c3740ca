//! Sample L-moments and lag-1 autocorrelation.
//!
//! L-moments follow Hosking (1990) with unbiased probability-weighted
//! moments of the sorted sample `x(1) <= ... <= x(n)`:
//!
//! ```text
//! b_r = 1/n * sum_i [C(i-1, r) / C(n-1, r)] * x(i)
//! l1 = b0, l2 = 2b1 - b0, l3 = 6b2 - 6b1 + b0, l4 = 20b3 - 30b2 + 12b1 - b0
//! ```

use serde::Serialize;

/// Minimum sample size for L-moments.
pub const MIN_LMOMENT_SAMPLE: usize = 4;

/// Mean and L-moment ratios of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LMomentSet {
    pub lambda1: Option<f64>,
    /// L-CV, `l2 / l1`.
    pub tau2: Option<f64>,
    /// L-skewness, `l3 / l2`.
    pub tau3: Option<f64>,
    /// L-kurtosis, `l4 / l2`.
    pub tau4: Option<f64>,
}

fn ratio(num: f64, den: f64) -> Option<f64> {
    if den == 0.0 { None } else { Some(num / den) }
}

/// L-moments of `data`; all undefined for fewer than 4 values.
pub fn l_moments(data: &[f64]) -> LMomentSet {
    let n = data.len();
    if n < MIN_LMOMENT_SAMPLE {
        return LMomentSet::default();
    }
    let x = eflow_stats::sorted(data);
    let (first, last) = (x[0], x[n - 1]);
    if first == last {
        return LMomentSet {
            lambda1: Some(first),
            tau2: (first != 0.0).then_some(0.0),
            tau3: Some(0.0),
            tau4: Some(0.0),
        };
    }

    let nf = n as f64;
    let (mut b0, mut b1, mut b2, mut b3) = (0.0, 0.0, 0.0, 0.0);
    for (i, &xi) in x.iter().enumerate() {
        let j = i as f64; // i - 1 for the 1-based rank
        b0 += xi;
        b1 += j / (nf - 1.0) * xi;
        b2 += j * (j - 1.0) / ((nf - 1.0) * (nf - 2.0)) * xi;
        b3 += j * (j - 1.0) * (j - 2.0) / ((nf - 1.0) * (nf - 2.0) * (nf - 3.0)) * xi;
    }
    b0 /= nf;
    b1 /= nf;
    b2 /= nf;
    b3 /= nf;

    let l1 = b0;
    let l2 = 2.0 * b1 - b0;
    let l3 = 6.0 * b2 - 6.0 * b1 + b0;
    let l4 = 20.0 * b3 - 30.0 * b2 + 12.0 * b1 - b0;

    LMomentSet {
        lambda1: Some(l1),
        tau2: ratio(l2, l1),
        tau3: ratio(l3, l2),
        tau4: ratio(l4, l2),
    }
}

/// Consecutive-day pairs `(q[t-1], q[t])`.
///
/// With `contiguous`, pairs are kept only where day `t` follows day `t-1`.
pub fn lag1_pairs(flows: &[f64], contiguous: Option<&[bool]>) -> Vec<(f64, f64)> {
    (1..flows.len())
        .filter(|&t| contiguous.is_none_or(|c| c[t]))
        .map(|t| (flows[t - 1], flows[t]))
        .collect()
}

/// Lag-1 Pearson autocorrelation. Needs 3 pairs and non-zero variance.
pub fn ar1(pairs: &[(f64, f64)]) -> Option<f64> {
    eflow_stats::pearson_pairs(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn four_point_sample_by_hand() {
        // b0 = 2.5, b1 = 5/3, b2 = 5/4, b3 = 1
        let m = l_moments(&[4.0, 1.0, 3.0, 2.0]);
        assert_relative_eq!(m.lambda1.unwrap(), 2.5, epsilon = 1e-12);
        assert_relative_eq!(m.tau2.unwrap(), 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(m.tau3.unwrap(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(m.tau4.unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn right_skew_is_positive() {
        let m = l_moments(&[1.0, 1.0, 2.0, 2.0, 3.0, 20.0]);
        assert!(m.tau3.unwrap() > 0.0);
    }

    #[test]
    fn too_short_is_undefined() {
        assert_eq!(l_moments(&[1.0, 2.0, 3.0]), LMomentSet::default());
    }

    #[test]
    fn constant_sample() {
        let m = l_moments(&[6.0; 30]);
        assert_eq!(m.lambda1, Some(6.0));
        assert_eq!(m.tau2, Some(0.0));
        assert_eq!(m.tau3, Some(0.0));
        assert_eq!(m.tau4, Some(0.0));

        let zero = l_moments(&[0.0; 30]);
        assert_eq!(zero.lambda1, Some(0.0));
        assert!(zero.tau2.is_none());
    }

    #[test]
    fn lag1_respects_gaps() {
        let q = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(lag1_pairs(&q, None).len(), 3);
        let c = [false, true, false, true];
        assert_eq!(lag1_pairs(&q, Some(&c)), vec![(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn ar1_of_trend_is_one() {
        let q: Vec<f64> = (0..20).map(f64::from).collect();
        assert_relative_eq!(ar1(&lag1_pairs(&q, None)).unwrap(), 1.0, epsilon = 1e-12);
        assert!(ar1(&lag1_pairs(&[5.0; 10], None)).is_none());
    }
}
