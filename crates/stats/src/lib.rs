//! Statistical helper functions for the eflow index engines.
//!
//! Every function returns `None` instead of a placeholder value when its
//! input is too short or degenerate, so callers can tell an undefined
//! statistic from a computed zero.

pub mod circular;

/// Arithmetic mean of a slice. Returns `None` if empty.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let sum: f64 = data.iter().sum();
    Some(sum / data.len() as f64)
}

/// Sample variance with N-1 denominator.
/// Returns `None` if fewer than 2 elements.
pub fn variance(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    Some(data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0))
}

/// Sample standard deviation with N-1 denominator.
/// Returns `None` if fewer than 2 elements.
pub fn sd(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}

/// Coefficient of variation `sd / mean`.
///
/// Returns `None` for fewer than 2 elements or a zero mean.
pub fn coefficient_of_variation(data: &[f64]) -> Option<f64> {
    let m = mean(data)?;
    let s = sd(data)?;
    if m == 0.0 {
        return None;
    }
    Some(s / m)
}

/// Returns a sorted copy of `data` (IEEE total order).
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut v = data.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

/// Linear-interpolation quantile (R type 7, numpy's default `percentile`).
///
/// **Expects pre-sorted input** (caller's responsibility). `p` is a
/// probability in `[0, 1]`. Returns `None` if `sorted` is empty.
pub fn quantile_type7(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let n = sorted.len();
    let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    Some(sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo]))
}

/// Median of pre-sorted data. For even length, averages the middle two values.
/// Returns `None` if empty.
pub fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Pearson correlation over explicit `(x, y)` pairs.
///
/// Pairs are assumed finite. Returns `None` if fewer than 3 pairs or if the
/// denominator is zero (constant input).
pub fn pearson_pairs(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 3 {
        return None;
    }

    let n = pairs.len() as f64;
    let mx: f64 = pairs.iter().map(|(xi, _)| xi).sum::<f64>() / n;
    let my: f64 = pairs.iter().map(|(_, yi)| yi).sum::<f64>() / n;

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for &(xi, yi) in pairs {
        let dx = xi - mx;
        let dy = yi - my;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    let denom = (sum_xx * sum_yy).sqrt();
    if denom == 0.0 {
        return None;
    }

    Some(sum_xy / denom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data).unwrap(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_empty() {
        assert!(mean(&[]).is_none());
    }

    #[test]
    fn test_sd() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sd(&data).unwrap(), 2.138090, epsilon = 1e-6);
    }

    #[test]
    fn test_sd_single() {
        assert!(sd(&[5.0]).is_none());
    }

    #[test]
    fn test_variance_two() {
        // [3.0, 7.0]: mean=5, sum_sq=8, var=8/1=8
        assert_relative_eq!(variance(&[3.0, 7.0]).unwrap(), 8.0, epsilon = 1e-10);
    }

    #[test]
    fn test_cv_constant_is_zero() {
        assert_eq!(coefficient_of_variation(&[4.0, 4.0, 4.0]), Some(0.0));
    }

    #[test]
    fn test_cv_zero_mean_undefined() {
        assert!(coefficient_of_variation(&[0.0, 0.0, 0.0]).is_none());
        assert!(coefficient_of_variation(&[-1.0, 1.0]).is_none());
    }

    #[test]
    fn test_sorted_handles_order() {
        assert_eq!(sorted(&[3.0, 1.0, 2.0]), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_quantile_type7() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(quantile_type7(&sorted, 0.25).unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(quantile_type7(&sorted, 0.5).unwrap(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(quantile_type7(&sorted, 0.0).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(quantile_type7(&sorted, 1.0).unwrap(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_quantile_type7_numpy_crossvalidation() {
        // numpy.percentile(range(1, 11), 30) == 3.7
        let sorted: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        assert_relative_eq!(quantile_type7(&sorted, 0.3).unwrap(), 3.7, epsilon = 1e-10);
        // numpy.percentile(range(1, 11), 75) == 7.75
        assert_relative_eq!(quantile_type7(&sorted, 0.75).unwrap(), 7.75, epsilon = 1e-10);
    }

    #[test]
    fn test_quantile_type7_empty() {
        assert!(quantile_type7(&[], 0.5).is_none());
    }

    #[test]
    fn test_median() {
        assert_relative_eq!(median(&[1.0, 2.0, 3.0]).unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(median(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5, epsilon = 1e-12);
        assert!(median(&[]).is_none());
    }

    #[test]
    fn test_pearson_pairs_perfect() {
        let pairs = [(1.0, 2.0), (2.0, 4.0), (3.0, 6.0), (4.0, 8.0), (5.0, 10.0)];
        assert_relative_eq!(pearson_pairs(&pairs).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_pairs_insufficient() {
        assert!(pearson_pairs(&[(1.0, 3.0), (2.0, 4.0)]).is_none());
    }

    #[test]
    fn test_pearson_pairs_constant() {
        assert!(pearson_pairs(&[(1.0, 1.0), (1.0, 2.0), (1.0, 3.0)]).is_none());
    }
}
