//! Circular statistics for day-of-year quantities.
//!
//! Days are mapped onto a circle of `period` days (`theta = 2*pi*day/period`)
//! so that the last day of a year sits next to the first.

use std::f64::consts::TAU;

/// Relative threshold under which a resultant vector is treated as zero.
const VANISHING_RESULTANT: f64 = 1e-12;

/// Weighted sum of unit vectors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Resultant {
    /// Sum of `w * cos(theta)`.
    pub cos_sum: f64,
    /// Sum of `w * sin(theta)`.
    pub sin_sum: f64,
    /// Sum of `|w|`.
    pub weight_sum: f64,
}

impl Resultant {
    /// Accumulates `(angle, weight)` pairs.
    pub fn from_angles(pairs: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut r = Self::default();
        for (theta, w) in pairs {
            r.cos_sum += w * theta.cos();
            r.sin_sum += w * theta.sin();
            r.weight_sum += w.abs();
        }
        r
    }

    /// Euclidean length of the resultant.
    pub fn length(&self) -> f64 {
        self.cos_sum.hypot(self.sin_sum)
    }

    /// Returns `true` if the resultant is too short to carry a direction.
    pub fn is_vanishing(&self) -> bool {
        self.weight_sum <= 0.0 || self.length() <= VANISHING_RESULTANT * self.weight_sum
    }

    /// Mean resultant length `R = |sum| / sum|w|`, in `[0, 1]`.
    pub fn mean_length(&self) -> Option<f64> {
        if self.weight_sum <= 0.0 {
            return None;
        }
        Some((self.length() / self.weight_sum).min(1.0))
    }

    /// Direction of the resultant in `[0, 2*pi)`, `None` if it vanishes.
    pub fn direction(&self) -> Option<f64> {
        if self.is_vanishing() {
            return None;
        }
        Some(self.sin_sum.atan2(self.cos_sum).rem_euclid(TAU))
    }
}

/// Maps a day onto the circle.
pub fn day_to_angle(day: f64, period: f64) -> f64 {
    TAU * day / period
}

/// Maps an angle back to a day in `(0, period]`.
pub fn angle_to_day(angle: f64, period: f64) -> f64 {
    let d = angle.rem_euclid(TAU) * period / TAU;
    if d <= 0.0 { period } else { d }
}

/// Resultant of `(day, weight)` pairs on a circle of `period` days.
pub fn weighted_day_resultant(
    days: impl IntoIterator<Item = (f64, f64)>,
    period: f64,
) -> Resultant {
    Resultant::from_angles(
        days.into_iter()
            .map(|(d, w)| (day_to_angle(d, period), w)),
    )
}

/// Unweighted circular mean day. `None` for empty input or a vanishing
/// resultant (for example two days exactly half a period apart).
pub fn circular_mean_day(days: &[f64], period: f64) -> Option<f64> {
    let r = weighted_day_resultant(days.iter().map(|&d| (d, 1.0)), period);
    r.direction().map(|a| angle_to_day(a, period))
}

/// Circular standard deviation `sqrt(-2 ln R)` expressed in days.
///
/// Returns `None` for fewer than 2 days or a vanishing resultant.
pub fn circular_sd_days(days: &[f64], period: f64) -> Option<f64> {
    if days.len() < 2 {
        return None;
    }
    let r = weighted_day_resultant(days.iter().map(|&d| (d, 1.0)), period);
    if r.is_vanishing() {
        return None;
    }
    let rbar = r.mean_length()?;
    let s = (-2.0 * rbar.ln()).max(0.0).sqrt();
    Some(s * period / TAU)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn angle_round_trip_lands_in_range() {
        assert_relative_eq!(angle_to_day(day_to_angle(100.0, 365.0), 365.0), 100.0, epsilon = 1e-9);
        // Day `period` maps to angle 2*pi and back to `period`, not 0.
        assert_relative_eq!(angle_to_day(day_to_angle(365.0, 365.0), 365.0), 365.0, epsilon = 1e-9);
    }

    #[test]
    fn mean_wraps_across_year_end() {
        // Days 364 and 2 are 3 days apart on the circle; the mean is day 0.5.
        let m = circular_mean_day(&[364.0, 2.0], 365.0).unwrap();
        assert!(!(10.0..=355.0).contains(&m), "mean {m} should sit at the year boundary");
    }

    #[test]
    fn mean_of_identical_days() {
        assert_relative_eq!(circular_mean_day(&[40.0, 40.0, 40.0], 365.0).unwrap(), 40.0, epsilon = 1e-9);
    }

    #[test]
    fn opposite_days_have_no_mean() {
        assert!(circular_mean_day(&[100.0, 282.5], 365.0).is_none());
    }

    #[test]
    fn sd_of_identical_days_is_zero() {
        assert_relative_eq!(circular_sd_days(&[50.0, 50.0, 50.0], 365.0).unwrap(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn sd_small_spread_matches_linear() {
        // For tightly clustered days circular sd approaches linear (population) sd.
        let days = [99.0, 100.0, 101.0];
        let sd = circular_sd_days(&days, 365.0).unwrap();
        assert_relative_eq!(sd, (2.0_f64 / 3.0).sqrt(), epsilon = 1e-3);
    }

    #[test]
    fn sd_needs_two_days() {
        assert!(circular_sd_days(&[10.0], 365.0).is_none());
    }

    #[test]
    fn weighted_resultant_direction() {
        let r = weighted_day_resultant([(91.25, 3.0), (0.0, 0.0)], 365.0);
        assert_relative_eq!(r.direction().unwrap(), TAU / 4.0, epsilon = 1e-9);
        assert_relative_eq!(r.mean_length().unwrap(), 1.0, epsilon = 1e-12);
    }
}
