//! Moving-window flow extremes.

use chrono::NaiveDate;
use serde::Serialize;

/// Which extreme a window reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Max,
    Min,
}

/// Extreme `window`-day mean flow of one water year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremeWindow {
    pub window: usize,
    pub direction: Direction,
    /// `None` when the year is shorter than the window.
    pub value: Option<f64>,
    /// Last day of the winning window (first occurrence on ties).
    pub window_end_date: Option<NaiveDate>,
}

/// Trailing `window`-day means; entry `i` covers days `i..i + window`.
///
/// Empty when `window` is 0 or longer than `flows`.
pub fn moving_averages(flows: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return Vec::new();
    }
    flows
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect()
}

fn extreme(
    dates: &[NaiveDate],
    flows: &[f64],
    window: usize,
    direction: Direction,
) -> ExtremeWindow {
    let means = moving_averages(flows, window);
    let mut best: Option<(usize, f64)> = None;
    for (i, &m) in means.iter().enumerate() {
        let better = match (best, direction) {
            (None, _) => true,
            (Some((_, b)), Direction::Max) => m > b,
            (Some((_, b)), Direction::Min) => m < b,
        };
        if better {
            best = Some((i, m));
        }
    }
    ExtremeWindow {
        window,
        direction,
        value: best.map(|(_, m)| m),
        window_end_date: best.and_then(|(i, _)| dates.get(i + window - 1).copied()),
    }
}

/// Maximum and minimum moving means of one year for each window.
///
/// Returns all maxima in `windows` order, then all minima.
pub fn extreme_windows(dates: &[NaiveDate], flows: &[f64], windows: &[usize]) -> Vec<ExtremeWindow> {
    [Direction::Max, Direction::Min]
        .into_iter()
        .flat_map(|dir| windows.iter().map(move |&w| extreme(dates, flows, w, dir)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Days;

    fn dates(n: u64) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
        (0..n).map(|i| start + Days::new(i)).collect()
    }

    #[test]
    fn moving_average_values() {
        assert_eq!(moving_averages(&[1.0, 2.0, 3.0, 4.0], 2), vec![1.5, 2.5, 3.5]);
        assert!(moving_averages(&[1.0], 2).is_empty());
        assert!(moving_averages(&[1.0], 0).is_empty());
    }

    #[test]
    fn max_and_min_with_end_dates() {
        let q = [1.0, 5.0, 5.0, 0.0, 2.0];
        let d = dates(5);
        let out = extreme_windows(&d, &q, &[1, 2]);
        assert_eq!(out.len(), 4);

        assert_eq!(out[0].direction, Direction::Max);
        assert_eq!(out[0].value, Some(5.0));
        // First occurrence of the tie.
        assert_eq!(out[0].window_end_date, Some(d[1]));

        assert_eq!(out[1].window, 2);
        assert_eq!(out[1].value, Some(5.0));
        assert_eq!(out[1].window_end_date, Some(d[2]));

        assert_eq!(out[2].direction, Direction::Min);
        assert_eq!(out[2].value, Some(0.0));
        assert_eq!(out[2].window_end_date, Some(d[3]));

        assert_relative_eq!(out[3].value.unwrap(), 1.0);
        assert_eq!(out[3].window_end_date, Some(d[4]));
    }

    #[test]
    fn window_longer_than_year_is_undefined() {
        let out = extreme_windows(&dates(3), &[1.0, 2.0, 3.0], &[7]);
        assert!(out.iter().all(|e| e.value.is_none() && e.window_end_date.is_none()));
    }
}
