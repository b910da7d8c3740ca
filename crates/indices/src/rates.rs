//! Daily rise and fall rates and flow reversals.

/// Day-to-day changes over an analysis record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DailyDeltas {
    /// `q[t] - q[t-1]`, `None` when day `t-1` is not the previous calendar
    /// day in the record.
    pub deltas: Vec<Option<f64>>,
    /// `true` where the delta of day `t` reverses the trend in effect.
    pub reversals: Vec<bool>,
}

impl DailyDeltas {
    /// Builds deltas over `flows` with the record's contiguity flags.
    ///
    /// A zero delta carries the previous trend sign forward. The carried
    /// sign resets at every gap.
    pub fn new(flows: &[f64], contiguous: &[bool]) -> Self {
        let n = flows.len();
        let mut deltas = vec![None; n];
        let mut reversals = vec![false; n];
        let mut trend = 0.0_f64;
        for t in 0..n {
            if t == 0 || !contiguous[t] {
                trend = 0.0;
                continue;
            }
            let d = flows[t] - flows[t - 1];
            deltas[t] = Some(d);
            if d != 0.0 {
                let sign = d.signum();
                if trend != 0.0 && sign != trend {
                    reversals[t] = true;
                }
                trend = sign;
            }
        }
        Self { deltas, reversals }
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}

/// Rise/fall statistics of one water year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiseFallStats {
    /// Mean positive delta.
    pub mean_rise_rate: Option<f64>,
    /// Mean negative delta, reported as a negative number.
    pub mean_fall_rate: Option<f64>,
    pub reversals: usize,
}

/// Summarises the deltas and reversal flags of one year.
///
/// With at least one delta, a missing rise (or fall) reports `0.0`; with
/// none at all both rates are undefined.
pub fn rise_fall_stats(deltas: &[Option<f64>], reversals: &[bool]) -> RiseFallStats {
    let defined: Vec<f64> = deltas.iter().flatten().copied().collect();
    let reversals = reversals.iter().filter(|&&r| r).count();
    if defined.is_empty() {
        return RiseFallStats {
            mean_rise_rate: None,
            mean_fall_rate: None,
            reversals,
        };
    }
    let rises: Vec<f64> = defined.iter().copied().filter(|&d| d > 0.0).collect();
    let falls: Vec<f64> = defined.iter().copied().filter(|&d| d < 0.0).collect();
    RiseFallStats {
        mean_rise_rate: Some(eflow_stats::mean(&rises).unwrap_or(0.0)),
        mean_fall_rate: Some(eflow_stats::mean(&falls).unwrap_or(0.0)),
        reversals,
    }
}
