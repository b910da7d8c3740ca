//! Recursive digital baseflow filter.
//!
//! Lyne & Hollick (1979) one-parameter filter in quickflow form:
//!
//! ```text
//! f[t] = a * f[t-1] + (1 + a) / 2 * (x[t] - x[t-1])
//! b[t] = clamp(x[t] - f[t], 0, x[t])
//! ```
//!
//! Passes alternate forward and backward (Nathan & McMahon 1990); each pass
//! filters the baseflow of the previous one.

use std::ops::Range;

/// One filter pass over `x` in the given direction.
fn filter_pass(x: &[f64], alpha: f64, backward: bool) -> Vec<f64> {
    let n = x.len();
    let mut out = vec![0.0; n];
    let order: Box<dyn Iterator<Item = usize>> = if backward {
        Box::new((0..n).rev())
    } else {
        Box::new(0..n)
    };

    let mut prev: Option<usize> = None;
    let mut quick = 0.0;
    for t in order {
        let b = match prev {
            None => x[t],
            Some(p) => {
                let f = alpha * quick + (1.0 + alpha) / 2.0 * (x[t] - x[p]);
                (x[t] - f).max(0.0).min(x[t])
            }
        };
        quick = x[t] - b;
        out[t] = b;
        prev = Some(t);
    }
    out
}

/// Baseflow of one contiguous run of daily flows.
pub fn lyne_hollick(flows: &[f64], alpha: f64, passes: usize) -> Vec<f64> {
    let mut b = flows.to_vec();
    for pass in 0..passes {
        b = filter_pass(&b, alpha, pass % 2 == 1);
    }
    b
}

/// Baseflow over a record, filtering each contiguous run separately.
pub fn baseflow_by_runs(flows: &[f64], runs: &[Range<usize>], alpha: f64, passes: usize) -> Vec<f64> {
    let mut out = vec![0.0; flows.len()];
    for run in runs {
        let b = lyne_hollick(&flows[run.clone()], alpha, passes);
        out[run.clone()].copy_from_slice(&b);
    }
    out
}

/// `sum(baseflow) / sum(flows)`, undefined when total flow is zero.
pub fn baseflow_index(flows: &[f64], baseflow: &[f64]) -> Option<f64> {
    let total: f64 = flows.iter().sum();
    if total <= 0.0 {
        return None;
    }
    let base: f64 = baseflow.iter().sum();
    Some((base / total).clamp(0.0, 1.0))
}
