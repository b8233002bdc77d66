//! preprocessing::rolling — fixed-width rolling mean and standard deviation.
//!
//! The first `window − 1` outputs are `None`: they are not computable with a
//! full window and are never approximated with a shrinking one, so every
//! `Some` value is based on exactly `window` observations.
use statrs::statistics::Statistics;

use crate::preprocessing::errors::{PreprocessError, PreprocessResult};

/// Rolling arithmetic mean over windows of `window` observations.
///
/// Errors
/// ------
/// - `InvalidWindow` when `window == 0`.
/// - `NonFiniteValue` when any input is NaN/±inf.
pub fn rolling_mean(series: &[f64], window: usize) -> PreprocessResult<Vec<Option<f64>>> {
    rolling_apply(series, window, 1, |w| w.iter().mean())
}

/// Rolling sample standard deviation (n − 1 denominator).
///
/// Errors
/// ------
/// - `InvalidWindow` when `window < 2`; a single observation has no sample
///   standard deviation.
/// - `NonFiniteValue` when any input is NaN/±inf.
pub fn rolling_std(series: &[f64], window: usize) -> PreprocessResult<Vec<Option<f64>>> {
    rolling_apply(series, window, 2, |w| w.iter().std_dev())
}

fn rolling_apply<F>(
    series: &[f64], window: usize, min_window: usize, stat: F,
) -> PreprocessResult<Vec<Option<f64>>>
where
    F: Fn(&[f64]) -> f64,
{
    if window < min_window {
        return Err(PreprocessError::InvalidWindow { window, min: min_window });
    }
    if let Some((index, &value)) = series.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(PreprocessError::NonFiniteValue { index, value });
    }

    let mut out = vec![None; series.len()];
    for (start, values) in series.windows(window).enumerate() {
        out[start + window - 1] = Some(stat(values));
    }
    Ok(out)
}
