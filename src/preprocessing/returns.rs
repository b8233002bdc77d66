//! preprocessing::returns — price series → return series.
//!
//! Purpose
//! -------
//! Turn a price column into log or simple returns, dropping the first
//! observation (it has no predecessor) rather than zero-filling it.
//!
//! Conventions
//! -----------
//! - Log returns: `r_t = ln(p_t) − ln(p_{t−1})`.
//! - Simple returns: `r_t = p_t / p_{t−1} − 1`.
//! - The output carries the dates of observations `1..n`, so `dates[i]` is
//!   the day on which return `i` was realised.
use std::str::FromStr;

use ndarray::Array1;
use serde::Serialize;

use crate::preprocessing::{
    errors::{PreprocessError, PreprocessResult},
    series::{PriceSeries, ReturnSeries},
};

/// How consecutive prices are turned into a return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnMethod {
    Log,
    Simple,
}

impl ReturnMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnMethod::Log => "log",
            ReturnMethod::Simple => "simple",
        }
    }

    #[inline]
    fn apply(&self, previous: f64, current: f64) -> f64 {
        match self {
            ReturnMethod::Log => current.ln() - previous.ln(),
            ReturnMethod::Simple => current / previous - 1.0,
        }
    }
}

impl FromStr for ReturnMethod {
    type Err = PreprocessError;

    /// Parse `"log"` or `"simple"` (case-insensitive, surrounding whitespace
    /// ignored).
    fn from_str(s: &str) -> PreprocessResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" => Ok(ReturnMethod::Log),
            "simple" => Ok(ReturnMethod::Simple),
            _ => Err(PreprocessError::InvalidReturnMethod { name: s.to_string() }),
        }
    }
}

impl std::fmt::Display for ReturnMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute returns for a dated price series.
///
/// Returns
/// -------
/// A [`ReturnSeries`] of length `prices.len() − 1` dated with
/// `prices.dates()[1..]`.
///
/// Errors
/// ------
/// - `PreprocessError::InsufficientData` when fewer than 2 prices are given.
///
/// Examples
/// --------
/// ```rust
/// # use brent_changepoint::preprocessing::{PriceSeries, ReturnMethod, compute_returns};
/// # use chrono::NaiveDate;
/// let dates: Vec<NaiveDate> = (1..=3)
///     .map(|d| NaiveDate::from_ymd_opt(2020, 1, d).unwrap())
///     .collect();
/// let prices = PriceSeries::new(dates, vec![60.0, 60.0, 60.0]).unwrap();
/// let returns = compute_returns(&prices, ReturnMethod::Log).unwrap();
/// assert_eq!(returns.len(), 2);
/// assert!(returns.values().iter().all(|r| *r == 0.0));
/// ```
pub fn compute_returns(prices: &PriceSeries, method: ReturnMethod) -> PreprocessResult<ReturnSeries> {
    let values = compute_return_values(prices.prices().as_slice().unwrap_or(&[]), method)?;
    ReturnSeries::new(prices.dates()[1..].to_vec(), values.to_vec())
}

/// Compute returns for an undated price slice.
///
/// Errors
/// ------
/// - `InsufficientData` when `prices.len() < 2`.
/// - `NonFiniteValue` / `NonPositivePrice` for invalid prices.
pub fn compute_return_values(prices: &[f64], method: ReturnMethod) -> PreprocessResult<Array1<f64>> {
    if prices.len() < 2 {
        return Err(PreprocessError::InsufficientData { needed: 2, actual: prices.len() });
    }
    for (index, &value) in prices.iter().enumerate() {
        if !value.is_finite() {
            return Err(PreprocessError::NonFiniteValue { index, value });
        }
        if value <= 0.0 {
            return Err(PreprocessError::NonPositivePrice { index, value });
        }
    }
    Ok(prices.windows(2).map(|w| method.apply(w[0], w[1])).collect())
}
