//! changepoint::results — point estimates derived from posterior samples.
//!
//! Purpose
//! -------
//! Turn [`PosteriorSamples`] into the [`ChangePointResult`] reported to
//! callers: the change-point date, regime means, shared volatility, impact,
//! and how concentrated the τ posterior is.
//!
//! Key behaviors
//! -------------
//! - `τ̄ = round(mean of all τ draws)`, clamped into `0..=dates.len() − 1`
//!   before indexing `dates`.
//! - `confidence` is the fraction of τ draws within one index of `τ̄`.
//! - `index_hdi` is the HDI of τ at `config.hdi_prob()`.
//! - Everything else is a plain posterior mean over all chains.
//!
//! Conventions
//! -----------
//! - `impact = mu_2 − mu_1` in return units; `impact_pct = 100 · impact`.
//! - The serialized field names are a stable contract for downstream
//!   consumers (dashboards, APIs); dates serialize as `YYYY-MM-DD`.
use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    changepoint::{
        errors::{ModelError, ModelResult},
        params::Param,
        posterior::PosteriorSamples,
        summary::hdi,
    },
    config::BayesianModelConfig,
};

/// Posterior point estimate of the single change point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangePointResult {
    pub date: NaiveDate,
    pub index: usize,
    pub mu_1: f64,
    pub mu_2: f64,
    pub sigma: f64,
    pub impact: f64,
    pub impact_pct: f64,
    pub confidence: f64,
    pub index_hdi: (usize, usize),
}

/// Reduce posterior samples to a [`ChangePointResult`].
///
/// Parameters
/// ----------
/// - `samples`: `&PosteriorSamples`
///   Draws from any number of chains; all are pooled.
/// - `dates`: `&[NaiveDate]`
///   Dates aligned with the return series the model was built on.
/// - `config`: `&BayesianModelConfig`
///   Supplies `hdi_prob` for `index_hdi`.
///
/// Errors
/// ------
/// - `ModelError::EmptyDates` when `dates` is empty.
///
/// Examples
/// --------
/// ```rust
/// # use brent_changepoint::changepoint::{Draw, PosteriorSamples, extract_result};
/// # use brent_changepoint::config::BayesianModelConfig;
/// # use chrono::NaiveDate;
/// let dates: Vec<NaiveDate> =
///     (1..=5).map(|d| NaiveDate::from_ymd_opt(2020, 3, d).unwrap()).collect();
/// let draw = Draw { tau: 2, mu_1: 0.01, mu_2: -0.02, sigma: 0.03 };
/// let samples = PosteriorSamples::from_draws(vec![vec![draw; 4]]).unwrap();
/// let result = extract_result(&samples, &dates, &BayesianModelConfig::default()).unwrap();
/// assert_eq!(result.date, NaiveDate::from_ymd_opt(2020, 3, 3).unwrap());
/// assert_eq!(result.confidence, 1.0);
/// ```
pub fn extract_result(
    samples: &PosteriorSamples, dates: &[NaiveDate], config: &BayesianModelConfig,
) -> ModelResult<ChangePointResult> {
    if dates.is_empty() {
        return Err(ModelError::EmptyDates);
    }

    let tau_draws = samples.flat_values(Param::Tau);
    let tau_bar = samples.mean(Param::Tau).round();
    let index = (tau_bar.max(0.0) as usize).min(dates.len() - 1);

    let near = tau_draws.iter().filter(|&&t| (t - tau_bar).abs() <= 1.0).count();
    let confidence = near as f64 / tau_draws.len() as f64;

    let (lo, hi) = hdi(tau_draws.as_slice().unwrap_or(&[]), config.hdi_prob())?;

    let mu_1 = samples.mean(Param::Mu1);
    let mu_2 = samples.mean(Param::Mu2);
    let impact = mu_2 - mu_1;
    Ok(ChangePointResult {
        date: dates[index],
        index,
        mu_1,
        mu_2,
        sigma: samples.mean(Param::Sigma),
        impact,
        impact_pct: impact * 100.0,
        confidence,
        index_hdi: (lo as usize, hi as usize),
    })
}
