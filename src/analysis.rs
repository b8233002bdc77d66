//! analysis — end-to-end run: prices → returns → change point → events.
//!
//! The pipeline owns no state. Each stage's error is lifted into
//! [`AnalysisError`] so the caller sees one error type with the crate's
//! [`ErrorKind`](crate::errors::ErrorKind) taxonomy.
use serde::Serialize;

use crate::{
    changepoint::{
        CancellationToken, ChangePointResult, ConvergenceReport, DetectionOutcome, ModelError,
        ParameterSummary, detect_change_point,
    },
    config::ProjectConfig,
    errors::AnalysisResult,
    events::{Association, Event, associate_with_config},
    preprocessing::{PriceSeries, compute_returns, rolling_std},
};

/// Serializable outcome of [`run_analysis`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub change_point: ChangePointResult,
    /// `None` when convergence could not be assessed (e.g. a single chain).
    pub convergence: Option<ConvergenceReport>,
    #[serde(skip)]
    pub convergence_error: Option<ModelError>,
    pub summary: Vec<ParameterSummary>,
    pub associations: Vec<Association>,
    /// Rolling sample standard deviation of the returns over the configured
    /// window; `None` until the first window is complete.
    pub rolling_volatility: Vec<Option<f64>>,
}

/// Run one complete analysis.
///
/// Parameters
/// ----------
/// - `prices`: `&PriceSeries`
///   Validated daily prices.
/// - `events`: `&[Event]`
///   Event table to associate the change point with.
/// - `config`: `&ProjectConfig`
///   Preprocessing, model, and event-matching settings.
/// - `cancel`: `&CancellationToken`
///   Forwarded to the sampler.
///
/// Errors
/// ------
/// - `AnalysisError::Preprocess` when returns cannot be computed.
/// - `AnalysisError::Model` for model, sampling, or cancellation failures.
pub fn run_analysis(
    prices: &PriceSeries, events: &[Event], config: &ProjectConfig, cancel: &CancellationToken,
) -> AnalysisResult<AnalysisReport> {
    let returns = compute_returns(prices, config.preprocessing.return_method())?;
    let rolling_volatility = rolling_std(returns.as_slice(), config.preprocessing.rolling_window())?;
    let DetectionOutcome { result, convergence, summary, .. } =
        detect_change_point(&returns, &config.model, cancel)?;
    let associations = associate_with_config(&[result.date], events, &config.event_matching);

    let (convergence, convergence_error) = match convergence {
        Ok(report) => (Some(report), None),
        Err(err) => (None, Some(err)),
    };
    Ok(AnalysisReport {
        change_point: result,
        convergence,
        convergence_error,
        summary,
        associations,
        rolling_volatility,
    })
}
