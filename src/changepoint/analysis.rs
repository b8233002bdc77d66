//! changepoint::analysis — one detection run over a dated return series.
//!
//! Builds the model, samples, and reduces the draws into a point estimate,
//! a convergence report, and a posterior summary. The convergence report is
//! kept as a `Result` so that an `InsufficientChains` outcome (single-chain
//! runs) does not discard a valid point estimate.
use tracing::{info, warn};

use crate::{
    changepoint::{
        diagnostics::{ConvergenceReport, check_convergence_default},
        errors::ModelResult,
        model::build_model,
        posterior::PosteriorSamples,
        results::{ChangePointResult, extract_result},
        sampler::{CancellationToken, sample_with_cancel},
        summary::{ParameterSummary, summarize},
    },
    config::BayesianModelConfig,
    preprocessing::ReturnSeries,
};

/// Everything one detection run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionOutcome {
    pub result: ChangePointResult,
    pub convergence: ModelResult<ConvergenceReport>,
    pub summary: Vec<ParameterSummary>,
    pub samples: PosteriorSamples,
}

/// Detect the single change point of `series`.
///
/// Errors
/// ------
/// - Model-building errors (`TooFewObservations`, ...).
/// - Sampling errors, including `Cancelled`.
/// - `InvalidHdiProb` is impossible for a validated config but propagated.
///
/// Unconverged parameters are logged at `warn` and reported through
/// `DetectionOutcome::convergence`; they are not an error.
pub fn detect_change_point(
    series: &ReturnSeries, config: &BayesianModelConfig, cancel: &CancellationToken,
) -> ModelResult<DetectionOutcome> {
    let model = build_model(series.as_slice(), config)?;
    let samples = sample_with_cancel(&model, config, cancel)?;
    let result = extract_result(&samples, series.dates(), config)?;
    let summary = summarize(&samples, config.hdi_prob())?;

    let convergence = check_convergence_default(&samples);
    match &convergence {
        Ok(report) => {
            for param in report.unconverged() {
                warn!(
                    param = param.name(),
                    r_hat = report.r_hat(param),
                    threshold = report.threshold,
                    "parameter did not converge"
                );
            }
        }
        Err(err) => warn!(error = %err, "convergence could not be assessed"),
    }

    info!(
        date = %result.date,
        index = result.index,
        impact = result.impact,
        confidence = result.confidence,
        "change point detected"
    );
    Ok(DetectionOutcome { result, convergence, summary, samples })
}
