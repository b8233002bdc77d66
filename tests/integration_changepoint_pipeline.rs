//! Integration tests for change-point detection and event association.
//!
//! Purpose
//! -------
//! - Validate the end-to-end pipeline: from validated prices, through
//!   returns, model construction and sampling, to the point estimate,
//!   convergence report, and event associations.
//! - Exercise realistic regimes (daily-return scale volatility, a visible
//!   mean shift) rather than toy edge cases only.
//!
//! Coverage
//! --------
//! - `changepoint`: shift recovery, seed determinism, convergence with one
//!   and several chains, degenerate data, cancellation.
//! - `analysis::run_analysis`: returns → detection → association.
//! - Serialization of results via `serde_json`.
//!
//! Exclusions
//! ----------
//! - Low-level building blocks (proposals, prefix sums, HDI, window
//!   matching) are covered by unit tests.
//! - Python bindings are exercised from Python.
use brent_changepoint::{
    analysis::run_analysis,
    changepoint::{
        CancellationToken, Draw, Param, PosteriorSamples, build_model, check_convergence,
        detect_change_point, sample,
    },
    config::{BayesianModelConfig, ProjectConfig},
    errors::ErrorKind,
    events::Event,
    preprocessing::{PriceSeries, ReturnSeries},
};
use chrono::{Days, NaiveDate};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_xoshiro::Xoshiro256PlusPlus;

const SHIFT_INDEX: usize = 50;

/// Purpose
/// -------
/// Build `n` consecutive calendar days starting 2020-01-01.
fn calendar(n: usize) -> Vec<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid start date");
    (0..n as u64).map(|i| start + Days::new(i)).collect()
}

/// Purpose
/// -------
/// Simulate 100 returns: 50 draws from N(0, 0.004²) followed by 50 draws
/// from N(0.01, 0.004²), so the true change point is index 50.
fn shifted_returns(seed: u64) -> Vec<f64> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let before = Normal::new(0.0, 0.004).expect("valid normal");
    let after = Normal::new(0.01, 0.004).expect("valid normal");
    (0..2 * SHIFT_INDEX)
        .map(|i| if i < SHIFT_INDEX { before.sample(&mut rng) } else { after.sample(&mut rng) })
        .collect()
}

/// Purpose
/// -------
/// Modest MCMC budget that still mixes well on 100 observations.
fn test_config(chains: usize) -> BayesianModelConfig {
    BayesianModelConfig::new(1000, 1000, 42, 0.95, 0.0, 0.1, 0.1)
        .and_then(|c| c.with_chains(chains))
        .expect("valid config")
}

#[test]
// Purpose
// -------
// Verify that an injected mean shift is recovered.
//
// Given
// -----
// - 100 simulated returns with the shift at index 50, two chains.
//
// Expect
// ------
// - Estimated index within ±5 of 50; positive impact; date aligned with
//   the series; a convergence report and one summary row per parameter.
fn injected_shift_is_recovered() {
    // Arrange
    let returns = shifted_returns(2024);
    let series = ReturnSeries::new(calendar(returns.len()), returns).expect("valid series");

    // Act
    let outcome = detect_change_point(&series, &test_config(2), &CancellationToken::new())
        .expect("detection should succeed");

    // Assert
    let result = &outcome.result;
    assert!(result.index.abs_diff(SHIFT_INDEX) <= 5, "index = {}", result.index);
    assert!(result.impact > 0.0);
    assert_eq!(result.date, series.dates()[result.index]);
    assert!(result.confidence > 0.0 && result.confidence <= 1.0);
    assert!(result.index_hdi.0 <= result.index && result.index <= result.index_hdi.1);
    let report = outcome.convergence.expect("two chains allow convergence checks");
    assert!(report.r_hat.values().all(|r| r.is_finite()), "{report:?}");
    assert_eq!(outcome.summary.len(), Param::ALL.len());
}

#[test]
// Purpose
// -------
// Ensure identical model, config, and seed give bit-identical draws.
//
// Given
// -----
// - The shifted series sampled twice with three chains.
//
// Expect
// ------
// - Equal `PosteriorSamples`; a different seed gives different draws.
fn sampling_is_reproducible_for_a_fixed_seed() {
    // Arrange
    let config = test_config(3);
    let model = build_model(&shifted_returns(7), &config).expect("valid model");
    let other_seed = BayesianModelConfig::new(1000, 1000, 43, 0.95, 0.0, 0.1, 0.1)
        .and_then(|c| c.with_chains(3))
        .expect("valid config");

    // Act
    let a = sample(&model, &config).expect("sampling should succeed");
    let b = sample(&model, &config).expect("sampling should succeed");
    let c = sample(&model, &other_seed).expect("sampling should succeed");

    // Assert
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
// Purpose
// -------
// Check the convergence checker's chain requirements.
//
// Given
// -----
// - A single-chain detection run; and two iid N(0, 1) chains of 2000 draws
//   mapped onto every parameter.
//
// Expect
// ------
// - The single-chain run still yields a result but its convergence check
//   is `InsufficientData`; every iid R-hat lies in (0.99, 1.01).
fn convergence_requires_two_chains_and_accepts_iid_chains() {
    // Arrange
    let returns = shifted_returns(11);
    let series = ReturnSeries::new(calendar(returns.len()), returns).expect("valid series");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(99);
    let normal = Normal::new(0.0, 1.0).expect("valid normal");
    let iid: Vec<Vec<Draw>> = (0..2)
        .map(|_| {
            (0..2000)
                .map(|i| {
                    let z = normal.sample(&mut rng);
                    Draw { tau: 40 + (i % 5), mu_1: z, mu_2: 0.5 * z, sigma: 1.0 + 0.01 * z }
                })
                .collect()
        })
        .collect();

    // Act
    let single = detect_change_point(&series, &test_config(1), &CancellationToken::new())
        .expect("single-chain detection should succeed");
    let report = check_convergence(&PosteriorSamples::from_draws(iid).expect("equal chains"), 1.01)
        .expect("two chains are enough");

    // Assert
    let err = single.convergence.expect_err("one chain cannot be assessed");
    assert_eq!(err.kind(), ErrorKind::InsufficientData);
    for param in Param::ALL {
        let r = report.r_hat(param).expect("every parameter has an R-hat");
        assert!(r > 0.99 && r < 1.01, "{param}: {r}");
    }
}

#[test]
// Purpose
// -------
// Verify the failure modes of the full pipeline.
//
// Given
// -----
// - A constant price path (zero log returns); a valid path with a token
//   cancelled before the run; a two-point price path.
//
// Expect
// ------
// - Sampling, Cancelled, and InvalidInput error kinds respectively.
fn pipeline_failures_carry_their_error_kind() {
    // Arrange
    let config = ProjectConfig::default();
    let flat = PriceSeries::new(calendar(40), vec![75.0; 40]).expect("valid prices");
    let short = PriceSeries::new(calendar(2), vec![75.0, 76.0]).expect("valid prices");
    let valid = prices_from_returns(&shifted_returns(5));
    let cancelled = CancellationToken::new();
    cancelled.cancel();

    // Act
    let degenerate = run_analysis(&flat, &[], &config, &CancellationToken::new())
        .expect_err("constant prices are degenerate");
    let aborted = run_analysis(&valid, &[], &config, &cancelled).expect_err("cancelled");
    let too_short = run_analysis(&short, &[], &config, &CancellationToken::new())
        .expect_err("one return is too few");

    // Assert
    assert_eq!(degenerate.kind(), ErrorKind::Sampling);
    assert_eq!(aborted.kind(), ErrorKind::Cancelled);
    assert_eq!(too_short.kind(), ErrorKind::InvalidInput);
}

/// Purpose
/// -------
/// Integrate returns into a price path starting at 70, dated from
/// 2020-01-01; return `i` is realised on day `i + 1`.
fn prices_from_returns(returns: &[f64]) -> PriceSeries {
    let mut prices = vec![70.0];
    for r in returns {
        let last = *prices.last().expect("non-empty");
        prices.push(last * r.exp());
    }
    PriceSeries::new(calendar(prices.len()), prices).expect("valid prices")
}

#[test]
// Purpose
// -------
// Ensure `run_analysis` links the detected date to a nearby event and
// serializes with the documented field names.
//
// Given
// -----
// - Prices integrated from the shifted returns (shift realised on
//   2020-02-21) and an event table with one nearby and one distant event.
//
// Expect
// ------
// - Exactly one association (nearest mode) naming the nearby event.
// - JSON keys date, index, mu_1, mu_2, sigma, impact, impact_pct,
//   confidence, index_hdi on the change point; ISO date string.
// - Rolling volatility aligned with the returns.
fn run_analysis_associates_nearby_event_and_serializes() {
    // Arrange
    let returns = shifted_returns(2024);
    let prices = prices_from_returns(&returns);
    let events = vec![
        Event::new(NaiveDate::from_ymd_opt(2019, 6, 1).expect("date"), "Distant", ""),
        Event::new(NaiveDate::from_ymd_opt(2020, 2, 22).expect("date"), "Supply shock", "Test event"),
    ];
    let config = ProjectConfig { model: test_config(2), ..ProjectConfig::default() };

    // Act
    let report = run_analysis(&prices, &events, &config, &CancellationToken::new())
        .expect("analysis should succeed");
    let json = serde_json::to_value(&report.change_point).expect("serializable");

    // Assert
    assert_eq!(report.associations.len(), 1);
    assert_eq!(report.associations[0].event, "Supply shock");
    assert!(report.associations[0].days_from_change.expect("matched").abs() <= 10);
    for key in ["date", "index", "mu_1", "mu_2", "sigma", "impact", "impact_pct", "confidence", "index_hdi"] {
        assert!(json.get(key).is_some(), "missing key {key}");
    }
    assert_eq!(json["date"], report.change_point.date.format("%Y-%m-%d").to_string());
    assert_eq!(report.rolling_volatility.len(), returns.len());
    assert!(report.convergence.is_some());
}
