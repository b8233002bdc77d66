//! sampler::proposals — the building blocks of one Gibbs sweep.
//!
//! Purpose
//! -------
//! Keep the random pieces of the sampler small and separately testable:
//! - [`StepAdapter`]: a Gaussian random-walk proposal whose scale adapts in
//!   batches during tuning and is frozen afterwards.
//! - [`metropolis_accept`]: the accept/reject decision from a log ratio.
//! - [`sample_log_weights`]: an exact categorical draw from unnormalised log
//!   weights (log-sum-exp normalised).
//!
//! Conventions
//! -----------
//! - Adaptation works on `ln(scale)` with step `δ_k = min(0.1, 1/√k)` after
//!   batch `k`, moving toward [`TARGET_ACCEPT_RATE`].
//! - A NaN log ratio is always rejected.
use rand::Rng;
use rand_distr::StandardNormal;

/// Iterations per adaptation batch.
pub const ADAPT_BATCH_SIZE: usize = 50;
/// Target acceptance rate for one-dimensional random-walk updates.
pub const TARGET_ACCEPT_RATE: f64 = 0.44;
const MAX_ADAPT_STEP: f64 = 0.1;

/// StepAdapter — random-walk proposal scale with batch adaptation.
///
/// Invariants
/// ----------
/// - `scale()` is finite and > 0.
/// - Once [`freeze`](Self::freeze) is called the scale never changes and the
///   acceptance counters restart, so [`acceptance_rate`](Self::acceptance_rate)
///   reports post-tuning behaviour only.
#[derive(Debug, Clone, PartialEq)]
pub struct StepAdapter {
    log_scale: f64,
    batch_accepted: usize,
    batch_proposed: usize,
    batches: usize,
    accepted: usize,
    proposed: usize,
    frozen: bool,
}

impl StepAdapter {
    pub fn new(scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        StepAdapter {
            log_scale: scale.ln(),
            batch_accepted: 0,
            batch_proposed: 0,
            batches: 0,
            accepted: 0,
            proposed: 0,
            frozen: false,
        }
    }

    pub fn scale(&self) -> f64 {
        self.log_scale.exp()
    }

    /// Draw `current + scale · z` with `z ~ N(0, 1)`.
    pub fn propose<R: Rng + ?Sized>(&self, current: f64, rng: &mut R) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        current + self.scale() * z
    }

    /// Record one accept/reject outcome and adapt at batch boundaries while
    /// not frozen.
    pub fn record(&mut self, accepted: bool) {
        self.proposed += 1;
        self.accepted += usize::from(accepted);
        if self.frozen {
            return;
        }
        self.batch_proposed += 1;
        self.batch_accepted += usize::from(accepted);
        if self.batch_proposed == ADAPT_BATCH_SIZE {
            self.adapt();
        }
    }

    fn adapt(&mut self) {
        self.batches += 1;
        let delta = MAX_ADAPT_STEP.min(1.0 / (self.batches as f64).sqrt());
        let rate = self.batch_accepted as f64 / self.batch_proposed as f64;
        if rate > TARGET_ACCEPT_RATE {
            self.log_scale += delta;
        } else {
            self.log_scale -= delta;
        }
        self.batch_accepted = 0;
        self.batch_proposed = 0;
    }

    /// Stop adapting and restart the acceptance counters.
    pub fn freeze(&mut self) {
        self.frozen = true;
        self.accepted = 0;
        self.proposed = 0;
    }

    /// Fraction of accepted proposals since construction or the last
    /// [`freeze`](Self::freeze); 0 when nothing was proposed.
    pub fn acceptance_rate(&self) -> f64 {
        if self.proposed == 0 { 0.0 } else { self.accepted as f64 / self.proposed as f64 }
    }
}

/// Metropolis decision for a proposal with log acceptance ratio `log_ratio`.
pub fn metropolis_accept<R: Rng + ?Sized>(log_ratio: f64, rng: &mut R) -> bool {
    if log_ratio.is_nan() {
        return false;
    }
    if log_ratio >= 0.0 {
        return true;
    }
    let u: f64 = rng.random();
    u.ln() < log_ratio
}

/// Draw an index with probability proportional to `exp(log_weights[i])`.
///
/// Non-finite weights get zero mass. Returns `None` when no weight is finite.
pub fn sample_log_weights<R: Rng + ?Sized>(log_weights: &[f64], rng: &mut R) -> Option<usize> {
    let max = log_weights.iter().copied().filter(|w| w.is_finite()).fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return None;
    }
    let mass = |w: f64| if w.is_finite() { (w - max).exp() } else { 0.0 };
    let total: f64 = log_weights.iter().map(|&w| mass(w)).sum();

    let target = rng.random::<f64>() * total;
    let mut acc = 0.0;
    let mut last_positive = None;
    for (i, &w) in log_weights.iter().enumerate() {
        let m = mass(w);
        if m > 0.0 {
            last_positive = Some(i);
        }
        acc += m;
        if target < acc {
            return Some(i);
        }
    }
    // Rounding can leave `target` just above the running sum.
    last_positive
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Scale adaptation direction and freezing in `StepAdapter`.
    // - The deterministic branches of `metropolis_accept`.
    // - `sample_log_weights`: degenerate weights, point mass, and empirical
    //   frequencies against normalised probabilities.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a batch of all-accepts widens the scale, all-rejects
    // narrows it, and freezing stops adaptation.
    //
    // Given
    // -----
    // - Two adapters at scale 1.0 fed one full batch each.
    //
    // Expect
    // ------
    // - Scales exp(0.1) and exp(-0.1); a frozen adapter keeps its scale.
    fn batch_adaptation_moves_toward_target_rate() {
        // Arrange
        let mut wide = StepAdapter::new(1.0);
        let mut narrow = StepAdapter::new(1.0);

        // Act
        for _ in 0..ADAPT_BATCH_SIZE {
            wide.record(true);
            narrow.record(false);
        }
        wide.freeze();
        let frozen_scale = wide.scale();
        for _ in 0..(3 * ADAPT_BATCH_SIZE) {
            wide.record(true);
        }

        // Assert
        approx::assert_relative_eq!(narrow.scale(), (-0.1_f64).exp(), epsilon = 1e-12);
        approx::assert_relative_eq!(frozen_scale, 0.1_f64.exp(), epsilon = 1e-12);
        assert_eq!(wide.scale(), frozen_scale);
        assert_eq!(wide.acceptance_rate(), 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Check the deterministic branches of the Metropolis rule.
    //
    // Given
    // -----
    // - Log ratios 0.5, NaN, and -inf.
    //
    // Expect
    // ------
    // - Accept, reject, reject.
    fn metropolis_accept_deterministic_branches() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);

        assert!(metropolis_accept(0.5, &mut rng));
        assert!(!metropolis_accept(f64::NAN, &mut rng));
        assert!(!metropolis_accept(f64::NEG_INFINITY, &mut rng));
    }

    #[test]
    // Purpose
    // -------
    // Validate categorical sampling from log weights.
    //
    // Given
    // -----
    // - All -inf weights; a single finite weight among -inf; and weights
    //   ln(1), ln(3) sampled 20 000 times.
    //
    // Expect
    // ------
    // - None; always the finite index; frequency of index 1 near 0.75.
    fn sample_log_weights_matches_normalised_probabilities() {
        // Arrange
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let weights = [0.0, 3.0_f64.ln()];

        // Act
        let hits = (0..20_000).filter(|_| sample_log_weights(&weights, &mut rng) == Some(1)).count();

        // Assert
        assert_eq!(sample_log_weights(&[f64::NEG_INFINITY; 3], &mut rng), None);
        assert_eq!(
            sample_log_weights(&[f64::NEG_INFINITY, -1e6, f64::NAN], &mut rng),
            Some(1)
        );
        let freq = hits as f64 / 20_000.0;
        assert!((freq - 0.75).abs() < 0.02, "freq = {freq}");
    }
}
