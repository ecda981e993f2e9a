//! Monte Carlo estimation of terminal-value expectations
//!
//! Estimates E[f(X_T)] by plain averaging over exact GBM terminal
//! samples, with the standard error of the estimate reported alongside.
//! Used to cross-check the closed-form results: option values against
//! Black-Scholes, threshold probabilities against the lognormal CDF.

use crate::gbm::GeometricBrownianMotion;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;

/// Result of a Monte Carlo simulation
#[derive(Debug, Clone)]
pub struct MonteCarloResult {
    /// Estimated value
    pub estimate: f64,
    /// Standard error
    pub std_error: f64,
    /// 95% confidence interval (lower bound)
    pub ci_lower: f64,
    /// 95% confidence interval (upper bound)
    pub ci_upper: f64,
    /// Number of samples used
    pub n_samples: usize,
}

impl MonteCarloResult {
    fn new(estimate: f64, std_error: f64, n_samples: usize) -> Self {
        // 95% CI uses z = 1.96
        let margin = 1.96 * std_error;
        Self {
            estimate,
            std_error,
            ci_lower: estimate - margin,
            ci_upper: estimate + margin,
            n_samples,
        }
    }
}

/// Basic Monte Carlo estimator
///
/// Estimates E[f(X_T)] by averaging f over exact terminal samples.
pub fn monte_carlo_basic<F, R>(
    gbm: &GeometricBrownianMotion,
    payoff: F,
    t: f64,
    n_paths: usize,
    rng: &mut R,
) -> MonteCarloResult
where
    F: Fn(f64) -> f64,
    R: Rng,
{
    let normal = Normal::new(0.0, 1.0).unwrap();
    let drift = (gbm.mu - 0.5 * gbm.sigma * gbm.sigma) * t;
    let vol_sqrt_t = gbm.sigma * t.sqrt();

    let mut sum = 0.0;
    let mut sum_sq = 0.0;

    for _ in 0..n_paths {
        let z = normal.sample(rng);
        let s_t = gbm.s0 * (drift + vol_sqrt_t * z).exp();
        let p = payoff(s_t);

        sum += p;
        sum_sq += p * p;
    }

    let mean = sum / n_paths as f64;
    let variance = sum_sq / n_paths as f64 - mean * mean;
    let std_error = (variance / n_paths as f64).sqrt();

    MonteCarloResult::new(mean, std_error, n_paths)
}

/// Monte Carlo with parallel execution
pub fn monte_carlo_parallel<F>(
    gbm: &GeometricBrownianMotion,
    payoff: F,
    t: f64,
    n_paths: usize,
) -> MonteCarloResult
where
    F: Fn(f64) -> f64 + Sync,
{
    let drift = (gbm.mu - 0.5 * gbm.sigma * gbm.sigma) * t;
    let vol_sqrt_t = gbm.sigma * t.sqrt();
    let s0 = gbm.s0;

    let results: Vec<f64> = (0..n_paths)
        .into_par_iter()
        .map(|_| {
            let mut rng = rand::thread_rng();
            let normal = Normal::new(0.0, 1.0).unwrap();
            let z = normal.sample(&mut rng);
            let s_t = s0 * (drift + vol_sqrt_t * z).exp();
            payoff(s_t)
        })
        .collect();

    let sum: f64 = results.iter().sum();
    let sum_sq: f64 = results.iter().map(|x| x * x).sum();

    let mean = sum / n_paths as f64;
    let variance = sum_sq / n_paths as f64 - mean * mean;
    let std_error = (variance / n_paths as f64).sqrt();

    MonteCarloResult::new(mean, std_error, n_paths)
}

/// European call option payoff
pub fn call_payoff(strike: f64) -> impl Fn(f64) -> f64 {
    move |s_t| (s_t - strike).max(0.0)
}

/// European put option payoff
pub fn put_payoff(strike: f64) -> impl Fn(f64) -> f64 {
    move |s_t| (strike - s_t).max(0.0)
}

/// Indicator of finishing below a threshold
///
/// Averaging this payoff estimates P(X_T < threshold).
pub fn below_payoff(threshold: f64) -> impl Fn(f64) -> f64 {
    move |s_t| if s_t < threshold { 1.0 } else { 0.0 }
}
