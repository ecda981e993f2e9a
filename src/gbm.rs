//! Geometric Brownian Motion (GBM)
//!
//! The most widely used model for asset prices in finance.
//! dX_t = μ X_t dt + σ X_t dW_t
//!
//! Solution: X_t = X_0 exp((μ - σ²/2)t + σW_t)

use crate::black_scholes::{norm_cdf, norm_quantile};
use crate::sde::{EulerMaruyama, SDE};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;

/// Geometric Brownian Motion model
///
/// Models asset prices with constant drift and volatility.
/// The price is always positive due to the exponential structure.
#[derive(Debug, Clone)]
pub struct GeometricBrownianMotion {
    /// Initial value X_0
    pub s0: f64,
    /// Drift (expected return) μ
    pub mu: f64,
    /// Volatility σ
    pub sigma: f64,
}

impl GeometricBrownianMotion {
    /// Creates a new GBM model
    ///
    /// # Arguments
    /// * `s0` - Initial value (must be positive)
    /// * `mu` - Expected return (drift)
    /// * `sigma` - Volatility (must be non-negative)
    ///
    /// # Panics
    /// Panics if s0 <= 0 or sigma < 0
    ///
    /// # Example
    /// ```
    /// use stochastic_lab::GeometricBrownianMotion;
    ///
    /// let gbm = GeometricBrownianMotion::new(100.0, 0.1, 0.2);
    /// ```
    pub fn new(s0: f64, mu: f64, sigma: f64) -> Self {
        assert!(s0 > 0.0, "Initial value must be positive, got {}", s0);
        assert!(sigma >= 0.0, "Volatility must be non-negative, got {}", sigma);
        Self { s0, mu, sigma }
    }

    /// Samples the value at time t using the exact analytical solution
    ///
    /// Uses: X_t = X_0 exp((μ - σ²/2)t + σ√t Z) where Z ~ N(0,1)
    ///
    /// This is more efficient than simulating the full path when only
    /// the terminal value is needed.
    pub fn sample_at_time<R: Rng>(&self, rng: &mut R, t: f64) -> f64 {
        let normal = Normal::new(0.0, 1.0).unwrap();
        let z = normal.sample(rng);

        let drift = (self.mu - 0.5 * self.sigma * self.sigma) * t;
        let diffusion = self.sigma * t.sqrt() * z;

        self.s0 * (drift + diffusion).exp()
    }

    /// Generates a path using the exact solution
    ///
    /// At each step, uses: log(X_{t+dt}) = log(X_t) + (μ - σ²/2)dt + σ√dt Z
    ///
    /// # Arguments
    /// * `rng` - Random number generator
    /// * `n_steps` - Number of time steps
    /// * `dt` - Time step size
    ///
    /// # Returns
    /// Vector of values X_t for t = 0, dt, 2dt, ..., n_steps*dt
    pub fn generate_path<R: Rng>(&self, rng: &mut R, n_steps: usize, dt: f64) -> Vec<f64> {
        let normal = Normal::new(0.0, 1.0).unwrap();
        let sqrt_dt = dt.sqrt();
        let drift_per_step = (self.mu - 0.5 * self.sigma * self.sigma) * dt;

        let mut path = Vec::with_capacity(n_steps + 1);
        path.push(self.s0);

        let mut log_s = self.s0.ln();
        for _ in 0..n_steps {
            let z = normal.sample(rng);
            log_s += drift_per_step + self.sigma * sqrt_dt * z;
            path.push(log_s.exp());
        }

        path
    }

    /// Generates a path with the first-order Euler-Maruyama scheme
    ///
    /// Integrates dX = μX dt + σX dW directly instead of the exact
    /// log-space update. Subject to discretization error of strong
    /// order 0.5; the convergence module quantifies it.
    pub fn euler_path<R: Rng>(&self, rng: &mut R, n_steps: usize, dt: f64) -> Vec<f64> {
        let solver = EulerMaruyama::new(self.clone(), dt);

        let mut path = Vec::with_capacity(n_steps + 1);
        let mut t = 0.0;
        let mut x = self.s0;
        path.push(x);

        for _ in 0..n_steps {
            x = solver.step(rng, t, x);
            t += dt;
            path.push(x);
        }

        path
    }

    /// Evaluates the closed-form solution on a supplied Brownian path
    ///
    /// X_i = X_0 exp((μ - σ²/2) t_i + σ B_i)
    ///
    /// `brownian` must be a driftless Brownian path starting at 0, sampled
    /// on the same grid (`dt` spacing). Together with an Euler path driven
    /// by the same increments this exposes the discretization error.
    pub fn path_from_brownian(&self, brownian: &[f64], dt: f64) -> Vec<f64> {
        let log_drift = self.mu - 0.5 * self.sigma * self.sigma;

        brownian
            .iter()
            .enumerate()
            .map(|(i, &b)| self.s0 * (log_drift * (i as f64 * dt) + self.sigma * b).exp())
            .collect()
    }

    /// Generates multiple paths in parallel
    ///
    /// # Arguments
    /// * `n_paths` - Number of paths to generate
    /// * `n_steps` - Number of time steps per path
    /// * `dt` - Time step size
    pub fn generate_paths_parallel(
        &self,
        n_paths: usize,
        n_steps: usize,
        dt: f64,
    ) -> Vec<Vec<f64>> {
        (0..n_paths)
            .into_par_iter()
            .map(|_| {
                let mut rng = rand::thread_rng();
                self.generate_path(&mut rng, n_steps, dt)
            })
            .collect()
    }

    /// Samples terminal values in parallel
    ///
    /// Efficient for Monte Carlo estimation where only X_T is needed.
    pub fn sample_terminal_parallel(&self, n_paths: usize, t: f64) -> Vec<f64> {
        (0..n_paths)
            .into_par_iter()
            .map(|_| {
                let mut rng = rand::thread_rng();
                self.sample_at_time(&mut rng, t)
            })
            .collect()
    }

    /// Expected value E[X_t] = X_0 * exp(μt)
    pub fn expected_value(&self, t: f64) -> f64 {
        self.s0 * (self.mu * t).exp()
    }

    /// Variance Var[X_t] = X_0² * exp(2μt) * (exp(σ²t) - 1)
    pub fn variance(&self, t: f64) -> f64 {
        let e_s = self.expected_value(t);
        e_s * e_s * ((self.sigma * self.sigma * t).exp() - 1.0)
    }

    /// Analytical median: X_0 * exp((μ - σ²/2)t)
    ///
    /// The median, not the mean; the lognormal distribution is skewed, so
    /// half the runs end below this curve even though the mean sits higher.
    pub fn median_analytical(&self, t: f64) -> f64 {
        self.s0 * ((self.mu - 0.5 * self.sigma * self.sigma) * t).exp()
    }

    /// Analytical central confidence interval around the median
    ///
    /// For confidence level p, the bounds are
    /// median * exp(±σ√t Φ⁻¹((1+p)/2)).
    ///
    /// # Panics
    /// Panics unless 0 < level < 1
    pub fn confidence_interval_analytical(&self, t: f64, level: f64) -> (f64, f64) {
        assert!(
            level > 0.0 && level < 1.0,
            "Confidence level must be in (0, 1), got {}",
            level
        );

        let median = self.median_analytical(t);
        let spread = self.sigma * t.sqrt();
        let upper = median * (spread * norm_quantile((1.0 + level) / 2.0)).exp();
        let lower = median * (spread * norm_quantile((1.0 - level) / 2.0)).exp();

        (lower, upper)
    }

    /// Analytical P(X_t < threshold)
    ///
    /// Since ln(X_t/X_0) ~ N((μ - σ²/2)t, σ²t):
    /// P = Φ((ln(threshold/X_0) - (μ - σ²/2)t) / (σ√t))
    pub fn probability_below_analytical(&self, threshold: f64, t: f64) -> f64 {
        let log_drift = (self.mu - 0.5 * self.sigma * self.sigma) * t;
        norm_cdf(((threshold / self.s0).ln() - log_drift) / (self.sigma * t.sqrt()))
    }
}

impl SDE for GeometricBrownianMotion {
    type State = f64;

    fn drift(&self, _t: f64, x: &f64) -> f64 {
        self.mu * x
    }

    fn diffusion(&self, _t: f64, x: &f64) -> f64 {
        self.sigma * x
    }

    fn initial_state(&self) -> f64 {
        self.s0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gbm_positive_prices() {
        let gbm = GeometricBrownianMotion::new(100.0, -0.5, 0.5);
        let mut rng = rand::thread_rng();

        let path = gbm.generate_path(&mut rng, 1000, 0.01);

        assert!(path.iter().all(|&p| p > 0.0), "All values should be positive");
    }

    #[test]
    fn test_gbm_expected_value() {
        let gbm = GeometricBrownianMotion::new(100.0, 0.1, 0.2);
        let t = 1.0;
        let n_simulations = 100_000;

        let terminals = gbm.sample_terminal_parallel(n_simulations, t);
        let mean = terminals.iter().sum::<f64>() / n_simulations as f64;

        let expected = gbm.expected_value(t);

        // Mean should be close to E[X_t] = X_0 * e^(μt)
        let relative_error = (mean - expected).abs() / expected;
        assert!(
            relative_error < 0.02,
            "Mean: {:.2}, Expected: {:.2}, Error: {:.2}%",
            mean,
            expected,
            relative_error * 100.0
        );

        let sample_variance = terminals
            .iter()
            .map(|x| (x - mean).powi(2))
            .sum::<f64>()
            / (n_simulations - 1) as f64;
        let variance_error = (sample_variance - gbm.variance(t)).abs() / gbm.variance(t);
        assert!(
            variance_error < 0.05,
            "Sample variance: {:.2}, Expected: {:.2}",
            sample_variance,
            gbm.variance(t)
        );
    }

    #[test]
    fn test_gbm_log_returns_normal() {
        let gbm = GeometricBrownianMotion::new(100.0, 0.1, 0.2);
        let mut rng = rand::thread_rng();

        let n_steps = 252;
        let dt = 1.0 / 252.0;
        let path = gbm.generate_path(&mut rng, n_steps, dt);

        // Compute log returns
        let log_returns: Vec<f64> = path
            .windows(2)
            .map(|w| (w[1] / w[0]).ln())
            .collect();

        // Check mean of log returns ≈ (μ - σ²/2) * dt
        let expected_mean = (gbm.mu - 0.5 * gbm.sigma * gbm.sigma) * dt;
        let actual_mean = log_returns.iter().sum::<f64>() / log_returns.len() as f64;

        let tolerance = 0.005;
        assert!(
            (actual_mean - expected_mean).abs() < tolerance,
            "Log return mean: {}, expected: {}",
            actual_mean,
            expected_mean
        );
    }

    #[test]
    fn test_path_length() {
        let gbm = GeometricBrownianMotion::new(100.0, 0.1, 0.2);
        let mut rng = rand::thread_rng();

        let path = gbm.generate_path(&mut rng, 100, 0.01);
        assert_eq!(path.len(), 101);

        let euler = gbm.euler_path(&mut rng, 100, 0.01);
        assert_eq!(euler.len(), 101);
        assert_eq!(euler[0], 100.0);
    }

    #[test]
    fn test_parallel_generation() {
        let gbm = GeometricBrownianMotion::new(100.0, 0.1, 0.2);
        let paths = gbm.generate_paths_parallel(1000, 50, 0.01);

        assert_eq!(paths.len(), 1000);
        assert!(paths.iter().all(|p| p.len() == 51));
    }

    #[test]
    fn test_median_and_confidence_interval() {
        let gbm = GeometricBrownianMotion::new(1.0, 0.1, 0.2);
        let t = 1.0;

        let median = gbm.median_analytical(t);
        assert!((median - (0.08_f64).exp()).abs() < 1e-12);

        let (lower, upper) = gbm.confidence_interval_analytical(t, 0.8);
        assert!(lower < median && median < upper);

        // z_{0.9} ≈ 1.2816, so upper/median = exp(0.2 * 1.2816)
        let ratio = upper / median;
        assert!(
            (ratio - (0.2 * 1.2816_f64).exp()).abs() < 1e-3,
            "Upper/median ratio = {}",
            ratio
        );
    }

    #[test]
    fn test_probability_below_median_is_half() {
        let gbm = GeometricBrownianMotion::new(1.0, 0.1, 0.2);
        let t = 40.0;

        let median = gbm.median_analytical(t);
        let p = gbm.probability_below_analytical(median, t);
        assert!((p - 0.5).abs() < 1e-9, "P(X_t < median) = {}", p);
    }

    #[test]
    fn test_path_from_brownian_zero_noise_path() {
        let gbm = GeometricBrownianMotion::new(1.0, 0.1, 0.2);
        let dt = 0.1;
        let flat = vec![0.0; 11];

        let path = gbm.path_from_brownian(&flat, dt);

        // With B ≡ 0 the closed form reduces to the median curve
        for (i, &x) in path.iter().enumerate() {
            let expected = gbm.median_analytical(i as f64 * dt);
            assert!((x - expected).abs() < 1e-12);
        }
    }

    #[test]
    #[should_panic(expected = "Initial value must be positive")]
    fn test_negative_s0_panics() {
        GeometricBrownianMotion::new(-100.0, 0.1, 0.2);
    }

    #[test]
    #[should_panic(expected = "Volatility must be non-negative")]
    fn test_negative_sigma_panics() {
        GeometricBrownianMotion::new(100.0, 0.1, -0.2);
    }

    #[test]
    #[should_panic(expected = "Confidence level must be in (0, 1)")]
    fn test_bad_confidence_level_panics() {
        let gbm = GeometricBrownianMotion::new(100.0, 0.1, 0.2);
        gbm.confidence_interval_analytical(1.0, 1.5);
    }
}
