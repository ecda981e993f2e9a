//! Brownian Motion (Wiener Process) implementation
//!
//! Brownian motion is the foundation of every process in this crate.
//! Paths follow the first-order update B_{i+1} = B_i + μ Δt + √Δt Z,
//! so the driftless case is the standard Wiener process.

use crate::black_scholes::norm_cdf;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;

/// Brownian motion generator, optionally with constant drift
///
/// Generates paths of B_t with properties:
/// - B_0 = initial
/// - B_t - B_s ~ N(μ(t-s), t-s) for s < t
/// - Independent increments
/// - Continuous paths
#[derive(Debug, Clone)]
pub struct BrownianMotion {
    /// Initial value B_0
    pub initial: f64,
    /// Constant drift μ (0 for standard Brownian motion)
    pub drift: f64,
    /// Standard normal distribution for generating increments
    normal: Normal<f64>,
}

impl BrownianMotion {
    /// Creates a standard (driftless) Brownian motion generator
    ///
    /// # Arguments
    /// * `initial` - Starting value B_0 (typically 0.0)
    ///
    /// # Example
    /// ```
    /// use stochastic_lab::BrownianMotion;
    /// let bm = BrownianMotion::new(0.0);
    /// ```
    pub fn new(initial: f64) -> Self {
        Self::with_drift(initial, 0.0)
    }

    /// Creates a Brownian motion generator with constant drift
    pub fn with_drift(initial: f64, drift: f64) -> Self {
        Self {
            initial,
            drift,
            normal: Normal::new(0.0, 1.0).expect("Invalid normal distribution parameters"),
        }
    }

    /// Generates a single Brownian motion path
    ///
    /// # Arguments
    /// * `rng` - Random number generator (pass a seeded `StdRng` for
    ///   reproducible runs)
    /// * `n_steps` - Number of time steps
    /// * `dt` - Time step size
    ///
    /// # Returns
    /// Vector of B_t values for t = 0, dt, 2*dt, ..., n_steps*dt
    ///
    /// # Example
    /// ```
    /// use stochastic_lab::BrownianMotion;
    ///
    /// let bm = BrownianMotion::new(0.0);
    /// let mut rng = rand::thread_rng();
    /// let path = bm.generate_path(&mut rng, 100, 0.01);
    /// assert_eq!(path.len(), 101);
    /// ```
    pub fn generate_path<R: Rng>(&self, rng: &mut R, n_steps: usize, dt: f64) -> Vec<f64> {
        let sqrt_dt = dt.sqrt();
        let drift_per_step = self.drift * dt;
        let mut path = Vec::with_capacity(n_steps + 1);
        path.push(self.initial);

        let mut current = self.initial;
        for _ in 0..n_steps {
            // dB = μ dt + sqrt(dt) * Z, where Z ~ N(0, 1)
            current += drift_per_step + sqrt_dt * self.normal.sample(rng);
            path.push(current);
        }

        path
    }

    /// Generates multiple Brownian motion paths in parallel
    ///
    /// Uses rayon for parallel execution across multiple CPU cores.
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

    /// Analytical mean E[B_t] = B_0 + μt
    pub fn mean_analytical(&self, t: f64) -> f64 {
        self.initial + self.drift * t
    }

    /// Analytical standard deviation √t
    pub fn std_dev_analytical(&self, t: f64) -> f64 {
        t.sqrt()
    }

    /// Analytical P(B_t < threshold) = Φ((threshold - B_0 - μt) / √t)
    ///
    /// At t = 0 the distribution is degenerate at B_0, so the probability
    /// is 0 or 1.
    pub fn probability_below_analytical(&self, threshold: f64, t: f64) -> f64 {
        if t == 0.0 {
            return if self.initial < threshold { 1.0 } else { 0.0 };
        }
        norm_cdf((threshold - self.mean_analytical(t)) / t.sqrt())
    }
}
