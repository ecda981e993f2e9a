//! Euler discretization error for geometric Brownian motion
//!
//! The closed form X_t = X_0 exp((μ - σ²/2)t + σB_t) and the
//! Euler-Maruyama re-integration of dX = μX dt + σX dW agree only in the
//! dt → 0 limit. Driving both from the SAME Brownian path isolates the
//! discretization error from sampling noise, which is what makes the
//! per-run comparison meaningful at all.

use crate::brownian::BrownianMotion;
use crate::gbm::GeometricBrownianMotion;
use crate::sde::EulerMaruyama;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

/// One seeded Euler-vs-exact comparison
#[derive(Debug, Clone)]
pub struct ConvergenceRun {
    /// Closed-form path evaluated on the Brownian path
    pub exact: Vec<f64>,
    /// Euler path integrated from the same increments
    pub euler: Vec<f64>,
}

impl ConvergenceRun {
    /// Pointwise euler - exact difference
    pub fn pointwise_difference(&self) -> Vec<f64> {
        self.euler
            .iter()
            .zip(self.exact.iter())
            .map(|(e, x)| e - x)
            .collect()
    }

    /// |euler - exact| at the final grid point
    pub fn terminal_abs_error(&self) -> f64 {
        (self.euler.last().unwrap() - self.exact.last().unwrap()).abs()
    }

    /// Largest |euler - exact| over the whole path
    pub fn max_abs_error(&self) -> f64 {
        self.pointwise_difference()
            .iter()
            .fold(0.0, |acc, d| acc.max(d.abs()))
    }
}

/// Seeded study of the Euler scheme's convergence to the exact solution
#[derive(Debug, Clone)]
pub struct ConvergenceStudy {
    /// The process under study
    pub gbm: GeometricBrownianMotion,
    /// Time step size
    pub dt: f64,
    /// Time horizon
    pub t_end: f64,
}

impl ConvergenceStudy {
    /// # Panics
    /// Panics if dt <= 0 or t_end <= 0
    pub fn new(gbm: GeometricBrownianMotion, dt: f64, t_end: f64) -> Self {
        assert!(dt > 0.0, "Time step must be positive, got {}", dt);
        assert!(t_end > 0.0, "Horizon must be positive, got {}", t_end);
        Self { gbm, dt, t_end }
    }

    /// Number of steps on the grid
    pub fn n_steps(&self) -> usize {
        (self.t_end / self.dt).round() as usize
    }

    /// Runs one seeded comparison
    ///
    /// Draws a single driftless Brownian path from
    /// `StdRng::seed_from_u64(seed)`, evaluates the closed form on it, and
    /// re-integrates the same increments with the Euler scheme. The same
    /// seed always reproduces the same pair of paths.
    pub fn run(&self, seed: u64) -> ConvergenceRun {
        let mut rng = StdRng::seed_from_u64(seed);
        let n_steps = self.n_steps();

        let brownian = BrownianMotion::new(0.0).generate_path(&mut rng, n_steps, self.dt);
        let exact = self.gbm.path_from_brownian(&brownian, self.dt);

        let solver = EulerMaruyama::new(self.gbm.clone(), self.dt);
        let mut euler = Vec::with_capacity(n_steps + 1);
        let mut x = self.gbm.s0;
        let mut t = 0.0;
        euler.push(x);
        for dw in brownian.windows(2).map(|w| w[1] - w[0]) {
            x = solver.step_with_increment(t, x, dw);
            t += self.dt;
            euler.push(x);
        }

        ConvergenceRun { exact, euler }
    }

    /// Runs comparisons for seeds 0..n_runs in parallel
    pub fn run_many(&self, n_runs: usize) -> Vec<ConvergenceRun> {
        (0..n_runs as u64)
            .into_par_iter()
            .map(|seed| self.run(seed))
            .collect()
    }

    /// Mean terminal |euler - exact| over seeds 0..n_runs
    ///
    /// Shrinks roughly like √dt (the Euler scheme's strong order is 0.5).
    pub fn mean_terminal_error(&self, n_runs: usize) -> f64 {
        let runs = self.run_many(n_runs);
        runs.iter().map(|r| r.terminal_abs_error()).sum::<f64>() / n_runs as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn study(dt: f64) -> ConvergenceStudy {
        ConvergenceStudy::new(GeometricBrownianMotion::new(1.0, 0.05, 0.2), dt, 1.0)
    }

    #[test]
    fn test_same_seed_reproduces_run() {
        let study = study(0.01);
        let a = study.run(7);
        let b = study.run(7);
        assert_eq!(a.exact, b.exact);
        assert_eq!(a.euler, b.euler);
    }

    #[test]
    fn test_different_seeds_differ() {
        let study = study(0.01);
        let a = study.run(0);
        let b = study.run(1);
        assert_ne!(a.exact, b.exact);
    }

    #[test]
    fn test_paths_share_grid_and_start() {
        let study = study(0.01);
        let run = study.run(3);

        assert_eq!(run.exact.len(), 101);
        assert_eq!(run.euler.len(), 101);
        assert_eq!(run.exact[0], 1.0);
        assert_eq!(run.euler[0], 1.0);
    }

    #[test]
    fn test_fine_grid_keeps_paths_close() {
        let study = study(0.001);
        let run = study.run(42);

        // At dt = 1e-3 with σ = 0.2 the discretization error is tiny
        // relative to the unit starting value
        assert!(
            run.max_abs_error() < 0.05,
            "Max |euler - exact| = {}",
            run.max_abs_error()
        );
    }

    #[test]
    fn test_error_shrinks_with_dt() {
        let coarse = study(0.01).mean_terminal_error(50);
        let fine = study(0.0005).mean_terminal_error(50);

        assert!(
            fine < coarse,
            "Mean terminal error should shrink with dt: fine = {}, coarse = {}",
            fine,
            coarse
        );
    }
}
