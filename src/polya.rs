//! Polya's urn martingale
//!
//! The urn starts with one red and one black ball. Each trial draws a
//! ball uniformly and returns it together with one more of the same
//! color. The red fraction red/total is a martingale, and for this
//! starting composition its limit is Uniform(0, 1).

use rand::Rng;
use rayon::prelude::*;

/// Polya urn state
///
/// Tracks the ball counts; the martingale value is the red fraction.
#[derive(Debug, Clone)]
pub struct PolyaUrn {
    /// Number of red balls
    pub red: u64,
    /// Total number of balls
    pub total: u64,
}

impl Default for PolyaUrn {
    fn default() -> Self {
        Self::new()
    }
}

impl PolyaUrn {
    /// Creates the classic urn: one red ball, one black ball
    pub fn new() -> Self {
        Self { red: 1, total: 2 }
    }

    /// Creates an urn with an arbitrary starting composition
    ///
    /// # Panics
    /// Panics unless 0 < red < total
    pub fn with_composition(red: u64, total: u64) -> Self {
        assert!(
            red > 0 && red < total,
            "Urn needs at least one ball of each color, got {}/{}",
            red,
            total
        );
        Self { red, total }
    }

    /// The martingale value: fraction of red balls
    pub fn fraction(&self) -> f64 {
        self.red as f64 / self.total as f64
    }

    /// Draws one ball and returns it with an extra ball of the same color
    pub fn draw<R: Rng>(&mut self, rng: &mut R) {
        if rng.gen::<f64>() < self.fraction() {
            self.red += 1;
        }
        self.total += 1;
    }

    /// Runs `n_trials` draws, recording the martingale value after each
    ///
    /// # Returns
    /// Vector of length `n_trials + 1`; the first entry is the starting
    /// fraction
    pub fn martingale_path<R: Rng>(&mut self, rng: &mut R, n_trials: usize) -> Vec<f64> {
        let mut values = Vec::with_capacity(n_trials + 1);
        values.push(self.fraction());

        for _ in 0..n_trials {
            self.draw(rng);
            values.push(self.fraction());
        }

        values
    }

    /// Final martingale values of many independent runs, in parallel
    ///
    /// Each run starts from this urn's composition. For the classic
    /// 1-red/1-black urn the values are approximately Uniform(0, 1).
    pub fn final_values_parallel(&self, n_runs: usize, n_trials: usize) -> Vec<f64> {
        (0..n_runs)
            .into_par_iter()
            .map(|_| {
                let mut rng = rand::thread_rng();
                let mut urn = self.clone();
                for _ in 0..n_trials {
                    urn.draw(&mut rng);
                }
                urn.fraction()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_fraction() {
        let urn = PolyaUrn::new();
        assert_eq!(urn.fraction(), 0.5);
    }

    #[test]
    fn test_draw_adds_exactly_one_ball() {
        let mut urn = PolyaUrn::new();
        let mut rng = rand::thread_rng();

        for i in 0..100 {
            urn.draw(&mut rng);
            assert_eq!(urn.total, 3 + i);
            assert!(urn.red >= 1 && urn.red < urn.total);
        }
    }

    #[test]
    fn test_martingale_path_shape() {
        let mut urn = PolyaUrn::new();
        let mut rng = rand::thread_rng();

        let path = urn.martingale_path(&mut rng, 4000);

        assert_eq!(path.len(), 4001);
        assert_eq!(path[0], 0.5);
        assert!(path.iter().all(|&v| v > 0.0 && v < 1.0));
    }

    #[test]
    fn test_martingale_mean_is_preserved() {
        // E[final fraction] equals the starting fraction
        let urn = PolyaUrn::new();
        let finals = urn.final_values_parallel(2000, 500);

        let mean = finals.iter().sum::<f64>() / finals.len() as f64;

        // Var of Uniform(0,1) is 1/12, so the mean over 2000 runs has
        // SE ≈ 0.0065
        assert!(
            (mean - 0.5).abs() < 0.05,
            "Mean final fraction = {}, expected ≈ 0.5",
            mean
        );
    }

    #[test]
    fn test_uniform_limit_spread() {
        // For the 1-red/1-black urn the limit law is Uniform(0, 1);
        // check both halves get roughly equal mass
        let urn = PolyaUrn::new();
        let finals = urn.final_values_parallel(2000, 1000);

        let below_half = finals.iter().filter(|&&v| v < 0.5).count() as f64
            / finals.len() as f64;

        assert!(
            (below_half - 0.5).abs() < 0.1,
            "Fraction of runs below 1/2 = {}",
            below_half
        );
    }

    #[test]
    fn test_biased_start_shifts_mean() {
        let urn = PolyaUrn::with_composition(3, 4);
        let finals = urn.final_values_parallel(2000, 500);

        let mean = finals.iter().sum::<f64>() / finals.len() as f64;
        assert!(
            (mean - 0.75).abs() < 0.05,
            "Mean final fraction = {}, expected ≈ 0.75",
            mean
        );
    }

    #[test]
    #[should_panic(expected = "Urn needs at least one ball of each color")]
    fn test_single_color_urn_panics() {
        PolyaUrn::with_composition(2, 2);
    }
}
