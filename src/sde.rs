//! Stochastic Differential Equation (SDE) framework
//!
//! Provides the trait and solver for working with SDEs of the form:
//! dX_t = μ(t, X_t) dt + σ(t, X_t) dW_t

use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Trait representing a Stochastic Differential Equation
///
/// An SDE has the form: dX_t = μ(t, X_t) dt + σ(t, X_t) dW_t
/// where μ is the drift and σ is the diffusion coefficient.
pub trait SDE {
    /// The state type (e.g., f64 for 1D, [f64; N] for N-dimensional)
    type State: Clone;

    /// Computes the drift coefficient μ(t, x)
    ///
    /// # Arguments
    /// * `t` - Current time
    /// * `x` - Current state
    fn drift(&self, t: f64, x: &Self::State) -> Self::State;

    /// Computes the diffusion coefficient σ(t, x)
    ///
    /// # Arguments
    /// * `t` - Current time
    /// * `x` - Current state
    fn diffusion(&self, t: f64, x: &Self::State) -> Self::State;

    /// Returns the initial state X_0
    fn initial_state(&self) -> Self::State;
}

/// Euler-Maruyama solver for SDEs
///
/// The Euler-Maruyama method is the simplest numerical scheme for SDEs:
/// X_{n+1} = X_n + μ(t_n, X_n) * Δt + σ(t_n, X_n) * ΔW_n
///
/// It has strong convergence order 0.5 and weak convergence order 1.0.
pub struct EulerMaruyama<S: SDE<State = f64>> {
    /// The SDE to solve
    pub sde: S,
    /// Time step size
    pub dt: f64,
    /// Normal distribution for generating Brownian increments
    normal: Normal<f64>,
}

impl<S: SDE<State = f64>> EulerMaruyama<S> {
    /// Creates a new Euler-Maruyama solver
    ///
    /// # Arguments
    /// * `sde` - The SDE to solve
    /// * `dt` - Time step size
    pub fn new(sde: S, dt: f64) -> Self {
        Self {
            sde,
            dt,
            normal: Normal::new(0.0, 1.0).unwrap(),
        }
    }

    /// Performs one step of the Euler-Maruyama scheme
    ///
    /// # Arguments
    /// * `rng` - Random number generator
    /// * `t` - Current time
    /// * `x` - Current state
    ///
    /// # Returns
    /// New state after one time step
    pub fn step<R: Rng>(&self, rng: &mut R, t: f64, x: f64) -> f64 {
        let dw = self.dt.sqrt() * self.normal.sample(rng);
        self.step_with_increment(t, x, dw)
    }

    /// Performs one step given an externally supplied Brownian increment
    ///
    /// Used when the same increment sequence must drive several schemes,
    /// as in the Euler-vs-exact convergence study.
    pub fn step_with_increment(&self, t: f64, x: f64, dw: f64) -> f64 {
        let drift = self.sde.drift(t, &x);
        let diffusion = self.sde.diffusion(t, &x);

        x + drift * self.dt + diffusion * dw
    }

    /// Solves the SDE from t=0 to t=t_end
    ///
    /// # Arguments
    /// * `rng` - Random number generator
    /// * `t_end` - Final time
    ///
    /// # Returns
    /// Vector of (time, state) pairs
    pub fn solve<R: Rng>(&self, rng: &mut R, t_end: f64) -> Vec<(f64, f64)> {
        let n_steps = (t_end / self.dt).ceil() as usize;
        let mut trajectory = Vec::with_capacity(n_steps + 1);

        let mut t = 0.0;
        let mut x = self.sde.initial_state();
        trajectory.push((t, x));

        for _ in 0..n_steps {
            x = self.step(rng, t, x);
            t += self.dt;
            trajectory.push((t, x));
        }

        trajectory
    }

    /// Solves the SDE and returns only the final value
    ///
    /// More memory-efficient when only the terminal value is needed.
    pub fn solve_terminal<R: Rng>(&self, rng: &mut R, t_end: f64) -> f64 {
        let n_steps = (t_end / self.dt).ceil() as usize;

        let mut t = 0.0;
        let mut x = self.sde.initial_state();

        for _ in 0..n_steps {
            x = self.step(rng, t, x);
            t += self.dt;
        }

        x
    }
}
