//! # Stochastic Process Explorations
//!
//! This crate simulates classic stochastic processes and checks the
//! empirical summaries against their closed-form counterparts.
//!
//! ## Modules
//!
//! - [`brownian`] - Brownian motion (Wiener process) generation
//! - [`sde`] - Stochastic Differential Equations framework
//! - [`gbm`] - Geometric Brownian Motion
//! - [`convergence`] - Euler discretization error vs the exact GBM solution
//! - [`polya`] - Polya's urn martingale
//! - [`black_scholes`] - Lognormal terminal law and option pricing
//! - [`monte_carlo`] - Monte Carlo estimation of terminal expectations
//! - [`ensemble`] - Cross-run aggregation (bands, histograms, summaries)
//!
//! ## Example
//!
//! ```rust
//! use stochastic_lab::GeometricBrownianMotion;
//!
//! let gbm = GeometricBrownianMotion::new(1.0, 0.1, 0.2);
//! let mut rng = rand::thread_rng();
//!
//! // Generate a single path
//! let path = gbm.generate_path(&mut rng, 252, 1.0 / 252.0);
//! println!("Final value: {:.4}", path.last().unwrap());
//! ```

pub mod black_scholes;
pub mod brownian;
pub mod convergence;
pub mod ensemble;
pub mod gbm;
pub mod monte_carlo;
pub mod polya;
pub mod sde;

pub use black_scholes::LognormalMarket;
pub use brownian::BrownianMotion;
pub use convergence::ConvergenceStudy;
pub use gbm::GeometricBrownianMotion;
pub use polya::PolyaUrn;
pub use sde::{EulerMaruyama, SDE};
