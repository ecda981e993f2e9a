//! Black-Scholes pricing under the lognormal terminal law
//!
//! Under the Black-Scholes model the underlying follows GBM, so the
//! terminal value is lognormal: ln X_T ~ N(mu, σ²) with
//! mu = ln(spot) + r - σ²/2 over a unit horizon.
//!
//! The European call value follows from the risk-neutral expectation
//! E[(X_T - K)^+] and has the closed form
//!
//! C = spot·Φ(d₁) - K·Φ(d₂),  d₂ = (mu - ln K)/σ,  d₁ = d₂ + σ
//!
//! The put comes from put-call parity: P = C - spot + K·e^(-r).
//!
//! The standard (s0, k, r, σ, t) textbook form is also provided as the
//! reference the Monte Carlo estimates are checked against.

use statrs::distribution::{Continuous, ContinuousCDF, LogNormal, Normal};

/// Standard normal CDF Φ(x)
pub fn norm_cdf(x: f64) -> f64 {
    let normal = Normal::new(0.0, 1.0).unwrap();
    normal.cdf(x)
}

/// Standard normal quantile Φ⁻¹(p)
///
/// # Panics
/// Panics unless 0 < p < 1
pub fn norm_quantile(p: f64) -> f64 {
    assert!(p > 0.0 && p < 1.0, "Quantile level must be in (0, 1), got {}", p);
    let normal = Normal::new(0.0, 1.0).unwrap();
    normal.inverse_cdf(p)
}

/// Density of X where ln X ~ N(mu, σ²)
///
/// # Arguments
/// * `x` - Evaluation point (must be positive)
/// * `mu` - Mean of ln X
/// * `sigma` - Standard deviation of ln X
pub fn lognormal_pdf(x: f64, mu: f64, sigma: f64) -> f64 {
    let dist = LogNormal::new(mu, sigma).expect("Invalid lognormal parameters");
    dist.pdf(x)
}

/// Mean of the lognormal: E[X] = exp(mu + σ²/2)
pub fn lognormal_mean(mu: f64, sigma: f64) -> f64 {
    (mu + 0.5 * sigma * sigma).exp()
}

/// A market where the underlying's terminal value is lognormal
///
/// `sigma` is the total volatility over the (unit) horizon and `rate`
/// the risk-free rate over the same horizon. The log-space mean then
/// is ln(spot) + rate - σ²/2, which makes the spot the undiscounted
/// expectation of the terminal value when rate = 0.
#[derive(Debug, Clone)]
pub struct LognormalMarket {
    /// Current value of the underlying
    pub spot: f64,
    /// Total volatility of ln X_T
    pub sigma: f64,
    /// Risk-free rate over the horizon
    pub rate: f64,
}

impl LognormalMarket {
    /// # Panics
    /// Panics if spot <= 0 or sigma <= 0
    pub fn new(spot: f64, sigma: f64, rate: f64) -> Self {
        assert!(spot > 0.0, "Spot must be positive, got {}", spot);
        assert!(sigma > 0.0, "Volatility must be positive, got {}", sigma);
        Self { spot, sigma, rate }
    }

    /// Mean of ln X_T: ln(spot) + rate - σ²/2
    pub fn log_mean(&self) -> f64 {
        self.spot.ln() + self.rate - 0.5 * self.sigma * self.sigma
    }

    /// European call value at the given strike
    ///
    /// # Panics
    /// Panics if strike <= 0 (a log is taken)
    pub fn call_price_at_strike(&self, strike: f64) -> f64 {
        assert!(strike > 0.0, "Strike must be positive, got {}", strike);

        let d2 = (self.log_mean() - strike.ln()) / self.sigma;
        let d1 = d2 + self.sigma;

        self.spot * norm_cdf(d1) - strike * norm_cdf(d2)
    }

    /// European put value at the given strike, via put-call parity
    ///
    /// P = C - spot + strike·e^(-rate)
    pub fn put_price_at_strike(&self, strike: f64) -> f64 {
        self.call_price_at_strike(strike) - self.spot + strike * (-self.rate).exp()
    }

    /// Call values over a grid of strikes
    pub fn call_price_curve(&self, strikes: &[f64]) -> Vec<f64> {
        strikes.iter().map(|&k| self.call_price_at_strike(k)).collect()
    }

    /// Put values over a grid of strikes
    pub fn put_price_curve(&self, strikes: &[f64]) -> Vec<f64> {
        strikes.iter().map(|&k| self.put_price_at_strike(k)).collect()
    }
}

/// Black-Scholes formula for a European call, standard parameterization
///
/// d₁ = [ln(s0/k) + (r + σ²/2)t] / (σ√t),  d₂ = d₁ - σ√t
/// C = s0·Φ(d₁) - k·e^(-rt)·Φ(d₂)
pub fn black_scholes_call(s0: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let d1 = ((s0 / k).ln() + (r + 0.5 * sigma * sigma) * t) / (sigma * t.sqrt());
    let d2 = d1 - sigma * t.sqrt();

    s0 * norm_cdf(d1) - k * (-r * t).exp() * norm_cdf(d2)
}

/// Black-Scholes formula for a European put
///
/// P = k·e^(-rt)·Φ(-d₂) - s0·Φ(-d₁)
pub fn black_scholes_put(s0: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let d1 = ((s0 / k).ln() + (r + 0.5 * sigma * sigma) * t) / (sigma * t.sqrt());
    let d2 = d1 - sigma * t.sqrt();

    k * (-r * t).exp() * norm_cdf(-d2) - s0 * norm_cdf(-d1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_cdf_symmetry() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-12);
        assert!((norm_cdf(1.96) - 0.975).abs() < 1e-3);
        assert!((norm_cdf(-1.0) + norm_cdf(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_norm_quantile_inverts_cdf() {
        for p in [0.05, 0.25, 0.5, 0.9, 0.975] {
            let x = norm_quantile(p);
            assert!(
                (norm_cdf(x) - p).abs() < 1e-9,
                "Φ(Φ⁻¹({})) = {}",
                p,
                norm_cdf(x)
            );
        }
    }

    #[test]
    fn test_lognormal_pdf_integrates_to_one() {
        let mu = 5.0_f64.ln() - 0.5; // spot 5, sigma 1, rate 0
        let sigma = 1.0;

        // Trapezoid rule over (0, 250]; the mass beyond is ~1e-5
        let n = 20_000;
        let upper = 250.0;
        let h = upper / n as f64;
        let mut integral = 0.0;
        for i in 1..n {
            integral += lognormal_pdf(i as f64 * h, mu, sigma) * h;
        }

        assert!(
            (integral - 1.0).abs() < 0.01,
            "∫pdf = {}, expected ≈ 1",
            integral
        );
    }

    #[test]
    fn test_lognormal_mean() {
        // E[X] = exp(mu + σ²/2)
        let mean = lognormal_mean(1.0, 0.5);
        assert!((mean - (1.125_f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_black_scholes_call_known_value() {
        // ATM 1-year call with 5% rate and 20% vol is worth about 10.45
        let call = black_scholes_call(100.0, 100.0, 0.05, 0.2, 1.0);
        assert!(
            (call - 10.45).abs() < 0.01,
            "Black-Scholes call price: {}, expected ~10.45",
            call
        );
    }

    #[test]
    fn test_put_call_parity() {
        let (s0, k, r, sigma, t) = (100.0, 95.0, 0.05, 0.2, 1.0);
        let call = black_scholes_call(s0, k, r, sigma, t);
        let put = black_scholes_put(s0, k, r, sigma, t);

        // C - P = S - K e^(-rt)
        let parity_gap = call - put - (s0 - k * (-r * t).exp());
        assert!(parity_gap.abs() < 1e-9, "Parity gap = {}", parity_gap);
    }

    #[test]
    fn test_strike_form_matches_standard_at_zero_rate() {
        // With rate 0 and a unit horizon the two parameterizations coincide
        let market = LognormalMarket::new(5.0, 1.0, 0.0);

        for k in [0.5, 2.0, 5.0, 10.0, 20.0] {
            let strike_form = market.call_price_at_strike(k);
            let standard = black_scholes_call(5.0, k, 0.0, 1.0, 1.0);
            assert!(
                (strike_form - standard).abs() < 1e-9,
                "k = {}: {} vs {}",
                k,
                strike_form,
                standard
            );

            let put_strike_form = market.put_price_at_strike(k);
            let put_standard = black_scholes_put(5.0, k, 0.0, 1.0, 1.0);
            assert!((put_strike_form - put_standard).abs() < 1e-9);
        }
    }

    #[test]
    fn test_call_curve_monotone_in_strike() {
        let market = LognormalMarket::new(5.0, 1.0, 0.0);
        let strikes: Vec<f64> = (1..100).map(|i| i as f64 * 0.25).collect();
        let calls = market.call_price_curve(&strikes);
        let puts = market.put_price_curve(&strikes);

        assert!(calls.windows(2).all(|w| w[1] <= w[0]), "Call value falls with strike");
        assert!(puts.windows(2).all(|w| w[1] >= w[0]), "Put value rises with strike");

        // Deep in the money the call is worth nearly the whole spot
        assert!((calls[0] - (market.spot - strikes[0])).abs() < 0.05);
        // Far out of the money it is nearly worthless
        assert!(*calls.last().unwrap() < 0.5);
    }

    #[test]
    #[should_panic(expected = "Strike must be positive")]
    fn test_zero_strike_panics() {
        LognormalMarket::new(5.0, 1.0, 0.0).call_price_at_strike(0.0);
    }
}
