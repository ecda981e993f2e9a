//! Exploration of the processes in this crate
//!
//! Run with: cargo run --release

use stochastic_lab::{
    black_scholes::{black_scholes_call, lognormal_mean, lognormal_pdf},
    ensemble::{
        fraction_below, percentile_band, pointwise_median, EnsembleSummary, Histogram,
        SummaryStatistics,
    },
    monte_carlo::{call_payoff, monte_carlo_basic, monte_carlo_parallel},
    BrownianMotion, ConvergenceStudy, GeometricBrownianMotion, LognormalMarket, PolyaUrn,
};

fn main() {
    println!("=== Stochastic Process Explorations ===\n");

    example_brownian_motion();
    example_gbm();
    example_convergence();
    example_polya_urn();
    example_black_scholes();
    example_monte_carlo_pricing();
}

fn example_brownian_motion() {
    println!("--- Standard Brownian Motion ---");

    let dt = 1e-2;
    let t_end = 1.0;
    let n_steps = (t_end / dt) as usize;
    let bm = BrownianMotion::new(0.0);

    let mut rng = rand::thread_rng();
    let path = bm.generate_path(&mut rng, n_steps, dt);
    println!("Single run: {} steps over T = {:.1}", n_steps, t_end);
    println!("Final value B_T = {:.4}", path.last().unwrap());

    let n_runs = 1000;
    let paths = bm.generate_paths_parallel(n_runs, n_steps, dt);
    let summary = EnsembleSummary::from_paths(&paths);

    println!("\nMean and σ over {} runs vs analytical:", n_runs);
    println!("     t     mean   (exp.)      σ   (exp.)");
    for &t in &[0.25, 0.5, 1.0] {
        let i = (t / dt) as usize;
        println!(
            "  {:.2}  {:+.4}  ({:+.1})  {:.4}  ({:.4})",
            t,
            summary.mean[i],
            bm.mean_analytical(t),
            summary.std_dev[i],
            bm.std_dev_analytical(t)
        );
    }

    let threshold = 2.0;
    let empirical = fraction_below(&paths, threshold);
    println!("\nP(B_t < {}) over {} runs vs analytical:", threshold, n_runs);
    for &t in &[0.25, 0.5, 1.0] {
        let i = (t / dt) as usize;
        println!(
            "  t = {:.2}: empirical {:.4}, analytical {:.4}",
            t,
            empirical[i],
            bm.probability_below_analytical(threshold, t)
        );
    }
    println!();
}

fn example_gbm() {
    println!("--- Geometric Brownian Motion ---");

    let gbm = GeometricBrownianMotion::new(
        1.0,  // Initial value
        0.1,  // 10% drift
        0.2,  // 20% volatility
    );
    let t_end = 40.0;
    let dt = 1e-2;
    let n_steps = (t_end / dt) as usize;

    let mut rng = rand::thread_rng();
    let single = gbm.euler_path(&mut rng, n_steps, dt);
    println!("Single Euler run over T = {:.0}: X_T = {:.4}", t_end, single.last().unwrap());

    let n_runs = 1000;
    let paths = gbm.generate_paths_parallel(n_runs, n_steps, dt);
    let median = pointwise_median(&paths);
    let level = 0.8;
    let (lower, upper) = percentile_band(&paths, level);

    println!("\nMedian and 80% band over {} runs vs analytical:", n_runs);
    println!("     t      median  (exp.)       10%-90% band        (exp.)");
    for &t in &[10.0, 20.0, 40.0] {
        let i = (t / dt) as usize;
        let (lo_a, up_a) = gbm.confidence_interval_analytical(t, level);
        println!(
            "  {:>4.0}  {:>9.4}  ({:.4})  [{:>8.4}, {:>9.4}]  [{:.4}, {:.4}]",
            t,
            median[i],
            gbm.median_analytical(t),
            lower[i],
            upper[i],
            lo_a,
            up_a
        );
    }

    // The analytical median as threshold puts the probability at exactly 1/2
    let threshold = gbm.median_analytical(t_end);
    let terminals: Vec<f64> = paths.iter().map(|p| *p.last().unwrap()).collect();
    let stats = SummaryStatistics::from_values(&terminals);
    println!(
        "\nTerminal values: mean {:.2}, median {:.2}, range [{:.2}, {:.2}]",
        stats.mean, stats.median, stats.min, stats.max
    );
    let numerical = terminals.iter().filter(|&&x| x < threshold).count() as f64
        / terminals.len() as f64;
    let analytical = gbm.probability_below_analytical(threshold, t_end);
    println!("\nNumerical  P(X_T < {:.4}): {:.4}", threshold, numerical);
    println!("Analytical P(X_T < {:.4}): {:.4}", threshold, analytical);
    println!();
}

fn example_convergence() {
    println!("--- Euler vs Exact Solution (shared increments) ---");

    let gbm = GeometricBrownianMotion::new(1.0, 1.0, 2.0);
    let n_runs = 20;

    println!("μ = 1, σ = 2, T = 1, {} seeded runs per dt:", n_runs);
    for &dt in &[1e-2, 1e-3, 1e-4] {
        let study = ConvergenceStudy::new(gbm.clone(), dt, 1.0);
        println!(
            "  dt = {:<6}: mean terminal |euler - exact| = {:.6}",
            dt,
            study.mean_terminal_error(n_runs)
        );
    }
    println!();
}

fn example_polya_urn() {
    println!("--- Polya's Urn Martingale ---");

    let n_trials = 4000;
    let mut rng = rand::thread_rng();
    let path = PolyaUrn::new().martingale_path(&mut rng, n_trials);

    println!("One run of {} trials:", n_trials);
    println!("  start fraction: {:.4}", path[0]);
    println!("  final fraction: {:.4}", path.last().unwrap());

    let n_runs = 4000;
    let finals = PolyaUrn::new().final_values_parallel(n_runs, n_trials);
    let hist = Histogram::new(&finals, 10);

    println!("\nDensity of final fractions over {} runs (uniform limit ≈ 1.0):", n_runs);
    for (center, density) in hist.bin_centers().iter().zip(hist.density().iter()) {
        println!("  {:.2}: {:.3}", center, density);
    }
    println!();
}

fn example_black_scholes() {
    println!("--- Lognormal Terminal Law and Option Prices ---");

    let market = LognormalMarket::new(
        5.0, // Spot
        1.0, // Total volatility
        0.0, // Risk-free rate
    );
    let mu = market.log_mean();

    println!("Spot = 5, σ = 1, r = 0, so ln X_T ~ N({:.4}, 1)", mu);
    println!("Distribution markers (value, density):");
    let mean = lognormal_mean(mu, market.sigma);
    let plus_sigma = (mu + market.sigma).exp();
    let minus_sigma = (mu - market.sigma).exp();
    println!("  E[X_T]   = {:.4}  ({:.4})", mean, lognormal_pdf(mean, mu, market.sigma));
    println!("  +1σ mark = {:.4}  ({:.4})", plus_sigma, lognormal_pdf(plus_sigma, mu, market.sigma));
    println!("  -1σ mark = {:.4}  ({:.4})", minus_sigma, lognormal_pdf(minus_sigma, mu, market.sigma));

    println!("\nOption value / spot by strike:");
    println!("  strike     call      put");
    for &strike in &[1.0, 2.5, 5.0, 7.5, 10.0, 15.0] {
        println!(
            "  {:>6.1}   {:.4}   {:.4}",
            strike,
            market.call_price_at_strike(strike) / market.spot,
            market.put_price_at_strike(strike) / market.spot
        );
    }
    println!();
}

fn example_monte_carlo_pricing() {
    println!("--- Monte Carlo vs Black-Scholes ---");

    let s0 = 100.0;
    let k = 100.0; // ATM strike
    let r = 0.05;  // Risk-free rate
    let sigma = 0.2;
    let t = 1.0;   // 1 year

    // Risk-neutral measure: drift is the risk-free rate
    let gbm = GeometricBrownianMotion::new(s0, r, sigma);
    let discount = (-r * t).exp();

    println!("European call: S0 = $100, K = $100, r = 5%, σ = 20%, T = 1 year");
    println!("\nBlack-Scholes price: ${:.4}", black_scholes_call(s0, k, r, sigma, t));

    let n_paths = 100_000;
    let mut rng = rand::thread_rng();

    let basic = monte_carlo_basic(&gbm, call_payoff(k), t, n_paths, &mut rng);
    println!(
        "MC basic    ({} paths): ${:.4} ± {:.4}",
        n_paths,
        basic.estimate * discount,
        basic.std_error * discount
    );

    let parallel = monte_carlo_parallel(&gbm, call_payoff(k), t, n_paths);
    println!(
        "MC parallel ({} paths): ${:.4} ± {:.4}",
        n_paths,
        parallel.estimate * discount,
        parallel.std_error * discount
    );
}
