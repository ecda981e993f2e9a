//! Cross-run aggregation of simulated paths
//!
//! Every exploration in this crate repeats a simulation many times and
//! summarizes the runs pointwise: mean and σ band for Brownian motion,
//! median and percentile band for GBM, a density histogram for the urn.
//! All paths in an ensemble must share one time grid.

/// Pointwise mean and standard deviation across an ensemble of paths
#[derive(Debug, Clone)]
pub struct EnsembleSummary {
    /// Mean across runs at each grid point
    pub mean: Vec<f64>,
    /// Sample standard deviation (n-1) across runs at each grid point
    pub std_dev: Vec<f64>,
}

impl EnsembleSummary {
    /// Aggregates an ensemble pointwise
    ///
    /// # Panics
    /// Panics if the ensemble is empty or the paths have unequal lengths
    pub fn from_paths(paths: &[Vec<f64>]) -> Self {
        let n_points = check_shape(paths);
        let n_runs = paths.len() as f64;

        let mut mean = vec![0.0; n_points];
        for path in paths {
            for (m, &x) in mean.iter_mut().zip(path.iter()) {
                *m += x;
            }
        }
        for m in &mut mean {
            *m /= n_runs;
        }

        let mut std_dev = vec![0.0; n_points];
        if paths.len() > 1 {
            for path in paths {
                for ((s, &m), &x) in std_dev.iter_mut().zip(mean.iter()).zip(path.iter()) {
                    *s += (x - m) * (x - m);
                }
            }
            for s in &mut std_dev {
                *s = (*s / (n_runs - 1.0)).sqrt();
            }
        }

        Self { mean, std_dev }
    }
}

/// Percentile of a sample, linear interpolation between order statistics
///
/// `q` is in percent (0..=100), matching the convention of the usual
/// scientific tooling.
///
/// # Panics
/// Panics if the sample is empty or q is outside [0, 100]
pub fn percentile(values: &[f64], q: f64) -> f64 {
    assert!(!values.is_empty(), "Percentile of an empty sample");
    assert!((0.0..=100.0).contains(&q), "Percentile level must be in [0, 100], got {}", q);

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let frac = rank - lo as f64;

    if lo + 1 < sorted.len() {
        sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
    } else {
        sorted[lo]
    }
}

/// Pointwise percentile across an ensemble
pub fn pointwise_percentile(paths: &[Vec<f64>], q: f64) -> Vec<f64> {
    let n_points = check_shape(paths);

    (0..n_points)
        .map(|i| {
            let cross_section: Vec<f64> = paths.iter().map(|p| p[i]).collect();
            percentile(&cross_section, q)
        })
        .collect()
}

/// Pointwise median across an ensemble
pub fn pointwise_median(paths: &[Vec<f64>]) -> Vec<f64> {
    pointwise_percentile(paths, 50.0)
}

/// Pointwise central percentile band
///
/// For level p the band runs from the (1-p)/2 to the (1+p)/2 percentile,
/// so `percentile_band(paths, 0.8)` is the 10th-90th percentile band.
///
/// # Panics
/// Panics unless 0 < level < 1
pub fn percentile_band(paths: &[Vec<f64>], level: f64) -> (Vec<f64>, Vec<f64>) {
    assert!(
        level > 0.0 && level < 1.0,
        "Band level must be in (0, 1), got {}",
        level
    );

    let lower = pointwise_percentile(paths, (1.0 - level) / 2.0 * 100.0);
    let upper = pointwise_percentile(paths, (1.0 + level) / 2.0 * 100.0);
    (lower, upper)
}

/// Fraction of runs below a threshold at each grid point
///
/// The empirical estimate of P(X_t < threshold) as a function of time.
pub fn fraction_below(paths: &[Vec<f64>], threshold: f64) -> Vec<f64> {
    let n_points = check_shape(paths);
    let n_runs = paths.len() as f64;

    (0..n_points)
        .map(|i| paths.iter().filter(|p| p[i] < threshold).count() as f64 / n_runs)
        .collect()
}

fn check_shape(paths: &[Vec<f64>]) -> usize {
    assert!(!paths.is_empty(), "Ensemble is empty");
    let n_points = paths[0].len();
    assert!(
        paths.iter().all(|p| p.len() == n_points),
        "Paths in an ensemble must share one time grid"
    );
    n_points
}

/// Equal-width histogram of a sample
#[derive(Debug, Clone)]
pub struct Histogram {
    /// Lower edge of the first bin
    pub min: f64,
    /// Upper edge of the last bin
    pub max: f64,
    /// Per-bin counts
    pub counts: Vec<usize>,
    n_samples: usize,
}

impl Histogram {
    /// Bins a sample into `n_bins` equal-width bins spanning its range
    ///
    /// # Panics
    /// Panics if the sample is empty or n_bins is 0
    pub fn new(values: &[f64], n_bins: usize) -> Self {
        assert!(!values.is_empty(), "Histogram of an empty sample");
        assert!(n_bins > 0, "Histogram needs at least one bin");

        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        // Degenerate sample: one bin catches everything
        let span = if max > min { max - min } else { 1.0 };

        let mut counts = vec![0usize; n_bins];
        for &v in values {
            let idx = (((v - min) / span) * n_bins as f64) as usize;
            counts[idx.min(n_bins - 1)] += 1;
        }

        Self {
            min,
            max,
            counts,
            n_samples: values.len(),
        }
    }

    /// Width of each bin
    pub fn bin_width(&self) -> f64 {
        let span = if self.max > self.min { self.max - self.min } else { 1.0 };
        span / self.counts.len() as f64
    }

    /// Center of each bin
    pub fn bin_centers(&self) -> Vec<f64> {
        let width = self.bin_width();
        (0..self.counts.len())
            .map(|i| self.min + (i as f64 + 0.5) * width)
            .collect()
    }

    /// Density-normalized bin heights (sum of height * width is 1)
    pub fn density(&self) -> Vec<f64> {
        let norm = self.n_samples as f64 * self.bin_width();
        self.counts.iter().map(|&c| c as f64 / norm).collect()
    }
}

/// Summary of a terminal-value sample
#[derive(Debug, Clone)]
pub struct SummaryStatistics {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl SummaryStatistics {
    /// Computes statistics from a sample of values
    ///
    /// # Panics
    /// Panics if the sample is empty
    pub fn from_values(values: &[f64]) -> Self {
        assert!(!values.is_empty(), "Summary of an empty sample");

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;

        let std_dev = if values.len() > 1 {
            (values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
        } else {
            0.0
        };

        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let median = percentile(values, 50.0);

        Self { mean, std_dev, min, max, median }
    }
}
