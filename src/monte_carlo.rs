use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{PercolationError, Result};
use crate::percolation::Percolation;

// z-score for a two-sided 95% interval
const CONFIDENCE_95: f64 = 1.96;

/// Builds a reproducible generator from a 64-bit seed.
pub fn seeded_rng(seed: u64) -> StdRng {
    let bytes = seed.to_le_bytes();
    let mut full = [0u8; 32];
    for (i, b) in full.iter_mut().enumerate() {
        *b = bytes[i % bytes.len()];
    }
    StdRng::from_seed(full)
}

// each trial gets its own generator so trials never share state
fn trial_rng<R: Rng>(master: &mut R) -> StdRng {
    let mut seed = [0u8; 32];
    master.fill_bytes(&mut seed);
    StdRng::from_seed(seed)
}

fn check_args(n: usize, trials: usize) -> Result<()> {
    if n == 0 {
        return Err(PercolationError::invalid_argument("grid size must be greater than 0"));
    }
    if trials == 0 {
        return Err(PercolationError::invalid_argument("number of trials must be greater than 0"));
    }
    Ok(())
}

/// Opens uniformly random sites of a fresh n x n model until it percolates
/// and returns how many sites ended up open.
pub fn run_trial<R: Rng>(n: usize, rng: &mut R) -> Result<usize> {
    let mut model = Percolation::new(n)?;
    let mut picks = 0usize;
    while !model.percolates() {
        let row = rng.gen_range(0, n);
        let col = rng.gen_range(0, n);
        model.open(row as isize, col as isize)?;
        picks += 1;
    }
    trace!("trial percolated after {} picks", picks);
    Ok(model.open_site_count())
}

/// Mean open-site fraction at percolation over `trials` independent runs.
pub fn run_monte_carlo<R: Rng>(n: usize, trials: usize, rng: &mut R) -> Result<f64> {
    Ok(MonteCarlo::run(n, trials, rng)?.mean())
}

#[derive(Debug, Clone)]
pub struct ThresholdStats {
    n: usize,
    thresholds: Vec<f64>,
    mean: f64,
}

impl ThresholdStats {
    pub fn grid_size(&self) -> usize {
        self.n
    }

    pub fn trials(&self) -> usize {
        self.thresholds.len()
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation; NaN for a single trial.
    pub fn stddev(&self) -> f64 {
        let t = self.trials();
        if t < 2 {
            return ::std::f64::NAN;
        }
        let ss: f64 = self.thresholds.iter().map(|x| (x - self.mean).powi(2)).sum();
        (ss / (t - 1) as f64).sqrt()
    }

    fn half_width(&self) -> f64 {
        CONFIDENCE_95 * self.stddev() / (self.trials() as f64).sqrt()
    }

    pub fn confidence_lo(&self) -> f64 {
        self.mean - self.half_width()
    }

    pub fn confidence_hi(&self) -> f64 {
        self.mean + self.half_width()
    }
}

impl fmt::Display for ThresholdStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Percolation threshold estimate: {}", self.mean())?;
        writeln!(f, "stddev                        : {}", self.stddev())?;
        writeln!(f, "95% confidence interval       : [{}, {}]", self.confidence_lo(), self.confidence_hi())
    }
}

pub struct MonteCarlo;

impl MonteCarlo {
    pub fn run<R: Rng>(n: usize, trials: usize, rng: &mut R) -> Result<ThresholdStats> {
        check_args(n, trials)?;
        info!("running {} trials on a {}x{} grid", trials, n, n);

        let sites = (n * n) as f64;
        let mut total_open = 0usize;
        let mut thresholds = Vec::with_capacity(trials);
        for t in 0..trials {
            let mut trial = trial_rng(rng);
            let open = run_trial(n, &mut trial)?;
            debug!("trial {}: {} open sites ({:.4})", t, open, open as f64 / sites);
            total_open += open;
            thresholds.push(open as f64 / sites);
        }

        let mean = total_open as f64 / (trials as f64 * sites);
        info!("threshold estimate {:.6} over {} trials", mean, trials);
        Ok(ThresholdStats { n, thresholds, mean })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_trial_is_a_fraction() {
        let mut rng = seeded_rng(7);
        let p = run_monte_carlo(5, 1, &mut rng).unwrap();
        assert!(p > 0.0 && p < 1.0, "got {}", p);
    }

    #[test]
    fn zero_trials_or_size_is_invalid() {
        let mut rng = seeded_rng(1);
        match run_monte_carlo(5, 0, &mut rng) {
            Err(PercolationError::InvalidArgument { .. }) => {}
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
        match run_monte_carlo(0, 5, &mut rng) {
            Err(PercolationError::InvalidArgument { .. }) => {}
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn one_by_one_grid_needs_one_site() {
        let mut rng = seeded_rng(3);
        assert_eq!(run_trial(1, &mut rng).unwrap(), 1);
        assert_eq!(run_monte_carlo(1, 10, &mut rng).unwrap(), 1.0);
    }

    #[test]
    fn trial_needs_at_least_a_column() {
        let mut rng = seeded_rng(11);
        for _ in 0..20 {
            let open = run_trial(6, &mut rng).unwrap();
            assert!(open >= 6 && open <= 36);
        }
    }

    #[test]
    fn same_seed_same_estimate() {
        let a = run_monte_carlo(10, 25, &mut seeded_rng(42)).unwrap();
        let b = run_monte_carlo(10, 25, &mut seeded_rng(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn stats_agree_with_thresholds() {
        let stats = MonteCarlo::run(8, 50, &mut seeded_rng(5)).unwrap();
        assert_eq!(stats.trials(), 50);
        assert_eq!(stats.grid_size(), 8);
        let mean: f64 = stats.thresholds().iter().sum::<f64>() / 50.0;
        assert!((mean - stats.mean()).abs() < 1e-12);
        assert!(stats.stddev() > 0.0);
        assert!(stats.confidence_lo() < stats.mean());
        assert!(stats.confidence_hi() > stats.mean());
    }

    #[test]
    fn report_lists_estimate_then_spread() {
        let stats = ThresholdStats { n: 2, thresholds: vec![0.5, 0.75], mean: 0.625 };
        let report = stats.to_string();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Percolation threshold estimate: 0.625");
        assert!(lines[1].starts_with("stddev"));
        assert!(lines[2].starts_with("95% confidence interval       : [0."));
    }

    #[test]
    fn single_trial_has_undefined_spread() {
        let stats = MonteCarlo::run(4, 1, &mut seeded_rng(9)).unwrap();
        assert!(stats.stddev().is_nan());
    }
}
