//! Binary split oracles.
//!
//! The engine hands an oracle one similarity value per instance and gets
//! back a two-valued side assignment of equal length. The default oracle
//! is a two-component one-dimensional Gaussian mixture fit by EM, kept
//! deliberately under-converged (few iterations, coarse tolerance) so the
//! cost stays bounded over many recursive calls. Exact mixture numerics
//! are not part of the contract; any cheap two-cluster partitioner that
//! handles degenerate input qualifies, and [`MidpointSplit`] provides a
//! deterministic one for tests.

use crate::error::{Error, Result};
use ndarray::Array2;
use rand::prelude::*;
use rand_distr::Normal;

/// A two-component clustering primitive over scalar values.
pub trait SplitOracle {
    /// Assign each value to side 0 or side 1.
    ///
    /// Returns one side per input value, in order. Implementations must
    /// accept all-identical values without failing; callers must supply at
    /// least two values.
    fn split(&self, values: &[f64]) -> Result<Vec<usize>>;
}

/// Two-component 1-D Gaussian mixture split, fit with a small EM budget.
#[derive(Debug, Clone)]
pub struct GmmSplit {
    /// Maximum EM iterations.
    max_iter: usize,
    /// Log-likelihood convergence tolerance.
    tol: f64,
    /// Random seed.
    seed: Option<u64>,
    /// Variance floor.
    reg_var: f64,
}

impl GmmSplit {
    /// Create a split oracle with the default under-converged budget
    /// (10 iterations, tolerance 1.0).
    pub fn new() -> Self {
        Self {
            max_iter: 10,
            tol: 1.0,
            seed: None,
            reg_var: 1e-6,
        }
    }

    /// Set maximum EM iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Log-density of `x` under a 1-D Gaussian.
    fn log_gaussian(x: f64, mean: f64, var: f64) -> f64 {
        let diff = x - mean;
        -0.5 * (2.0 * std::f64::consts::PI).ln() - 0.5 * var.ln() - 0.5 * diff * diff / var
    }

    /// Log-sum-exp for numerical stability.
    fn logsumexp(a: f64, b: f64) -> f64 {
        let max = a.max(b);
        if max.is_infinite() {
            return max;
        }
        max + ((a - max).exp() + (b - max).exp()).ln()
    }
}

impl Default for GmmSplit {
    fn default() -> Self {
        Self::new()
    }
}

impl SplitOracle for GmmSplit {
    fn split(&self, values: &[f64]) -> Result<Vec<usize>> {
        if values.is_empty() {
            return Err(Error::EmptyInput);
        }
        if values.len() < 2 {
            return Err(Error::TooFewInstances {
                found: values.len(),
            });
        }

        let n = values.len();

        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };
        let jitter = Normal::new(0.0, 1e-3).map_err(|e| Error::Other(e.to_string()))?;

        // Initialize component means at the value range extremes, jittered
        // so they stay distinct even when all values coincide.
        let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mut means = [lo + rng.sample(jitter), hi + rng.sample(jitter)];
        let mut vars = [1.0f64; 2];
        let mut weights = [0.5f64; 2];

        let mut resp = Array2::<f64>::zeros((n, 2));
        let mut prev_ll = f64::NEG_INFINITY;

        for _iter in 0..self.max_iter.max(1) {
            // E-step
            let mut ll = 0.0;
            for (i, &x) in values.iter().enumerate() {
                let log_probs = [
                    weights[0].ln() + Self::log_gaussian(x, means[0], vars[0]),
                    weights[1].ln() + Self::log_gaussian(x, means[1], vars[1]),
                ];
                let log_sum = Self::logsumexp(log_probs[0], log_probs[1]);
                ll += log_sum;
                resp[[i, 0]] = (log_probs[0] - log_sum).exp();
                resp[[i, 1]] = (log_probs[1] - log_sum).exp();
            }

            // M-step
            for c in 0..2 {
                let resp_sum: f64 = resp.column(c).sum();
                if resp_sum > 1e-10 {
                    weights[c] = resp_sum / n as f64;
                    let mean = values
                        .iter()
                        .enumerate()
                        .map(|(i, &x)| resp[[i, c]] * x)
                        .sum::<f64>()
                        / resp_sum;
                    let var = values
                        .iter()
                        .enumerate()
                        .map(|(i, &x)| {
                            let diff = x - mean;
                            resp[[i, c]] * diff * diff
                        })
                        .sum::<f64>()
                        / resp_sum;
                    means[c] = mean;
                    vars[c] = var.max(self.reg_var);
                }
            }

            if (ll - prev_ll).abs() < self.tol {
                break;
            }
            prev_ll = ll;
        }

        // Hard assignment: argmax responsibility
        Ok((0..n)
            .map(|i| usize::from(resp[[i, 1]] > resp[[i, 0]]))
            .collect())
    }
}

/// Deterministic stand-in: threshold at the midpoint of the value range.
///
/// Values at or above the midpoint go to side 1; all-identical values go
/// to a single side. Useful for exercising the engine and flattener
/// independently of any stochastic model.
#[derive(Debug, Clone, Copy, Default)]
pub struct MidpointSplit;

impl SplitOracle for MidpointSplit {
    fn split(&self, values: &[f64]) -> Result<Vec<usize>> {
        if values.is_empty() {
            return Err(Error::EmptyInput);
        }
        if values.len() < 2 {
            return Err(Error::TooFewInstances {
                found: values.len(),
            });
        }

        let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            return Ok(vec![0; values.len()]);
        }

        let mid = (lo + hi) / 2.0;
        Ok(values.iter().map(|&v| usize::from(v >= mid)).collect())
    }
}
