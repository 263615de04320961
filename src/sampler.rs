//! Weighted index sampling.
//!
//! Draws an index `i` from a weight vector with probability `w_i / T`, where
//! `T` is the total weight. The weights are turned into a running sum
//! (cumulative distribution), a value `v ~ Uniform[0, T)` is drawn, and the
//! first index whose cumulative weight exceeds `v` wins.
//!
//! ```text
//!   weights      [ 1 | 0 | 2 |   3   ]
//!   cumulative   [ 1 | 1 | 3 |   6   ]
//!                 0   1       3       6
//!                 |---|-------|-------|
//!   v = 4.2                      ^  -> index 3
//! ```
//!
//! Zero-weight positions own an empty interval and are never selected.
//!
//! Notes:
//! - `*_with_rng` entrypoints take a caller-supplied RNG for deterministic testing.
//! - The plain entrypoints draw from `rand::rng()` and are not reproducible across runs.

use rand::prelude::*;
use thiserror::Error;

/// Errors raised when a weight vector cannot be sampled from.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    /// Weight is not finite (NaN/inf).
    #[error("weight at index {index} must be finite (got {weight})")]
    NonFiniteWeight { index: usize, weight: f64 },
    /// Weight is below zero.
    #[error("weight at index {index} must be >= 0 (got {weight})")]
    NegativeWeight { index: usize, weight: f64 },
    /// Empty input, all-zero weights, or a total that overflowed.
    #[error("total weight must be finite and > 0 (got {total})")]
    InvalidWeights { total: f64 },
}

/// Running sum of a weight vector, ready to be sampled from.
///
/// Construction validates the weights, so every value of this type has a
/// finite, strictly positive total.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeWeights {
    cumulative: Vec<f64>,
}

impl CumulativeWeights {
    /// Build the cumulative distribution for `weights`.
    pub fn from_weights(weights: &[f64]) -> Result<Self, SampleError> {
        let mut cumulative = Vec::with_capacity(weights.len());
        let mut running = 0.0_f64;
        for (index, &weight) in weights.iter().enumerate() {
            if !weight.is_finite() {
                return Err(SampleError::NonFiniteWeight { index, weight });
            }
            if weight < 0.0 {
                return Err(SampleError::NegativeWeight { index, weight });
            }
            running += weight;
            cumulative.push(running);
        }

        if !running.is_finite() || running <= 0.0 {
            return Err(SampleError::InvalidWeights { total: running });
        }

        Ok(Self { cumulative })
    }

    /// Total weight `T` (the last cumulative value).
    #[inline]
    pub fn total(&self) -> f64 {
        // Non-empty by construction.
        self.cumulative[self.cumulative.len() - 1]
    }

    /// Number of positions (including zero-weight ones).
    #[inline]
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    /// Always false: a valid distribution has at least one position.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// The cumulative weights `C[0..n]`.
    pub fn as_slice(&self) -> &[f64] {
        &self.cumulative
    }

    /// Map a point `v` in `[0, T)` to the first index with `v < C[i]`.
    ///
    /// `C` is non-decreasing, so a binary search finds the same index as a
    /// left-to-right scan.
    ///
    /// # Panics
    ///
    /// Panics if `v` is not below the total weight: no index can own it.
    pub fn select(&self, v: f64) -> usize {
        let i = self.cumulative.partition_point(|&c| c <= v);
        assert!(
            i < self.cumulative.len(),
            "cumulative weight scan found no index for v={v} (total={})",
            self.total()
        );
        i
    }

    /// Draw an index using a caller-supplied RNG.
    pub fn sample_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let total = self.total();
        let mut v = rng.random_range(0.0..total);
        // Float range sampling may round up onto the open bound.
        while v >= total {
            v = rng.random_range(0.0..total);
        }
        self.select(v)
    }

    /// Draw an index from the thread-local RNG.
    pub fn sample(&self) -> usize {
        let mut rng = rand::rng();
        self.sample_with_rng(&mut rng)
    }
}

/// Sample one index from `weights` using the thread-local RNG.
#[inline]
pub fn sample_index(weights: &[f64]) -> Result<usize, SampleError> {
    let mut rng = rand::rng();
    sample_index_with_rng(weights, &mut rng)
}

/// Sample one index from `weights` with a caller-supplied RNG (for tests/benchmarks).
pub fn sample_index_with_rng<R: Rng + ?Sized>(
    weights: &[f64],
    rng: &mut R,
) -> Result<usize, SampleError> {
    let cumulative = CumulativeWeights::from_weights(weights)?;
    Ok(cumulative.sample_with_rng(rng))
}
