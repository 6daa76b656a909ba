//! Bet size → revealed strength samples.
//!
//! Each sample pairs the size of an opponent bet (relative to the pot it
//! was made into) with the equity their cards actually had on that board,
//! learned after a showdown. Samples are kept sorted by bet size so the
//! neighbours of a new bet are found by binary search.

use serde::Serialize;

/// Summary of the strengths behind the bets nearest a given size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NeighborStrength {
    pub mean: f64,
    pub median: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct BetStrengthSamples {
    /// `(bet_size, strength)` sorted by bet size.
    samples: Vec<(f64, f64)>,
}

impl BetStrengthSamples {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Add a sample, keeping the order. Non-finite values are ignored.
    pub fn insert(&mut self, bet_size: f64, strength: f64) {
        if !bet_size.is_finite() || !strength.is_finite() {
            return;
        }
        let at = self.samples.partition_point(|&(b, _)| b <= bet_size);
        self.samples.insert(at, (bet_size, strength));
    }

    /// Strengths of the `k` samples closest to `bet_size`, nearest first.
    /// Equidistant samples prefer the smaller bet.
    pub fn nearest(&self, bet_size: f64, k: usize) -> Vec<f64> {
        let k = k.min(self.samples.len());
        let mut out = Vec::with_capacity(k);
        let mut hi = self.samples.partition_point(|&(b, _)| b < bet_size);
        let mut lo = hi;
        while out.len() < k {
            let left = lo.checked_sub(1).map(|i| bet_size - self.samples[i].0);
            let right = self.samples.get(hi).map(|&(b, _)| b - bet_size);
            match (left, right) {
                (Some(l), Some(r)) if l <= r => {
                    lo -= 1;
                    out.push(self.samples[lo].1);
                }
                (_, Some(_)) => {
                    out.push(self.samples[hi].1);
                    hi += 1;
                }
                (Some(_), None) => {
                    lo -= 1;
                    out.push(self.samples[lo].1);
                }
                (None, None) => break,
            }
        }
        out
    }

    /// Mean and median strength of the `k` nearest samples.
    pub fn strength_near(&self, bet_size: f64, k: usize) -> Option<NeighborStrength> {
        let mut strengths = self.nearest(bet_size, k);
        if strengths.is_empty() {
            return None;
        }
        let count = strengths.len();
        let mean = strengths.iter().sum::<f64>() / count as f64;
        strengths.sort_by(f64::total_cmp);
        let median = if count % 2 == 1 {
            strengths[count / 2]
        } else {
            0.5 * (strengths[count / 2 - 1] + strengths[count / 2])
        };
        Some(NeighborStrength { mean, median, count })
    }
}
