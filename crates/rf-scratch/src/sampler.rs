//! Weighted symbol sampling

use rand::Rng;

use crate::config::WeightTable;
use crate::error::{ScratchError, ScratchResult};

/// Draws symbol names from an ordered weight table
///
/// A roll in `[0, total)` is mapped onto cumulative buckets in declaration
/// order, so a seeded generator always yields the same sequence.
#[derive(Debug, Clone, Copy)]
pub struct WeightedSampler<'a> {
    weights: &'a WeightTable,
    total: u32,
}

impl<'a> WeightedSampler<'a> {
    /// Create a sampler over a non-empty table with positive total weight
    pub fn new(weights: &'a WeightTable) -> ScratchResult<Self> {
        if weights.is_empty() {
            return Err(ScratchError::config("Cannot sample from an empty weight table"));
        }

        let total = weights
            .values()
            .try_fold(0u32, |acc, &w| acc.checked_add(w))
            .ok_or_else(|| ScratchError::config("Total weight overflows"))?;

        if total == 0 {
            return Err(ScratchError::config("Total weight must be positive"));
        }

        Ok(Self { weights, total })
    }

    /// Sum of all weights
    pub fn total_weight(&self) -> u32 {
        self.total
    }

    /// Draw one symbol
    pub fn sample<R: Rng>(&self, rng: &mut R) -> &'a str {
        let roll = rng.random_range(0..self.total);
        self.pick(roll)
    }

    /// Map a roll in `[0, total)` onto its symbol
    pub fn pick(&self, roll: u32) -> &'a str {
        let mut cumulative = 0u32;
        for (symbol, &weight) in self.weights {
            cumulative += weight;
            if roll < cumulative {
                return symbol;
            }
        }

        // Rolls are drawn below the total, so this is only reached for roll >= total
        self.weights
            .keys()
            .next_back()
            .map(String::as_str)
            .unwrap_or_default()
    }
}
