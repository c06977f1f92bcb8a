//! Heuristic proof-size model for FRI folding rounds.
//!
//! Every round opens, for each query, the `arity - 1` siblings needed to recompute a folded
//! value, together with a Merkle authentication path binding them to the layer commitment.
//! Once the domain reaches the terminal threshold the remaining polynomial is sent in full.
//! Sizes are counted in field elements.

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

// COST WEIGHTS
// ================================================================================================

/// Multipliers applied to the three terms of the cost model.
///
/// [`CostWeights::UNIT`] (the default) counts every opened value and every path node as one
/// field element. All weights must be at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CostWeights {
    /// Field elements per revealed sibling value.
    pub sibling: usize,
    /// Field elements per authentication-path node.
    pub path: usize,
    /// Field elements per coefficient of the remainder polynomial.
    pub terminal: usize,
}

impl CostWeights {
    pub const UNIT: Self = CostWeights {
        sibling: 1,
        path: 1,
        terminal: 1,
    };

    /// A Merkle node is a 4-element digest and every opened value lives in a degree-2
    /// extension field.
    pub const HASH_DIGEST: Self = CostWeights {
        sibling: 2,
        path: 4,
        terminal: 2,
    };

    // COST FUNCTIONS
    // --------------------------------------------------------------------------------------------

    /// Returns the marginal cost of folding a domain of `domain_size` points by `arity`:
    /// `num_queries * (sibling * (arity - 1) + path * ceil(log2(domain_size / arity)))`.
    ///
    /// # Errors
    /// Returns an error if:
    /// * `arity` is smaller than two or does not divide `domain_size`.
    /// * The cost does not fit into a `usize`.
    pub fn round_cost(
        &self,
        domain_size: usize,
        arity: usize,
        num_queries: usize,
    ) -> Result<usize, ScheduleError> {
        if arity < 2 || domain_size % arity != 0 {
            return Err(ScheduleError::invalid("arity", arity));
        }

        let path_length = ceil_log2(domain_size / arity);
        let per_query = (arity - 1)
            .checked_mul(self.sibling)
            .zip(path_length.checked_mul(self.path))
            .and_then(|(siblings, path)| siblings.checked_add(path))
            .ok_or(ScheduleError::ArithmeticOverflow("round cost"))?;

        per_query
            .checked_mul(num_queries)
            .ok_or(ScheduleError::ArithmeticOverflow("round cost"))
    }

    /// Returns the cost of sending a remainder polynomial over `threshold_size` points directly.
    pub fn terminal_cost(&self, threshold_size: usize) -> Result<usize, ScheduleError> {
        threshold_size
            .checked_mul(self.terminal)
            .ok_or(ScheduleError::ArithmeticOverflow("terminal cost"))
    }

    pub(crate) fn validate(&self) -> Result<(), ScheduleError> {
        for (field, weight) in [
            ("weights.sibling", self.sibling),
            ("weights.path", self.path),
            ("weights.terminal", self.terminal),
        ] {
            if weight == 0 {
                return Err(ScheduleError::invalid(field, weight));
            }
        }
        Ok(())
    }
}

impl Default for CostWeights {
    fn default() -> Self {
        CostWeights::UNIT
    }
}

// UNIT-WEIGHT HELPERS
// ================================================================================================

/// Marginal cost of folding a domain of `domain_size` points by `arity`, with unit weights.
pub fn round_cost(
    domain_size: usize,
    arity: usize,
    num_queries: usize,
) -> Result<usize, ScheduleError> {
    CostWeights::UNIT.round_cost(domain_size, arity, num_queries)
}

/// Cost of sending the remainder directly, with unit weights. Equal to `threshold_size`.
pub fn terminal_cost(threshold_size: usize) -> usize {
    threshold_size
}

/// Returns `ceil(log2(n))`, with `ceil_log2(0) == ceil_log2(1) == 0`.
pub(crate) fn ceil_log2(n: usize) -> usize {
    if n <= 1 {
        0
    } else {
        (usize::BITS - (n - 1).leading_zeros()) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil_log2_rounds_up() {
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(3), 2);
        assert_eq!(ceil_log2(4), 2);
        assert_eq!(ceil_log2(5), 3);
        assert_eq!(ceil_log2(1 << 20), 20);
    }

    #[test]
    fn round_cost_counts_siblings_and_path() {
        // 30 * ((16 - 1) + log2(2048 / 16)) = 30 * (15 + 7)
        assert_eq!(round_cost(2048, 16, 30).unwrap(), 660);
        // folding straight down to a single point needs no path
        assert_eq!(round_cost(8, 8, 3).unwrap(), 21);
        // 12 / 2 = 6 points, so the path has ceil(log2(6)) = 3 nodes
        assert_eq!(round_cost(12, 2, 1).unwrap(), 4);
    }

    #[test]
    fn weighted_round_cost() {
        let weights = CostWeights::HASH_DIGEST;
        // 10 * (2 * 3 + 4 * 6)
        assert_eq!(weights.round_cost(256, 4, 10).unwrap(), 300);
        assert_eq!(weights.terminal_cost(8).unwrap(), 16);
    }

    #[test]
    fn costs_are_monotone() {
        for arity in [2, 4, 8, 16] {
            let mut previous = 0;
            for num_queries in 1..64 {
                let cost = round_cost(1 << 12, arity, num_queries).unwrap();
                assert!(cost >= previous);
                previous = cost;
            }

            let mut previous = 0;
            for log_size in 4..24 {
                let cost = round_cost(1 << log_size, arity, 20).unwrap();
                assert!(cost >= previous);
                previous = cost;
            }
        }
        assert_eq!(terminal_cost(32), 32);
        assert_eq!(CostWeights::default().terminal_cost(32).unwrap(), 32);
    }

    #[test]
    fn bad_arity_is_rejected() {
        assert_eq!(
            round_cost(16, 1, 4),
            Err(ScheduleError::InvalidParameter {
                field: "arity".to_string(),
                value: 1
            })
        );
        assert!(round_cost(16, 32, 4).is_err());
        assert!(round_cost(12, 8, 4).is_err());
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(
            round_cost(1 << 10, 4, usize::MAX),
            Err(ScheduleError::ArithmeticOverflow("round cost"))
        );
        let weights = CostWeights {
            terminal: usize::MAX,
            ..CostWeights::UNIT
        };
        assert_eq!(
            weights.terminal_cost(2),
            Err(ScheduleError::ArithmeticOverflow("terminal cost"))
        );
    }

    #[test]
    fn zero_weight_is_rejected() {
        let weights = CostWeights {
            path: 0,
            ..CostWeights::UNIT
        };
        assert_eq!(
            weights.validate(),
            Err(ScheduleError::invalid("weights.path", 0))
        );
        assert!(CostWeights::HASH_DIGEST.validate().is_ok());
    }
}
