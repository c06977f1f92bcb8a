//! Minimum-cost folding strategy search.
//!
//! Domain sizes reachable from the initial domain are `terminal_threshold * 2^k`, so the memo
//! table is indexed by the exponent `k` and filled bottom-up: entry `k` only depends on entries
//! `k - 1, ..., k - log2(max_arity)`. Each call owns its table.

use tracing::debug;

use crate::{core::cost::CostWeights, error::ScheduleError};

/// Best continuation from one domain size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostState {
    /// Minimum total cost of reaching the terminal threshold, terminal cost included.
    pub cost: usize,
    /// Arity of the first fold on the cheapest path; `None` at the terminal threshold.
    pub arity: Option<usize>,
}

/// Finds the cheapest sequence of arities reducing `initial_domain_size` to
/// `terminal_threshold`, using unit cost weights.
///
/// Returns the total estimated cost and the arities from the first round to the last. See
/// [`search_weighted`].
pub fn search(
    initial_domain_size: usize,
    terminal_threshold: usize,
    max_arity: usize,
    num_queries: usize,
) -> Result<(usize, Vec<usize>), ScheduleError> {
    search_weighted(
        initial_domain_size,
        terminal_threshold,
        max_arity,
        num_queries,
        &CostWeights::UNIT,
    )
}

/// Finds the cheapest sequence of power-of-two arities, each at most `max_arity`, reducing
/// `initial_domain_size` exactly to `terminal_threshold`.
///
/// When several arities give the same cost the smallest one is chosen.
///
/// # Errors
/// Returns [`ScheduleError::NoFeasibleStrategy`] if `terminal_threshold` is zero, does not
/// divide `initial_domain_size`, leaves a quotient which is not a power of two, or folding is
/// needed but `max_arity < 2`. Returns [`ScheduleError::ArithmeticOverflow`] if a cost does not
/// fit into a `usize`.
pub fn search_weighted(
    initial_domain_size: usize,
    terminal_threshold: usize,
    max_arity: usize,
    num_queries: usize,
    weights: &CostWeights,
) -> Result<(usize, Vec<usize>), ScheduleError> {
    let infeasible = ScheduleError::NoFeasibleStrategy {
        domain_size: initial_domain_size,
        terminal_threshold,
    };

    if terminal_threshold == 0 || initial_domain_size % terminal_threshold != 0 {
        return Err(infeasible);
    }
    let ratio = initial_domain_size / terminal_threshold;
    if !ratio.is_power_of_two() {
        return Err(infeasible);
    }

    let num_levels = ratio.trailing_zeros() as usize;
    let max_arity_log2 = if max_arity < 2 {
        0
    } else {
        max_arity.ilog2() as usize
    };
    if num_levels > 0 && max_arity_log2 == 0 {
        return Err(infeasible);
    }

    let table = build_table(
        terminal_threshold,
        num_levels,
        max_arity_log2,
        num_queries,
        weights,
    )?;

    // walk the table from the initial domain down to the threshold
    let mut arities = Vec::new();
    let mut level = num_levels;
    while let Some(arity) = table[level].arity {
        arities.push(arity);
        level -= arity.trailing_zeros() as usize;
    }

    Ok((table[num_levels].cost, arities))
}

/// Fills entries `0..=num_levels`, where entry `k` describes the domain of size
/// `terminal_threshold << k`.
fn build_table(
    terminal_threshold: usize,
    num_levels: usize,
    max_arity_log2: usize,
    num_queries: usize,
    weights: &CostWeights,
) -> Result<Vec<CostState>, ScheduleError> {
    let mut table = Vec::with_capacity(num_levels + 1);
    table.push(CostState {
        cost: weights.terminal_cost(terminal_threshold)?,
        arity: None,
    });

    for level in 1..=num_levels {
        let domain_size = terminal_threshold << level;

        let mut best: Option<CostState> = None;
        for arity_log2 in 1..=max_arity_log2.min(level) {
            let arity = 1 << arity_log2;
            let cost = weights
                .round_cost(domain_size, arity, num_queries)?
                .checked_add(table[level - arity_log2].cost)
                .ok_or(ScheduleError::ArithmeticOverflow("strategy cost"))?;

            // candidates are visited by increasing arity; a strict comparison keeps the
            // smallest arity among equal costs
            if best.map_or(true, |current| cost < current.cost) {
                best = Some(CostState {
                    cost,
                    arity: Some(arity),
                });
            }
        }

        // `max_arity_log2 >= 1` and `level >= 1`, so there was at least one candidate
        let best = best.ok_or(ScheduleError::NoFeasibleStrategy {
            domain_size,
            terminal_threshold,
        })?;
        debug!(
            domain_size,
            cost = best.cost,
            arity = ?best.arity,
            "best fold for domain"
        );
        table.push(best);
    }

    Ok(table)
}
