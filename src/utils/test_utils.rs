use crate::core::{evaluate_strategy, CostWeights};

/// Every sequence of power-of-two arities in `[2, max_arity]` whose product is `ratio`.
pub fn all_arity_sequences(ratio: usize, max_arity: usize) -> Vec<Vec<usize>> {
    if ratio == 1 {
        return vec![vec![]];
    }

    let mut sequences = Vec::new();
    let mut arity = 2;
    while arity <= max_arity && arity <= ratio {
        if ratio % arity == 0 {
            for mut tail in all_arity_sequences(ratio / arity, max_arity) {
                tail.insert(0, arity);
                sequences.push(tail);
            }
        }
        arity *= 2;
    }
    sequences
}

/// Evaluates every candidate strategy and returns the cheapest cost, or `None` if there is no
/// candidate.
pub fn brute_force_cost(
    domain_size: usize,
    terminal_threshold: usize,
    max_arity: usize,
    num_queries: usize,
    weights: &CostWeights,
) -> Option<usize> {
    if domain_size % terminal_threshold != 0 {
        return None;
    }

    all_arity_sequences(domain_size / terminal_threshold, max_arity)
        .iter()
        .map(|arities| evaluate_strategy(domain_size, arities, num_queries, weights).unwrap())
        .min()
}
