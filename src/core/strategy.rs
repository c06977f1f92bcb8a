use tracing::info;

use crate::{
    constants,
    core::{config::Configuration, cost::CostWeights, search::search_weighted},
    error::ScheduleError,
    winterfell::{
        ByteReader, ByteWriter, Deserializable, DeserializationError, FieldElement, FriOptions,
        Serializable,
    },
};
use serde::{Deserialize, Serialize};

// STRATEGY RESULT
// ================================================================================================

/// A folding strategy together with its estimated proof size.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrategyResult {
    /// Estimated proof size, in field elements.
    pub total_estimated_field_elements: usize,
    /// Folding factor of every round, from the first round to the last.
    pub arities: Vec<usize>,
}

impl StrategyResult {
    pub fn num_rounds(&self) -> usize {
        self.arities.len()
    }

    /// Product of all arities, i.e. the ratio between the initial and the final domain size.
    pub fn folding_product(&self) -> usize {
        self.arities.iter().product()
    }

    /// Estimated proof size in bytes when every field element is an `E`.
    ///
    /// Returns `None` if the size does not fit into a `usize`.
    pub fn size_in_bytes<E: FieldElement>(&self) -> Option<usize> {
        self.total_estimated_field_elements.checked_mul(E::ELEMENT_BYTES)
    }
}

impl Serializable for StrategyResult {
    /// Serializes this strategy and writes the resulting bytes to the specified `target`.
    ///
    /// Arities are written as their base-2 logarithms.
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_u64(self.total_estimated_field_elements as u64);
        target.write_u32(self.arities.len() as u32);
        for arity in self.arities.iter() {
            target.write_u8(arity.trailing_zeros() as u8);
        }
    }
}

impl Deserializable for StrategyResult {
    /// Reads a strategy from the `source` and returns it.
    ///
    /// # Errors
    /// Returns an error if:
    /// * The cost does not fit into a `usize`.
    /// * There are more than `MAX_DOMAIN_SIZE_LOG2` rounds; every arity is at least two, so a
    ///   valid domain cannot be folded more often.
    /// * An arity is smaller than two or too large for a `usize`.
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let total = source.read_u64()?;
        let total_estimated_field_elements = usize::try_from(total).map_err(|_| {
            DeserializationError::InvalidValue(format!("strategy cost {total} is too large"))
        })?;

        let num_rounds = source.read_u32()?;
        if num_rounds > constants::MAX_DOMAIN_SIZE_LOG2 {
            return Err(DeserializationError::InvalidValue(format!(
                "a strategy cannot have {num_rounds} rounds"
            )));
        }
        let num_rounds = num_rounds as usize;
        let mut arities = Vec::with_capacity(num_rounds);
        for _ in 0..num_rounds {
            let arity_log2 = source.read_u8()? as u32;
            if arity_log2 == 0 || arity_log2 >= usize::BITS {
                return Err(DeserializationError::InvalidValue(format!(
                    "invalid folding factor 2^{arity_log2}"
                )));
            }
            arities.push(1 << arity_log2);
        }

        Ok(StrategyResult {
            total_estimated_field_elements,
            arities,
        })
    }
}

// OPTIMAL STRATEGY
// ================================================================================================

/// Computes the folding strategy minimizing the estimated proof size.
///
/// `max_arity` defaults to [`crate::constants::MAX_ARITY`] and `terminal_threshold` to
/// [`crate::constants::DEFAULT_TERMINAL_THRESHOLD`].
pub fn compute_optimal_strategy(
    initial_degree_bound: usize,
    blowup_factor: usize,
    num_queries: usize,
    max_arity: Option<usize>,
    terminal_threshold: Option<usize>,
) -> Result<StrategyResult, ScheduleError> {
    let config = Configuration {
        max_arity,
        terminal_threshold,
        ..Configuration::new(initial_degree_bound, blowup_factor, num_queries)
    };
    compute_optimal_strategy_for(&config)
}

/// Validates `config` and computes its minimum-cost folding strategy.
pub fn compute_optimal_strategy_for(
    config: &Configuration,
) -> Result<StrategyResult, ScheduleError> {
    let params = config.validate()?;
    let (total_estimated_field_elements, arities) = search_weighted(
        params.initial_domain_size,
        params.terminal_threshold,
        params.max_arity,
        params.num_queries,
        &params.weights,
    )?;

    info!(
        domain_size = params.initial_domain_size,
        num_queries = params.num_queries,
        cost = total_estimated_field_elements,
        arities = ?arities,
        "selected folding strategy"
    );

    Ok(StrategyResult {
        total_estimated_field_elements,
        arities,
    })
}

/// Computes the optimal strategy of every configuration; results are in input order.
///
/// With the `concurrent` feature the configurations are processed on the rayon thread pool.
pub fn compute_optimal_strategies(
    configs: &[Configuration],
) -> Vec<Result<StrategyResult, ScheduleError>> {
    #[cfg(feature = "concurrent")]
    {
        use rayon::prelude::*;
        configs.par_iter().map(compute_optimal_strategy_for).collect()
    }

    #[cfg(not(feature = "concurrent"))]
    {
        configs.iter().map(compute_optimal_strategy_for).collect()
    }
}

// STRATEGY EVALUATION
// ================================================================================================

/// Returns the estimated cost of folding `initial_domain_size` by `arities` in order, and then
/// sending whatever domain is left directly.
///
/// # Errors
/// Returns an error if an arity is not a power of two of at least two, does not divide the
/// domain it is applied to, or if the cost overflows.
pub fn evaluate_strategy(
    initial_domain_size: usize,
    arities: &[usize],
    num_queries: usize,
    weights: &CostWeights,
) -> Result<usize, ScheduleError> {
    let mut domain_size = initial_domain_size;
    let mut total = 0_usize;

    for (i, &arity) in arities.iter().enumerate() {
        if !arity.is_power_of_two() || arity < 2 || domain_size % arity != 0 {
            return Err(ScheduleError::invalid(format!("arities[{i}]"), arity));
        }
        total = total
            .checked_add(weights.round_cost(domain_size, arity, num_queries)?)
            .ok_or(ScheduleError::ArithmeticOverflow("strategy cost"))?;
        domain_size /= arity;
    }

    total
        .checked_add(weights.terminal_cost(domain_size)?)
        .ok_or(ScheduleError::ArithmeticOverflow("strategy cost"))
}

// BASELINES
// ================================================================================================

/// Folds by `arity` in every round for as long as it fits, finishing with one smaller fold when
/// the remaining ratio is not a power of `arity`. The configured `max_arity` is ignored.
pub fn fixed_arity_strategy(
    config: &Configuration,
    arity: usize,
) -> Result<StrategyResult, ScheduleError> {
    let params = config.validate()?;
    if !arity.is_power_of_two() || arity < 2 {
        return Err(ScheduleError::invalid("arity", arity));
    }
    if params.terminal_threshold > params.initial_domain_size {
        return Err(ScheduleError::NoFeasibleStrategy {
            domain_size: params.initial_domain_size,
            terminal_threshold: params.terminal_threshold,
        });
    }

    let mut remaining = params.initial_domain_size / params.terminal_threshold;
    let mut arities = Vec::new();
    while remaining >= arity {
        arities.push(arity);
        remaining /= arity;
    }
    if remaining > 1 {
        arities.push(remaining);
    }

    let total_estimated_field_elements = evaluate_strategy(
        params.initial_domain_size,
        &arities,
        params.num_queries,
        &params.weights,
    )?;

    Ok(StrategyResult {
        total_estimated_field_elements,
        arities,
    })
}

/// Builds winterfell [`FriOptions`], rejecting values its constructor would panic on.
pub fn fri_options(
    blowup_factor: usize,
    folding_factor: usize,
    remainder_max_degree: usize,
) -> Result<FriOptions, ScheduleError> {
    if !blowup_factor.is_power_of_two() || blowup_factor < 2 {
        return Err(ScheduleError::invalid("blowup_factor", blowup_factor));
    }
    if ![2, 4, 8, 16].contains(&folding_factor) {
        return Err(ScheduleError::invalid("folding_factor", folding_factor));
    }
    let remainder_size = remainder_max_degree
        .checked_add(1)
        .ok_or(ScheduleError::ArithmeticOverflow("remainder size"))?;
    if !remainder_size.is_power_of_two() {
        return Err(ScheduleError::invalid(
            "remainder_max_degree",
            remainder_max_degree,
        ));
    }

    Ok(FriOptions::new(
        blowup_factor,
        folding_factor,
        remainder_max_degree,
    ))
}

/// The strategy winterfell's FRI prover follows for `options`: the folding factor repeated for
/// every FRI layer, with the remainder sent over whatever domain is left.
///
/// The final domain is decided by `options` and may differ from the configured terminal
/// threshold.
pub fn winterfell_strategy(
    config: &Configuration,
    options: &FriOptions,
) -> Result<StrategyResult, ScheduleError> {
    let params = config.validate()?;
    if options.blowup_factor() != params.blowup_factor {
        return Err(ScheduleError::invalid(
            "options.blowup_factor",
            options.blowup_factor(),
        ));
    }

    let num_layers = options.num_fri_layers(params.initial_domain_size);
    // every layer must divide the domain evenly
    let folded = options
        .folding_factor()
        .checked_pow(num_layers as u32)
        .filter(|folded| params.initial_domain_size % folded == 0);
    if folded.is_none() {
        return Err(ScheduleError::invalid(
            "options.folding_factor",
            options.folding_factor(),
        ));
    }
    let arities = vec![options.folding_factor(); num_layers];
    let total_estimated_field_elements = evaluate_strategy(
        params.initial_domain_size,
        &arities,
        params.num_queries,
        &params.weights,
    )?;

    Ok(StrategyResult {
        total_estimated_field_elements,
        arities,
    })
}
