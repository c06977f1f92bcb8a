use crate::{
    core::{
        compute_optimal_strategy_for, fixed_arity_strategy, fri_options, winterfell_strategy,
        Configuration, StrategyResult,
    },
    error::ScheduleError,
};

const FIXED_ARITIES: [usize; 4] = [2, 4, 8, 16];

/// Computes the optimal strategy and the baseline schedules, and renders them as a table.
///
/// Baselines which cannot be built for `config` are listed with their error.
pub fn run(
    config: &Configuration,
    folding_factor: usize,
    remainder_max_degree: usize,
) -> Result<String, ScheduleError> {
    let optimal = compute_optimal_strategy_for(config)?;

    let mut rows: Vec<(String, Result<StrategyResult, ScheduleError>)> =
        vec![("optimal".to_string(), Ok(optimal))];
    for arity in FIXED_ARITIES {
        rows.push((
            format!("fixed arity {arity}"),
            fixed_arity_strategy(config, arity),
        ));
    }
    rows.push((
        format!("winterfell (folding {folding_factor}, remainder degree {remainder_max_degree})"),
        fri_options(config.blowup_factor, folding_factor, remainder_max_degree)
            .and_then(|options| winterfell_strategy(config, &options)),
    ));

    let lines: Vec<String> = rows
        .iter()
        .map(|(name, result)| match result {
            Ok(result) => format!(
                "{name:<45} {:>10}  {:?}",
                result.total_estimated_field_elements, result.arities
            ),
            Err(e) => format!("{name:<45} {:>10}  {e}", "-"),
        })
        .collect();
    Ok(lines.join("\n"))
}
