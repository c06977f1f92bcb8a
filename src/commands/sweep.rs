use std::{fs, io::Write, path::Path};

use tracing::warn;

use crate::core::{compute_optimal_strategies, Configuration, CostWeights, StrategyResult};

const HEADER: &str = "degree,blowup,num_queries,max_arity,terminal_threshold,cost,arities";

/// Every combination of the given degrees, blowup factors and query counts.
pub fn grid(
    degrees: &[usize],
    blowups: &[usize],
    num_queries: &[usize],
    max_arity: usize,
    terminal_threshold: usize,
    weights: CostWeights,
) -> Vec<Configuration> {
    let mut configs = Vec::with_capacity(degrees.len() * blowups.len() * num_queries.len());
    for &degree in degrees {
        for &blowup in blowups {
            for &queries in num_queries {
                configs.push(
                    Configuration::new(degree, blowup, queries)
                        .with_max_arity(max_arity)
                        .with_terminal_threshold(terminal_threshold)
                        .with_weights(weights),
                );
            }
        }
    }
    configs
}

/// Computes the optimal strategy of every configuration and writes the results to `output`.
/// Configurations without a strategy are logged and skipped.
///
/// Returns the number of rows written.
pub fn run(configs: &[Configuration], output: &Path) -> std::io::Result<usize> {
    let results = compute_optimal_strategies(configs);

    let mut rows = Vec::with_capacity(results.len());
    for (config, result) in configs.iter().zip(results) {
        match result {
            Ok(result) => rows.push(to_csv(config, &result)),
            Err(e) => warn!(?config, "skipping configuration: {e}"),
        }
    }

    save_results_with_header(&rows, output)?;
    Ok(rows.len())
}

fn to_csv(config: &Configuration, result: &StrategyResult) -> String {
    let arities: Vec<String> = result.arities.iter().map(|a| a.to_string()).collect();
    format!(
        "{},{},{},{},{},{},{}",
        config.initial_degree_bound,
        config.blowup_factor,
        config.num_queries,
        config.max_arity.map_or(String::new(), |a| a.to_string()),
        config
            .terminal_threshold
            .map_or(String::new(), |t| t.to_string()),
        result.total_estimated_field_elements,
        arities.join("-"),
    )
}

/// Creates the output directory if it doesn't exist
fn ensure_output_dir(output_path: &Path) -> std::io::Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn save_results_with_header(rows: &[String], output_path: &Path) -> std::io::Result<()> {
    ensure_output_dir(output_path)?;

    let mut file = fs::File::create(output_path)?;
    writeln!(file, "{HEADER}")?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    Ok(())
}
