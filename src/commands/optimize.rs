use serde::Serialize;

use super::cli::FieldKind;
use crate::{
    core::{compute_optimal_strategy_for, Configuration, StrategyResult},
    winterfell::{f128, f64},
};

#[derive(Serialize)]
struct Report<'a> {
    configuration: &'a Configuration,
    result: &'a StrategyResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_in_bytes: Option<usize>,
}

/// Computes the optimal strategy for `config` and renders it as text or JSON.
pub fn run(
    config: &Configuration,
    json: bool,
    field: Option<FieldKind>,
) -> Result<String, Box<dyn std::error::Error>> {
    let result = compute_optimal_strategy_for(config)?;
    let size_in_bytes = match field {
        Some(FieldKind::F64) => result.size_in_bytes::<f64::BaseElement>(),
        Some(FieldKind::F128) => result.size_in_bytes::<f128::BaseElement>(),
        None => None,
    };

    if json {
        let report = Report {
            configuration: config,
            result: &result,
            field: field.map(|f| f.name()),
            size_in_bytes,
        };
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let params = config.validate()?;
    let mut out = format!(
        "Folding strategy for degree {}, blowup {}, {} queries (domain {} -> {}):\n",
        params.initial_degree_bound,
        params.blowup_factor,
        params.num_queries,
        params.initial_domain_size,
        params.terminal_threshold,
    );
    out.push_str(&format!("  arities: {:?}\n", result.arities));
    out.push_str(&format!("  rounds: {}\n", result.num_rounds()));
    out.push_str(&format!(
        "  estimated proof size: {} field elements",
        result.total_estimated_field_elements
    ));
    if let (Some(field), Some(bytes)) = (field, size_in_bytes) {
        out.push_str(&format!(" ({bytes} bytes over {})", field.name()));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleError;

    #[test]
    fn errors_keep_their_message() {
        let err = run(&Configuration::new(1000, 2, 30), true, None).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ScheduleError>(),
            Some(&ScheduleError::invalid("initial_degree_bound", 1000))
        );
        assert!(!err.to_string().contains("failed to load configuration"));
    }

    #[test]
    fn json_report_parses_back() {
        let config = Configuration::new(64, 4, 8);
        let output = run(&config, true, Some(FieldKind::F64)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let result = compute_optimal_strategy_for(&config).unwrap();

        assert_eq!(value["field"], "f64");
        assert_eq!(
            value["size_in_bytes"],
            result.total_estimated_field_elements * 8
        );
    }
}
