use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{constants, core::cost::CostWeights, error::ScheduleError};

// CONFIGURATION
// ================================================================================================

/// Parameters of a polynomial commitment for which a folding strategy is computed.
///
/// `max_arity` and `terminal_threshold` are optional and fall back to [`constants::MAX_ARITY`]
/// and [`constants::DEFAULT_TERMINAL_THRESHOLD`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub initial_degree_bound: usize,
    pub blowup_factor: usize,
    pub num_queries: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_arity: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_threshold: Option<usize>,
    #[serde(default)]
    pub weights: CostWeights,
}

impl Configuration {
    pub fn new(initial_degree_bound: usize, blowup_factor: usize, num_queries: usize) -> Self {
        Configuration {
            initial_degree_bound,
            blowup_factor,
            num_queries,
            max_arity: None,
            terminal_threshold: None,
            weights: CostWeights::default(),
        }
    }

    pub fn with_max_arity(mut self, max_arity: usize) -> Self {
        self.max_arity = Some(max_arity);
        self
    }

    pub fn with_terminal_threshold(mut self, terminal_threshold: usize) -> Self {
        self.terminal_threshold = Some(terminal_threshold);
        self
    }

    pub fn with_weights(mut self, weights: CostWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Checks every field of this configuration; see [`validate`].
    pub fn validate(&self) -> Result<ValidatedConfiguration, ScheduleError> {
        validate(self)
    }
}

/// A configuration which passed [`validate`], with its defaults resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedConfiguration {
    pub initial_degree_bound: usize,
    pub blowup_factor: usize,
    pub num_queries: usize,
    pub max_arity: usize,
    pub terminal_threshold: usize,
    pub weights: CostWeights,
    /// `initial_degree_bound * blowup_factor`.
    pub initial_domain_size: usize,
}

// VALIDATION
// ================================================================================================

/// Checks that `config` is well-formed before any search runs.
///
/// Whether the terminal threshold divides the initial domain is not checked here; such
/// configurations are reported by the search as [`ScheduleError::NoFeasibleStrategy`].
///
/// # Errors
/// Returns [`ScheduleError::InvalidParameter`] if:
/// * `initial_degree_bound` or `blowup_factor` is not a positive power of two.
/// * `num_queries` is zero.
/// * `max_arity` is not a power of two in `[2, MAX_ARITY]`.
/// * `terminal_threshold` is not a positive power of two.
/// * Any cost weight is zero.
/// * The initial domain has more than `2^MAX_DOMAIN_SIZE_LOG2` points.
///
/// Returns [`ScheduleError::ArithmeticOverflow`] if the initial domain size does not fit into a
/// `usize`.
pub fn validate(config: &Configuration) -> Result<ValidatedConfiguration, ScheduleError> {
    check_power_of_two("initial_degree_bound", config.initial_degree_bound)?;
    check_power_of_two("blowup_factor", config.blowup_factor)?;

    if config.num_queries == 0 {
        return Err(ScheduleError::invalid("num_queries", config.num_queries));
    }

    let max_arity = config.max_arity.unwrap_or(constants::MAX_ARITY);
    if !max_arity.is_power_of_two() || max_arity < 2 || max_arity > constants::MAX_ARITY {
        return Err(ScheduleError::invalid("max_arity", max_arity));
    }

    let terminal_threshold = config
        .terminal_threshold
        .unwrap_or(constants::DEFAULT_TERMINAL_THRESHOLD);
    check_power_of_two("terminal_threshold", terminal_threshold)?;

    config.weights.validate()?;

    let initial_domain_size = config
        .initial_degree_bound
        .checked_mul(config.blowup_factor)
        .ok_or(ScheduleError::ArithmeticOverflow("initial domain size"))?;
    if initial_domain_size.ilog2() > constants::MAX_DOMAIN_SIZE_LOG2 {
        return Err(ScheduleError::invalid(
            "initial_domain_size",
            initial_domain_size,
        ));
    }

    Ok(ValidatedConfiguration {
        initial_degree_bound: config.initial_degree_bound,
        blowup_factor: config.blowup_factor,
        num_queries: config.num_queries,
        max_arity,
        terminal_threshold,
        weights: config.weights,
        initial_domain_size,
    })
}

fn check_power_of_two(field: &'static str, value: usize) -> Result<(), ScheduleError> {
    // `is_power_of_two` is false for zero
    if value.is_power_of_two() {
        Ok(())
    } else {
        Err(ScheduleError::invalid(field, value))
    }
}

// LOADING
// ================================================================================================

/// Reads a [`Configuration`] from a JSON file.
pub fn load_config(path: impl AsRef<Path>) -> Result<Configuration, ScheduleError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| ScheduleError::Config(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&contents)
        .map_err(|e| ScheduleError::Config(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_resolved() {
        let validated = Configuration::new(1024, 2, 30).validate().unwrap();
        assert_eq!(validated.initial_domain_size, 2048);
        assert_eq!(validated.max_arity, constants::MAX_ARITY);
        assert_eq!(validated.terminal_threshold, 1);
        assert_eq!(validated.weights, CostWeights::UNIT);
    }

    #[test]
    fn non_power_of_two_degree_is_rejected() {
        assert_eq!(
            Configuration::new(1000, 2, 30).validate(),
            Err(ScheduleError::invalid("initial_degree_bound", 1000))
        );
        assert_eq!(
            Configuration::new(0, 2, 30).validate(),
            Err(ScheduleError::invalid("initial_degree_bound", 0))
        );
    }

    #[test]
    fn each_field_is_named() {
        let cases = [
            (Configuration::new(64, 3, 30), "blowup_factor", 3),
            (Configuration::new(64, 4, 0), "num_queries", 0),
            (Configuration::new(64, 4, 8).with_max_arity(1), "max_arity", 1),
            (Configuration::new(64, 4, 8).with_max_arity(6), "max_arity", 6),
            (Configuration::new(64, 4, 8).with_max_arity(32), "max_arity", 32),
            (
                Configuration::new(64, 4, 8).with_terminal_threshold(0),
                "terminal_threshold",
                0,
            ),
            (
                Configuration::new(64, 4, 8).with_terminal_threshold(12),
                "terminal_threshold",
                12,
            ),
            (
                Configuration::new(64, 4, 8).with_weights(CostWeights {
                    sibling: 0,
                    ..CostWeights::UNIT
                }),
                "weights.sibling",
                0,
            ),
        ];

        for (config, field, value) in cases {
            assert_eq!(config.validate(), Err(ScheduleError::invalid(field, value)));
        }
    }

    #[test]
    fn oversized_threshold_passes_validation() {
        let validated = Configuration::new(4, 2, 1)
            .with_terminal_threshold(16)
            .validate()
            .unwrap();
        assert_eq!(validated.terminal_threshold, 16);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn domain_bounds() {
        assert_eq!(
            Configuration::new(1 << 30, 1 << 11, 1).validate(),
            Err(ScheduleError::invalid("initial_domain_size", 1 << 41))
        );
        assert_eq!(
            Configuration::new(1 << 63, 2, 1).validate(),
            Err(ScheduleError::ArithmeticOverflow("initial domain size"))
        );
    }

    #[test]
    fn json_defaults() {
        let config: Configuration = serde_json::from_str(
            r#"{ "initial_degree_bound": 1024, "blowup_factor": 2, "num_queries": 30 }"#,
        )
        .unwrap();
        assert_eq!(config, Configuration::new(1024, 2, 30));

        let config: Configuration = serde_json::from_str(
            r#"{
                "initial_degree_bound": 256,
                "blowup_factor": 8,
                "num_queries": 40,
                "max_arity": 8,
                "terminal_threshold": 4,
                "weights": { "path": 4 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.max_arity, Some(8));
        assert_eq!(config.terminal_threshold, Some(4));
        assert_eq!(
            config.weights,
            CostWeights {
                path: 4,
                ..CostWeights::UNIT
            }
        );
    }

    #[test]
    fn load_config_from_file() {
        let path = std::env::temp_dir().join("frida_schedule_load_config.json");
        let config = Configuration::new(512, 4, 20).with_max_arity(8);
        fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
        fs::remove_file(&path).unwrap();

        assert!(matches!(
            load_config(std::env::temp_dir().join("frida_schedule_missing.json")),
            Err(ScheduleError::Config(_))
        ));
    }
}
