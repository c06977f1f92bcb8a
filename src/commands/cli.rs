use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::{
    core::{load_config, Configuration, CostWeights},
    error::ScheduleError,
};

#[derive(Parser)]
#[command(name = "frida-schedule")]
#[command(about = "Finds FRI folding strategies with the smallest estimated proof size", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Subcommand, Debug)]
pub(super) enum Commands {
    /// Compute the optimal folding strategy for one configuration
    Optimize {
        #[command(flatten)]
        params: ParamsArgs,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Also report the size in bytes over this field
        #[arg(long, value_enum)]
        field: Option<FieldKind>,
    },
    /// Compare the optimal strategy with fixed-arity and winterfell schedules
    Compare {
        #[command(flatten)]
        params: ParamsArgs,
        /// Folding factor of the winterfell schedule
        #[arg(long, default_value = "4")]
        folding_factor: usize,
        /// Maximum remainder degree of the winterfell schedule
        #[arg(long, default_value = "7")]
        remainder_max_degree: usize,
    },
    /// Compute optimal strategies over a grid of parameters and save them as CSV
    Sweep {
        /// Degree bounds, comma separated
        #[arg(long, value_delimiter = ',', value_parser = clap::value_parser!(usize), default_value = "1024,4096,16384,65536")]
        degree: Vec<usize>,
        /// Blowup factors, comma separated
        #[arg(long, value_delimiter = ',', value_parser = clap::value_parser!(usize), default_value = "2,4,8")]
        blowup: Vec<usize>,
        /// Query counts, comma separated
        #[arg(long, value_delimiter = ',', value_parser = clap::value_parser!(usize), default_value = "16,32,64")]
        num_queries: Vec<usize>,
        /// Largest folding factor considered
        #[arg(long, default_value = "16")]
        max_arity: usize,
        /// Domain size at which folding stops
        #[arg(long, default_value = "1")]
        terminal_threshold: usize,
        /// Cost weights preset
        #[arg(long, value_enum, default_value = "unit")]
        weights: WeightPreset,
        /// Path to write the CSV results
        #[arg(long, default_value = "results/sweep.csv")]
        output: PathBuf,
    },
}

/// Parameters of a single configuration, from the command line or a JSON file.
#[derive(Args, Debug)]
pub(super) struct ParamsArgs {
    /// Degree bound of the committed polynomial
    #[arg(required_unless_present = "config")]
    pub(super) degree: Option<usize>,
    /// Blowup factor of the evaluation domain
    #[arg(required_unless_present = "config")]
    pub(super) blowup: Option<usize>,
    /// Number of verifier queries
    #[arg(required_unless_present = "config")]
    pub(super) num_queries: Option<usize>,
    /// Largest folding factor considered
    #[arg(long)]
    pub(super) max_arity: Option<usize>,
    /// Domain size at which folding stops
    #[arg(long)]
    pub(super) terminal_threshold: Option<usize>,
    /// Cost weights preset
    #[arg(long, value_enum)]
    pub(super) weights: Option<WeightPreset>,
    /// JSON configuration file; other flags override its values
    #[arg(long)]
    pub(super) config: Option<PathBuf>,
}

impl ParamsArgs {
    pub(super) fn configuration(&self) -> Result<Configuration, ScheduleError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            // clap requires the positional parameters when no file is given
            None => Configuration::new(
                self.degree.unwrap_or_default(),
                self.blowup.unwrap_or_default(),
                self.num_queries.unwrap_or_default(),
            ),
        };

        if let Some(degree) = self.degree {
            config.initial_degree_bound = degree;
        }
        if let Some(blowup) = self.blowup {
            config.blowup_factor = blowup;
        }
        if let Some(num_queries) = self.num_queries {
            config.num_queries = num_queries;
        }
        if self.max_arity.is_some() {
            config.max_arity = self.max_arity;
        }
        if self.terminal_threshold.is_some() {
            config.terminal_threshold = self.terminal_threshold;
        }
        if let Some(weights) = self.weights {
            config.weights = weights.into();
        }
        Ok(config)
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeightPreset {
    /// Every value and path node counts as one field element
    Unit,
    /// Path nodes are 4-element digests and values are extension-field elements
    HashDigest,
}

impl From<WeightPreset> for CostWeights {
    fn from(preset: WeightPreset) -> Self {
        match preset {
            WeightPreset::Unit => CostWeights::UNIT,
            WeightPreset::HashDigest => CostWeights::HASH_DIGEST,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    #[value(name = "f64")]
    F64,
    #[value(name = "f128")]
    F128,
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::F64 => "f64",
            FieldKind::F128 => "f128",
        }
    }
}
