//! # Frida-schedule
//!
//! Chooses the folding factors of a FRI (Fast Reed-Solomon Interactive Oracle Proofs of
//! Proximity) commitment. Given the degree bound, blowup factor and query count, it finds the
//! sequence of per-round arities minimizing a heuristic estimate of the proof size, counted in
//! field elements. The estimate only ranks strategies against each other; it does not model the
//! exact size of a serialized proof.
//!
//! ## Core Components
//!
//! - **Configuration (`core::config`):** The `Configuration` type, its validation and JSON loading.
//! - **Cost model (`core::cost`):** Per-round and remainder costs, with optional `CostWeights`.
//! - **Search (`core::search`):** The bottom-up dynamic program selecting the cheapest arities.
//! - **Strategies (`core::strategy`):** `compute_optimal_strategy`, evaluation of a given
//!   sequence, and the fixed-arity and winterfell baselines used for comparison.

#[cfg(any(test, feature = "cli"))]
pub mod commands;
pub mod constants;
pub mod core;
pub mod error;
pub mod utils;
pub mod winterfell;

pub use crate::core::{
    compute_optimal_strategies, compute_optimal_strategy, compute_optimal_strategy_for,
    Configuration, CostWeights, StrategyResult,
};
pub use error::ScheduleError;
