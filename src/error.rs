use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A configuration field violates its constraint.
    #[error("invalid parameter `{field}`: {value}")]
    InvalidParameter { field: String, value: usize },

    /// No sequence of allowed arities reduces the domain exactly to the terminal threshold.
    #[error(
        "no folding strategy reduces a domain of size {domain_size} to the terminal threshold {terminal_threshold}"
    )]
    NoFeasibleStrategy {
        domain_size: usize,
        terminal_threshold: usize,
    },

    #[error("arithmetic overflow while computing the {0}")]
    ArithmeticOverflow(&'static str),

    #[error("failed to load configuration: {0}")]
    Config(String),
}

impl ScheduleError {
    pub(crate) fn invalid(field: impl Into<String>, value: usize) -> Self {
        ScheduleError::InvalidParameter {
            field: field.into(),
            value,
        }
    }
}
