/// Largest folding factor considered by the search. Matches the largest factor supported by
/// winterfell's FRI prover.
pub const MAX_ARITY: usize = 16;

/// Domain size at which folding stops when a configuration does not specify one.
pub const DEFAULT_TERMINAL_THRESHOLD: usize = 1;

/// Initial evaluation domains above `2^MAX_DOMAIN_SIZE_LOG2` points are rejected.
pub const MAX_DOMAIN_SIZE_LOG2: u32 = 40;
