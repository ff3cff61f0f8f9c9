use thiserror::Error;

/// Failure of a normalization step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The schema or dependency set is malformed: empty universe, empty side of a
    /// dependency, unknown attribute and the like.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An algorithm produced a state it should never reach.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),

    /// Well-formed input that the selected mode refuses, e.g. a multi-attribute RHS under
    /// strict RHS checking.
    #[error("unsupported input shape: {0}")]
    UnsupportedShape(String),
}

pub type Result<T, E = NormalizeError> = std::result::Result<T, E>;
