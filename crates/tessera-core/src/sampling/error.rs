use thiserror::Error;

/// Error type for weighted sampling over caller-provided weights.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    #[error("cannot sample from an empty sequence")]
    Empty,

    #[error("got {values} values but {weights} weights")]
    LengthMismatch { values: usize, weights: usize },

    #[error("weight at index {index} is negative: {value}")]
    NegativeWeight { index: usize, value: f64 },

    #[error("weight at index {index} is not finite: {value}")]
    NonFiniteWeight { index: usize, value: f64 },

    #[error("weights sum to zero")]
    ZeroTotalWeight,
}
