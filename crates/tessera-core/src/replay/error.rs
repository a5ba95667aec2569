use thiserror::Error;

/// Error type for replay buffer construction and sampling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("replay buffer capacity must be greater than 0")]
    ZeroCapacity,

    #[error("cannot sample from an empty replay buffer")]
    EmptyBuffer,
}
