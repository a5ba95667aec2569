use thiserror::Error;

/// Error type for checkpoint capture, restore, and the wrapped environment.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode checkpoint: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode checkpoint: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("cannot load a snapshot while an irrevocable recording session is active")]
    RecordingConflict,

    #[error("environment failed: {0}")]
    Environment(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SnapshotError {
    pub(crate) fn environment<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SnapshotError::Environment(Box::new(err))
    }
}
