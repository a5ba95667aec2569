use std::{fmt, sync::Arc};

use serde::{Serialize, de::DeserializeOwned};

use crate::snapshot::error::SnapshotError;

/// Opaque, immutable copy of a simulation's full state at one instant.
///
/// Cloning shares the bytes; nothing can mutate them after capture, so a
/// checkpoint can be handed to any number of readers or threads.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Checkpoint(Arc<[u8]>);

impl Checkpoint {
    /// Wrap already-serialized state.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Checkpoint(Arc::from(bytes.into()))
    }

    /// Serialize `state` into a checkpoint.
    pub fn encode<T: Serialize>(state: &T) -> Result<Self, SnapshotError> {
        let bytes = serde_json::to_vec(state).map_err(SnapshotError::Encode)?;
        Ok(Self::from_bytes(bytes))
    }

    /// Rebuild an independent value from this checkpoint.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, SnapshotError> {
        serde_json::from_slice(&self.0).map_err(SnapshotError::Decode)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Checkpoint({} bytes)", self.0.len())
    }
}

impl AsRef<[u8]> for Checkpoint {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
