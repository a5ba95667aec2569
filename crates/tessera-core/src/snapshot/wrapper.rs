use crate::{
    env::{Environment, StepOutcome},
    snapshot::{checkpoint::Checkpoint, error::SnapshotError},
};

/// Environments that can hand out and rebuild from a deep copy of their state.
///
/// Restoring a checkpoint and replaying the same actions must reproduce the
/// same observations, rewards, and done flags, including anything driven by
/// internal randomness.
pub trait Snapshot: Environment + Sized {
    /// Capture the complete internal state.
    fn serialize_state(&self) -> Result<Checkpoint, SnapshotError>;

    /// Build a fresh, independent instance from a checkpoint.
    fn deserialize_state(checkpoint: &Checkpoint) -> Result<Self, SnapshotError>;

    /// Drop handles that cannot be serialized, such as a live viewer.
    ///
    /// Called right before every capture. Rendering has to be paused by the
    /// caller; the handle is not recreated afterwards.
    fn release_transient(&mut self) {}
}

/// Result of exploring one hypothetical action from a checkpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult<O, I> {
    pub snapshot: Checkpoint,
    pub observation: O,
    pub reward: f64,
    pub done: bool,
    pub info: I,
}

/// Save/restore wrapper used by lookahead and planning search.
///
/// `get_result` rewrites the live environment in place, so one wrapper must
/// not serve two branches at once. Parallel branches each get their own
/// wrapper via [`WithSnapshots::from_checkpoint`].
#[derive(Debug, Clone)]
pub struct WithSnapshots<E> {
    env: E,
    recording: bool,
}

impl<E: Snapshot> WithSnapshots<E> {
    pub fn new(env: E) -> Self {
        WithSnapshots {
            env,
            recording: false,
        }
    }

    /// Create an independent wrapper whose live environment starts at `checkpoint`.
    pub fn from_checkpoint(checkpoint: &Checkpoint) -> Result<Self, SnapshotError> {
        Ok(Self::new(E::deserialize_state(checkpoint)?))
    }

    /// Borrow the live environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn into_inner(self) -> E {
        self.env
    }

    /// Start a recording session. There is no way to end it; from now on
    /// the live environment may only move forward.
    pub fn begin_recording(&mut self) {
        log::debug!("recording session started; snapshot loading disabled");
        self.recording = true;
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Capture the live environment.
    pub fn get_snapshot(&mut self) -> Result<Checkpoint, SnapshotError> {
        self.env.release_transient();
        self.env.serialize_state()
    }

    /// Replace the live environment with one rebuilt from `checkpoint`.
    pub fn load_snapshot(&mut self, checkpoint: &Checkpoint) -> Result<(), SnapshotError> {
        if self.recording {
            return Err(SnapshotError::RecordingConflict);
        }

        log::debug!("loading {checkpoint:?}");
        self.env = E::deserialize_state(checkpoint)?;
        Ok(())
    }

    /// Load `checkpoint`, apply `action`, and capture the state that follows.
    pub fn get_result(
        &mut self,
        checkpoint: &Checkpoint,
        action: &E::Action,
    ) -> Result<ActionResult<E::Observation, E::Info>, SnapshotError> {
        self.load_snapshot(checkpoint)?;
        let outcome = self
            .env
            .step(action)
            .map_err(SnapshotError::environment)?;
        let snapshot = self.get_snapshot()?;

        Ok(ActionResult {
            snapshot,
            observation: outcome.observation,
            reward: outcome.reward,
            done: outcome.done,
            info: outcome.info,
        })
    }
}

impl<E: Snapshot> Environment for WithSnapshots<E> {
    type Observation = E::Observation;
    type Action = E::Action;
    type Info = E::Info;
    type Error = SnapshotError;

    fn reset(&mut self) -> Result<Self::Observation, Self::Error> {
        self.env.reset().map_err(SnapshotError::environment)
    }

    fn step(
        &mut self,
        action: &Self::Action,
    ) -> Result<StepOutcome<Self::Observation, Self::Info>, Self::Error> {
        self.env.step(action).map_err(SnapshotError::environment)
    }
}
