mod driver;
mod env;
mod replay;
mod sampling;
mod snapshot;

#[cfg(test)]
mod tests;

pub use driver::{Recorded, evaluate, play_and_record};
pub use env::{Agent, Environment, StepOutcome};
pub use replay::buffer::ReplayBuffer;
pub use replay::config::{ReplayConfig, ReplayConfigError};
pub use replay::error::ReplayError;
pub use replay::transition::{Batch, Transition};
pub use sampling::discount::{DEFAULT_GAMMA, discount, discounted_return};
pub use sampling::error::SampleError;
pub use sampling::weighted::{choose, choose_index};
pub use snapshot::checkpoint::Checkpoint;
pub use snapshot::error::SnapshotError;
pub use snapshot::wrapper::{ActionResult, Snapshot, WithSnapshots};
