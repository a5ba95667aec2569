/// Everything an environment reports back after one step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome<O, I> {
    pub observation: O,
    pub reward: f64,
    pub done: bool,
    pub info: I,
}

/// Capability set of an external simulation driven one action at a time.
///
/// Observations and actions are opaque to this crate. The only structure
/// assumed is that observations can be copied into the replay buffer.
pub trait Environment {
    type Observation: Clone;
    type Action: Clone;
    type Info;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Start a new episode and return its first observation.
    fn reset(&mut self) -> Result<Self::Observation, Self::Error>;

    /// Apply `action` to the live simulation.
    fn step(
        &mut self,
        action: &Self::Action,
    ) -> Result<StepOutcome<Self::Observation, Self::Info>, Self::Error>;
}

/// Decision model consumed by the driver loops.
///
/// How action values are produced is up to the implementor.
pub trait Agent<O, A> {
    /// Estimate the value of every action available after `observation`.
    fn action_values(&mut self, observation: &O) -> Vec<f64>;

    /// Pick an action for exploration from the given estimates.
    fn sample_action(&mut self, action_values: &[f64]) -> A;

    /// Pick the highest-valued action.
    fn greedy_action(&mut self, action_values: &[f64]) -> A;
}
