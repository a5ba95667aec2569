use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::{Agent, Checkpoint, Environment, Snapshot, SnapshotError, StepOutcome};

/// One-dimensional walk with seeded noise, terminating at `|position| >= 4`
/// or after `horizon` steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct NoisyWalk {
    pub position: i64,
    pub steps: u32,
    pub horizon: u32,
    noise: u64,
    #[serde(skip)]
    pub viewer: Option<u32>,
}

impl NoisyWalk {
    pub fn new(seed: u64, horizon: u32) -> Self {
        NoisyWalk {
            position: 0,
            steps: 0,
            horizon,
            noise: seed | 1,
            viewer: None,
        }
    }

    fn next_noise(&mut self) -> i64 {
        self.noise ^= self.noise << 13;
        self.noise ^= self.noise >> 7;
        self.noise ^= self.noise << 17;
        (self.noise % 3) as i64 - 1
    }
}

impl Environment for NoisyWalk {
    type Observation = i64;
    type Action = i64;
    type Info = u32;
    type Error = Infallible;

    fn reset(&mut self) -> Result<i64, Infallible> {
        self.position = 0;
        self.steps = 0;
        Ok(self.position)
    }

    fn step(&mut self, action: &i64) -> Result<StepOutcome<i64, u32>, Infallible> {
        self.position += action + self.next_noise();
        self.steps += 1;
        Ok(StepOutcome {
            observation: self.position,
            reward: -(self.position.abs() as f64),
            done: self.position.abs() >= 4 || self.steps >= self.horizon,
            info: self.steps,
        })
    }
}

impl Snapshot for NoisyWalk {
    fn serialize_state(&self) -> Result<Checkpoint, SnapshotError> {
        Checkpoint::encode(self)
    }

    fn deserialize_state(checkpoint: &Checkpoint) -> Result<Self, SnapshotError> {
        checkpoint.decode()
    }

    fn release_transient(&mut self) {
        self.viewer = None;
    }
}

/// Agent with one value per action in `[-1, 0, 1]` that replays a fixed script
/// when sampling and always moves right when greedy.
pub(crate) struct ScriptedAgent {
    pub script: Vec<i64>,
    pub cursor: usize,
}

impl Agent<i64, i64> for ScriptedAgent {
    fn action_values(&mut self, observation: &i64) -> Vec<f64> {
        vec![*observation as f64, 0.0, 1.0]
    }

    fn sample_action(&mut self, _action_values: &[f64]) -> i64 {
        let action = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        action
    }

    fn greedy_action(&mut self, action_values: &[f64]) -> i64 {
        let best = action_values
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(idx, _)| idx)
            .unwrap_or(1);
        best as i64 - 1
    }
}
