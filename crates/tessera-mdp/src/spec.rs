use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{InitialState, Mdp, MdpError, RewardModel, TransitionModel};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Serializable MDP schema used for YAML IO and validation.
pub struct MdpSpec {
    /// Schema version for future compatibility checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    /// String id of the initial state; a random state when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<String>,
    /// All state declarations in the model.
    pub states: Vec<StateSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A single state declaration in the MDP schema.
pub struct StateSpec {
    /// Unique state id.
    pub id: String,
    /// Optional explicit terminal flag; a terminal state may not declare actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<bool>,
    /// Available actions from this state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ActionSpec>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A named action and its stochastic outcomes.
pub struct ActionSpec {
    pub id: String,
    pub outcomes: Vec<OutcomeSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// One probabilistic transition for an action.
pub struct OutcomeSpec {
    pub next: String,
    pub prob: f64,
    /// Reward for landing on `next`; zero when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<f64>,
}

impl MdpSpec {
    /// Validate schema-level rules, then the resulting models.
    pub fn validate(&self) -> Result<(), MdpError> {
        let mut ids = HashSet::with_capacity(self.states.len());
        for state in &self.states {
            if !ids.insert(state.id.as_str()) {
                return Err(MdpError::DuplicateStateId {
                    id: state.id.clone(),
                });
            }

            let actions = state.actions.as_deref().unwrap_or(&[]);
            if state.terminal.unwrap_or(false) && !actions.is_empty() {
                return Err(MdpError::TerminalStateHasActions {
                    state: state.id.clone(),
                });
            }

            let mut action_ids = HashSet::with_capacity(actions.len());
            for action in actions {
                if !action_ids.insert(action.id.as_str()) {
                    return Err(MdpError::DuplicateActionId {
                        state: state.id.clone(),
                        action: action.id.clone(),
                    });
                }
            }
        }

        if let Some(initial) = &self.initial {
            if !ids.contains(initial.as_str()) {
                return Err(MdpError::InvalidInitialState {
                    state: initial.clone(),
                });
            }
        }

        self.transition_model().validate()?;
        self.reward_model().validate()
    }

    /// Build the transition model declared by this spec.
    pub fn transition_model(&self) -> TransitionModel<String, String> {
        let mut model = TransitionModel::new();
        for state in &self.states {
            model.add_state(state.id.clone());
            for action in state.actions.as_deref().unwrap_or(&[]) {
                model.add_action(state.id.clone(), action.id.clone());
                for outcome in &action.outcomes {
                    model.insert(
                        state.id.clone(),
                        action.id.clone(),
                        outcome.next.clone(),
                        outcome.prob,
                    );
                }
            }
        }
        model
    }

    /// Build the reward overlay from the outcomes that list a reward.
    pub fn reward_model(&self) -> RewardModel<String, String> {
        let mut model = RewardModel::new();
        for state in &self.states {
            for action in state.actions.as_deref().unwrap_or(&[]) {
                for outcome in &action.outcomes {
                    if let Some(reward) = outcome.reward {
                        model.insert(
                            state.id.clone(),
                            action.id.clone(),
                            outcome.next.clone(),
                            reward,
                        );
                    }
                }
            }
        }
        model
    }

    /// The initial-state rule declared by this spec.
    pub fn initial_state(&self) -> InitialState<String> {
        match &self.initial {
            Some(id) => InitialState::Fixed(id.clone()),
            None => InitialState::Random,
        }
    }

    /// Validate and build a seeded engine.
    pub fn compile(&self, seed: u64) -> Result<Mdp<String, String>, MdpError> {
        self.validate()?;
        Mdp::with_seed(
            self.transition_model(),
            self.reward_model(),
            self.initial_state(),
            seed,
        )
    }
}
