use thiserror::Error;

use tessera_core::SampleError;

#[derive(Debug, Error)]
/// Error type for MDP validation, simulation, planning, and YAML IO.
///
/// State and action identifiers are carried as rendered by
/// [`Identifier::describe`](crate::Identifier::describe).
pub enum MdpError {
    #[error("failed to read YAML file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("model declares no states")]
    EmptyModel,

    #[error("the absent value '{state}' cannot be used as a state identifier")]
    AbsentState { state: String },

    #[error("the absent value '{action}' cannot be an action identifier in state '{state}'")]
    AbsentAction { state: String, action: String },

    #[error("reward entry ('{state}', '{action}', '{next}') uses an absent identifier")]
    AbsentRewardKey {
        state: String,
        action: String,
        next: String,
    },

    #[error("from state '{state}' action '{action}' leads to no next states")]
    EmptyOutcomes { state: String, action: String },

    #[error(
        "invalid probability for state '{state}', action '{action}', next state '{next}': {value}"
    )]
    InvalidProbability {
        state: String,
        action: String,
        next: String,
        value: f64,
    },

    #[error(
        "next state probabilities for state '{state}' action '{action}' add up to {sum} \
         (should be {expected} within {tolerance})"
    )]
    ProbabilitySum {
        state: String,
        action: String,
        sum: f64,
        expected: f64,
        tolerance: f64,
    },

    #[error("invalid reward for state '{state}', action '{action}', next state '{next}': {value}")]
    InvalidReward {
        state: String,
        action: String,
        next: String,
        value: f64,
    },

    #[error("duplicate state id '{id}'")]
    DuplicateStateId { id: String },

    #[error("duplicate action id '{action}' in state '{state}'")]
    DuplicateActionId { state: String, action: String },

    #[error("state '{state}' is terminal and cannot declare actions")]
    TerminalStateHasActions { state: String },

    #[error("cannot do action '{action}' from state '{state}'")]
    InvalidAction { state: String, action: String },

    #[error("initial state '{state}' is not a state of the model")]
    InvalidInitialState { state: String },

    #[error("no value estimate for state '{state}'")]
    MissingStateValue { state: String },

    #[error("builder referenced unknown state '{state}'")]
    BuilderUnknownState { state: String },

    #[error("builder referenced unknown action '{action}' in state '{state}'")]
    BuilderUnknownAction { state: String, action: String },

    #[error("failed to sample next state: {0}")]
    Sample(#[from] SampleError),
}

impl MdpError {
    /// Whether this error describes a malformed transition or reward model.
    pub fn is_model_inconsistency(&self) -> bool {
        matches!(
            self,
            MdpError::EmptyModel
                | MdpError::AbsentState { .. }
                | MdpError::AbsentAction { .. }
                | MdpError::AbsentRewardKey { .. }
                | MdpError::EmptyOutcomes { .. }
                | MdpError::InvalidProbability { .. }
                | MdpError::ProbabilitySum { .. }
                | MdpError::InvalidReward { .. }
                | MdpError::DuplicateStateId { .. }
                | MdpError::DuplicateActionId { .. }
                | MdpError::TerminalStateHasActions { .. }
        )
    }
}
