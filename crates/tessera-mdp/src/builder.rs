use crate::{
    ActionSpec, Identifier, InitialState, Mdp, MdpError, MdpSpec, OutcomeSpec, RewardModel,
    StateSpec, TransitionModel,
};

#[derive(Debug, Clone)]
/// Incrementally assembles a transition model and its reward overlay.
///
/// Any [`Identifier`] can key states and actions. String-keyed builders can
/// also be exported as an [`MdpSpec`] for YAML IO.
pub struct MdpBuilder<S = String, A = String> {
    transitions: TransitionModel<S, A>,
    rewards: RewardModel<S, A>,
    initial: Option<S>,
}

impl<S: Identifier, A: Identifier> Default for MdpBuilder<S, A> {
    fn default() -> Self {
        Self {
            transitions: TransitionModel::new(),
            rewards: RewardModel::new(),
            initial: None,
        }
    }
}

impl<S: Identifier, A: Identifier> MdpBuilder<S, A> {
    /// Fix the state every reset starts from. Without it the start is random.
    pub fn set_initial(&mut self, state: impl Into<S>) -> &mut Self {
        self.initial = Some(state.into());
        self
    }

    /// Declare a state. It is terminal until an action is added to it.
    pub fn add_state(&mut self, state: impl Into<S>) -> &mut Self {
        self.transitions.add_state(state.into());
        self
    }

    /// Add an action to a declared state.
    pub fn add_action(
        &mut self,
        state: impl Into<S>,
        action: impl Into<A>,
    ) -> Result<&mut Self, MdpError> {
        let state = state.into();
        let action = action.into();

        if !self.transitions.is_declared(&state) {
            return Err(MdpError::BuilderUnknownState {
                state: state.describe(),
            });
        }
        if self.transitions.actions(&state).contains(&action) {
            return Err(MdpError::DuplicateActionId {
                state: state.describe(),
                action: action.describe(),
            });
        }

        self.transitions.add_action(state, action);
        Ok(self)
    }

    /// Set the probability and reward of landing on `next` with an existing
    /// action, replacing an earlier outcome for the same `next`.
    pub fn add_outcome(
        &mut self,
        state: impl Into<S>,
        action: impl Into<A>,
        next: impl Into<S>,
        prob: f64,
        reward: f64,
    ) -> Result<&mut Self, MdpError> {
        let state = state.into();
        let action = action.into();
        let next = next.into();

        if !self.transitions.is_declared(&state) {
            return Err(MdpError::BuilderUnknownState {
                state: state.describe(),
            });
        }
        if !self.transitions.actions(&state).contains(&action) {
            return Err(MdpError::BuilderUnknownAction {
                state: state.describe(),
                action: action.describe(),
            });
        }

        self.rewards
            .insert(state.clone(), action.clone(), next.clone(), reward);
        self.transitions.insert(state, action, next, prob);
        Ok(self)
    }

    /// The assembled models and the start rule, unvalidated.
    pub fn into_parts(self) -> (TransitionModel<S, A>, RewardModel<S, A>, InitialState<S>) {
        let initial = match self.initial {
            Some(state) => InitialState::Fixed(state),
            None => InitialState::Random,
        };
        (self.transitions, self.rewards, initial)
    }

    /// Validate the models and build a seeded engine.
    pub fn compile(self, seed: u64) -> Result<Mdp<S, A>, MdpError> {
        let (transitions, rewards, initial) = self.into_parts();
        Mdp::with_seed(transitions, rewards, initial, seed)
    }
}

impl MdpBuilder {
    /// Create a string-keyed builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Export the model as a validated YAML schema. Zero rewards are omitted.
    pub fn build_spec(self) -> Result<MdpSpec, MdpError> {
        let states = self
            .transitions
            .declared_states()
            .map(|state| {
                let actions = self
                    .transitions
                    .actions(state)
                    .iter()
                    .map(|action| ActionSpec {
                        id: action.clone(),
                        outcomes: self
                            .transitions
                            .outcomes(state, action)
                            .unwrap_or(&[])
                            .iter()
                            .map(|(next, prob)| OutcomeSpec {
                                next: next.clone(),
                                prob: *prob,
                                reward: self
                                    .rewards
                                    .get(state, action, next)
                                    .filter(|reward| *reward != 0.0),
                            })
                            .collect(),
                    })
                    .collect();

                StateSpec {
                    id: state.clone(),
                    terminal: None,
                    actions: Some(actions),
                }
            })
            .collect();

        let spec = MdpSpec {
            version: Some(1),
            initial: self.initial,
            states,
        };
        spec.validate()?;
        Ok(spec)
    }
}
