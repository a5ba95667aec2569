use std::collections::HashMap;

use crate::{Identifier, MdpError};

/// Floating point tolerance used when validating probability sums.
pub const PROB_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone)]
/// Ordered mapping `state -> action -> next state -> probability`.
///
/// States and actions keep their insertion order. A state without actions is
/// terminal. States that only show up as next states once an engine owns the
/// model are known but not declared.
pub struct TransitionModel<S, A> {
    states: Vec<S>,
    actions: Vec<Vec<A>>,
    outcomes: Vec<Vec<Vec<(S, f64)>>>,
    state_to_index: HashMap<S, usize>,
    declared: Vec<usize>,
    declared_mask: Vec<bool>,
}

impl<S: Identifier, A: Identifier> Default for TransitionModel<S, A> {
    fn default() -> Self {
        Self {
            states: Vec::new(),
            actions: Vec::new(),
            outcomes: Vec::new(),
            state_to_index: HashMap::new(),
            declared: Vec::new(),
            declared_mask: Vec::new(),
        }
    }
}

impl<S: Identifier, A: Identifier> TransitionModel<S, A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a state. It stays terminal until an action is added to it.
    pub fn add_state(&mut self, state: S) -> &mut Self {
        self.index_or_insert(state);
        self
    }

    /// Declare an action from `state` without any outcomes yet.
    pub fn add_action(&mut self, state: S, action: A) -> &mut Self {
        let idx = self.index_or_insert(state);
        self.action_index_or_insert(idx, action);
        self
    }

    /// Set `P(next | state, action)`, replacing any earlier value for the triple.
    pub fn insert(&mut self, state: S, action: A, next: S, prob: f64) -> &mut Self {
        let idx = self.index_or_insert(state);
        let action_idx = self.action_index_or_insert(idx, action);
        let outcomes = &mut self.outcomes[idx][action_idx];

        match outcomes.iter_mut().find(|(known, _)| *known == next) {
            Some(entry) => entry.1 = prob,
            None => outcomes.push((next, prob)),
        }
        self
    }

    fn index_or_insert(&mut self, state: S) -> usize {
        let idx = self.index_or_register(state);
        if !self.declared_mask[idx] {
            self.declared_mask[idx] = true;
            self.declared.push(idx);
        }
        idx
    }

    fn index_or_register(&mut self, state: S) -> usize {
        if let Some(idx) = self.state_to_index.get(&state) {
            return *idx;
        }

        let idx = self.states.len();
        self.states.push(state.clone());
        self.actions.push(Vec::new());
        self.outcomes.push(Vec::new());
        self.declared_mask.push(false);
        self.state_to_index.insert(state, idx);
        idx
    }

    fn action_index_or_insert(&mut self, state_idx: usize, action: A) -> usize {
        let actions = &mut self.actions[state_idx];
        if let Some(pos) = actions.iter().position(|known| *known == action) {
            return pos;
        }

        actions.push(action);
        self.outcomes[state_idx].push(Vec::new());
        actions.len() - 1
    }

    /// Every known state in insertion order, including registered next states.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn contains(&self, state: &S) -> bool {
        self.state_to_index.contains_key(state)
    }

    /// States that were added explicitly or have outgoing transitions, in
    /// declaration order.
    pub fn declared_states(&self) -> impl ExactSizeIterator<Item = &S> + '_ {
        self.declared.iter().map(|idx| &self.states[*idx])
    }

    pub fn is_declared(&self, state: &S) -> bool {
        self.state_to_index
            .get(state)
            .is_some_and(|idx| self.declared_mask[*idx])
    }

    /// Actions available from `state`; empty for terminal or unknown states.
    pub fn actions(&self, state: &S) -> &[A] {
        self.state_to_index
            .get(state)
            .map(|idx| self.actions[*idx].as_slice())
            .unwrap_or(&[])
    }

    /// `(next state, probability)` pairs for an available action.
    pub fn outcomes(&self, state: &S, action: &A) -> Option<&[(S, f64)]> {
        let idx = *self.state_to_index.get(state)?;
        let action_idx = self.actions[idx].iter().position(|known| known == action)?;
        Some(self.outcomes[idx][action_idx].as_slice())
    }

    /// Declare every next state that is not a state yet. They have no
    /// actions, so they are terminal.
    pub(crate) fn register_next_states(&mut self) {
        let targets: Vec<S> = self
            .outcomes
            .iter()
            .flatten()
            .flatten()
            .map(|(next, _)| next)
            .filter(|next| !self.state_to_index.contains_key(*next))
            .cloned()
            .collect();

        for next in targets {
            self.index_or_register(next);
        }
    }

    /// Validate the model using the crate default tolerance.
    pub fn validate(&self) -> Result<(), MdpError> {
        self.validate_with_tolerance(PROB_TOLERANCE)
    }

    /// Validate keys, outcome sets, and probability sums.
    pub fn validate_with_tolerance(&self, tolerance: f64) -> Result<(), MdpError> {
        if self.states.is_empty() {
            return Err(MdpError::EmptyModel);
        }

        for (idx, state) in self.states.iter().enumerate() {
            if state.is_absent() {
                return Err(MdpError::AbsentState {
                    state: state.describe(),
                });
            }

            for (action, outcomes) in self.actions[idx].iter().zip(&self.outcomes[idx]) {
                if action.is_absent() {
                    return Err(MdpError::AbsentAction {
                        state: state.describe(),
                        action: action.describe(),
                    });
                }

                if outcomes.is_empty() {
                    return Err(MdpError::EmptyOutcomes {
                        state: state.describe(),
                        action: action.describe(),
                    });
                }

                let mut sum = 0.0_f64;
                for (next, prob) in outcomes {
                    if next.is_absent() {
                        return Err(MdpError::AbsentState {
                            state: next.describe(),
                        });
                    }

                    if !prob.is_finite() || *prob < 0.0 {
                        return Err(MdpError::InvalidProbability {
                            state: state.describe(),
                            action: action.describe(),
                            next: next.describe(),
                            value: *prob,
                        });
                    }

                    sum += prob;
                }

                if (sum - 1.0).abs() > tolerance {
                    return Err(MdpError::ProbabilitySum {
                        state: state.describe(),
                        action: action.describe(),
                        sum,
                        expected: 1.0,
                        tolerance,
                    });
                }
            }
        }

        Ok(())
    }
}

impl<S: Identifier, A: Identifier> FromIterator<(S, A, S, f64)> for TransitionModel<S, A> {
    fn from_iter<I: IntoIterator<Item = (S, A, S, f64)>>(iter: I) -> Self {
        let mut model = Self::new();
        for (state, action, next, prob) in iter {
            model.insert(state, action, next, prob);
        }
        model
    }
}

#[derive(Debug, Clone)]
/// Reward overlay `state -> action -> next state -> reward`.
///
/// Unlisted triples are worth zero. Keys do not have to match the transition
/// model.
pub struct RewardModel<S, A> {
    rewards: HashMap<S, HashMap<A, HashMap<S, f64>>>,
}

impl<S: Identifier, A: Identifier> Default for RewardModel<S, A> {
    fn default() -> Self {
        Self {
            rewards: HashMap::new(),
        }
    }
}

impl<S: Identifier, A: Identifier> RewardModel<S, A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `r(state, action, next)`, replacing any earlier value.
    pub fn insert(&mut self, state: S, action: A, next: S, reward: f64) -> &mut Self {
        self.rewards
            .entry(state)
            .or_default()
            .entry(action)
            .or_default()
            .insert(next, reward);
        self
    }

    /// Listed reward for the triple, if any.
    pub fn get(&self, state: &S, action: &A, next: &S) -> Option<f64> {
        self.rewards.get(state)?.get(action)?.get(next).copied()
    }

    /// Number of listed triples.
    pub fn len(&self) -> usize {
        self.rewards
            .values()
            .flat_map(HashMap::values)
            .map(HashMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reject absent identifiers and non-finite rewards.
    pub fn validate(&self) -> Result<(), MdpError> {
        for (state, by_action) in &self.rewards {
            for (action, by_next) in by_action {
                for (next, reward) in by_next {
                    if state.is_absent() || action.is_absent() || next.is_absent() {
                        return Err(MdpError::AbsentRewardKey {
                            state: state.describe(),
                            action: action.describe(),
                            next: next.describe(),
                        });
                    }

                    if !reward.is_finite() {
                        return Err(MdpError::InvalidReward {
                            state: state.describe(),
                            action: action.describe(),
                            next: next.describe(),
                            value: *reward,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

impl<S: Identifier, A: Identifier> FromIterator<(S, A, S, f64)> for RewardModel<S, A> {
    fn from_iter<I: IntoIterator<Item = (S, A, S, f64)>>(iter: I) -> Self {
        let mut model = Self::new();
        for (state, action, next, reward) in iter {
            model.insert(state, action, next, reward);
        }
        model
    }
}
