use std::{fmt, sync::Arc};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tessera_core::{Environment, StepOutcome, choose_index};

use crate::{Identifier, MdpError, RewardModel, TransitionModel};

/// Where `reset` puts the process.
#[derive(Clone)]
pub enum InitialState<S> {
    /// Always start in this state.
    Fixed(S),
    /// Pick uniformly among the declared states.
    Random,
    /// Ask a producer for the start state on every reset.
    Generator(Arc<dyn Fn() -> S + Send + Sync>),
}

impl<S> InitialState<S> {
    pub fn generator(produce: impl Fn() -> S + Send + Sync + 'static) -> Self {
        InitialState::Generator(Arc::new(produce))
    }
}

impl<S: fmt::Debug> fmt::Debug for InitialState<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitialState::Fixed(state) => f.debug_tuple("Fixed").field(state).finish(),
            InitialState::Random => f.write_str("Random"),
            InitialState::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

#[derive(Debug, Clone)]
/// Seeded Markov decision process over an explicit transition and reward model.
///
/// The engine always has a current state: construction performs the first
/// reset. Only `reset` and `step` move it.
pub struct Mdp<S, A> {
    transitions: TransitionModel<S, A>,
    rewards: RewardModel<S, A>,
    initial: InitialState<S>,
    current: S,
    rng: ChaCha8Rng,
}

impl<S: Identifier, A: Identifier> Mdp<S, A> {
    /// Validate the models and start the process with an entropy-seeded RNG.
    pub fn new(
        transitions: TransitionModel<S, A>,
        rewards: RewardModel<S, A>,
        initial: InitialState<S>,
    ) -> Result<Self, MdpError> {
        Self::with_rng(transitions, rewards, initial, ChaCha8Rng::from_entropy())
    }

    /// Validate the models and start the process with a deterministic RNG seed.
    pub fn with_seed(
        transitions: TransitionModel<S, A>,
        rewards: RewardModel<S, A>,
        initial: InitialState<S>,
        seed: u64,
    ) -> Result<Self, MdpError> {
        Self::with_rng(
            transitions,
            rewards,
            initial,
            ChaCha8Rng::seed_from_u64(seed),
        )
    }

    fn with_rng(
        mut transitions: TransitionModel<S, A>,
        rewards: RewardModel<S, A>,
        initial: InitialState<S>,
        mut rng: ChaCha8Rng,
    ) -> Result<Self, MdpError> {
        transitions.validate()?;
        rewards.validate()?;
        transitions.register_next_states();

        let current = resolve_initial(&initial, &transitions, &mut rng)?;
        log::debug!(
            "mdp ready with {} states, starting at {current:?}",
            transitions.len()
        );

        Ok(Mdp {
            transitions,
            rewards,
            initial,
            current,
            rng,
        })
    }

    /// Every state of the process, including next states that only appear as
    /// transition targets.
    pub fn all_states(&self) -> &[S] {
        self.transitions.states()
    }

    /// Actions available from `state`, in declaration order.
    pub fn actions(&self, state: &S) -> &[A] {
        self.transitions.actions(state)
    }

    /// A state is terminal exactly when it has no actions.
    pub fn is_terminal(&self, state: &S) -> bool {
        self.actions(state).is_empty()
    }

    /// `(next state, probability)` pairs reachable with `action` from `state`.
    pub fn next_states(&self, state: &S, action: &A) -> Result<&[(S, f64)], MdpError> {
        self.transitions
            .outcomes(state, action)
            .ok_or_else(|| invalid_action(state, action))
    }

    /// `P(next | state, action)`.
    pub fn transition_probability(&self, state: &S, action: &A, next: &S) -> Result<f64, MdpError> {
        let prob = self
            .next_states(state, action)?
            .iter()
            .find(|(candidate, _)| candidate == next)
            .map_or(0.0, |(_, prob)| *prob);
        Ok(prob)
    }

    /// `r(state, action, next)`, zero when the model does not list it.
    pub fn reward(&self, state: &S, action: &A, next: &S) -> Result<f64, MdpError> {
        if self.transitions.outcomes(state, action).is_none() {
            return Err(invalid_action(state, action));
        }
        Ok(self.rewards.get(state, action, next).unwrap_or(0.0))
    }

    /// Borrow the transition model.
    pub fn transitions(&self) -> &TransitionModel<S, A> {
        &self.transitions
    }

    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// Move to a fresh initial state and return it.
    pub fn reset(&mut self) -> Result<S, MdpError> {
        self.current = resolve_initial(&self.initial, &self.transitions, &mut self.rng)?;
        log::debug!("mdp reset to {:?}", self.current);
        Ok(self.current.clone())
    }

    /// Sample the next state for `action`, move there, and report
    /// `(next_state, reward, done)`.
    pub fn step(&mut self, action: &A) -> Result<(S, f64, bool), MdpError> {
        let outcomes = self
            .transitions
            .outcomes(&self.current, action)
            .ok_or_else(|| invalid_action(&self.current, action))?;

        let weights: Vec<f64> = outcomes.iter().map(|(_, prob)| *prob).collect();
        let chosen = choose_index(&weights, &mut self.rng)?;
        let next = outcomes[chosen].0.clone();

        let reward = self
            .rewards
            .get(&self.current, action, &next)
            .unwrap_or(0.0);
        let done = self.is_terminal(&next);

        log::trace!(
            "{:?} --{action:?}--> {next:?} (reward {reward}, done {done})",
            self.current
        );
        self.current = next.clone();

        Ok((next, reward, done))
    }
}

impl<S: Identifier, A: Identifier> Environment for Mdp<S, A> {
    type Observation = S;
    type Action = A;
    type Info = ();
    type Error = MdpError;

    fn reset(&mut self) -> Result<S, MdpError> {
        Mdp::reset(self)
    }

    fn step(&mut self, action: &A) -> Result<StepOutcome<S, ()>, MdpError> {
        let (observation, reward, done) = Mdp::step(self, action)?;
        Ok(StepOutcome {
            observation,
            reward,
            done,
            info: (),
        })
    }
}

fn resolve_initial<S: Identifier, A: Identifier>(
    initial: &InitialState<S>,
    transitions: &TransitionModel<S, A>,
    rng: &mut ChaCha8Rng,
) -> Result<S, MdpError> {
    let state = match initial {
        InitialState::Fixed(state) => state.clone(),
        InitialState::Random => {
            let mut declared = transitions.declared_states();
            let count = declared.len();
            if count == 0 {
                return Err(MdpError::EmptyModel);
            }
            match declared.nth(rng.gen_range(0..count)) {
                Some(state) => state.clone(),
                None => return Err(MdpError::EmptyModel),
            }
        }
        InitialState::Generator(produce) => produce(),
    };

    // Next states that were only registered as targets cannot start an episode.
    if !transitions.is_declared(&state) {
        return Err(MdpError::InvalidInitialState {
            state: state.describe(),
        });
    }

    Ok(state)
}

fn invalid_action<S: Identifier, A: Identifier>(state: &S, action: &A) -> MdpError {
    MdpError::InvalidAction {
        state: state.describe(),
        action: action.describe(),
    }
}
