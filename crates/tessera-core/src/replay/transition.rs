/// One recorded `(o, a, r, o', done)` step.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<O, A> {
    pub observation: O,
    pub action: A,
    pub reward: f64,
    pub next_observation: O,
    pub done: bool,
}

impl<O, A> Transition<O, A> {
    pub fn new(observation: O, action: A, reward: f64, next_observation: O, done: bool) -> Self {
        Transition {
            observation,
            action,
            reward,
            next_observation,
            done,
        }
    }
}

/// A sampled batch stored field by field.
///
/// Entry `i` of every field belongs to the same transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<O, A> {
    pub observations: Vec<O>,
    pub actions: Vec<A>,
    pub rewards: Vec<f64>,
    pub next_observations: Vec<O>,
    pub dones: Vec<bool>,
}

impl<O, A> Batch<O, A> {
    pub(crate) fn with_capacity(batch_size: usize) -> Self {
        Batch {
            observations: Vec::with_capacity(batch_size),
            actions: Vec::with_capacity(batch_size),
            rewards: Vec::with_capacity(batch_size),
            next_observations: Vec::with_capacity(batch_size),
            dones: Vec::with_capacity(batch_size),
        }
    }

    pub(crate) fn push(&mut self, transition: &Transition<O, A>)
    where
        O: Clone,
        A: Clone,
    {
        self.observations.push(transition.observation.clone());
        self.actions.push(transition.action.clone());
        self.rewards.push(transition.reward);
        self.next_observations.push(transition.next_observation.clone());
        self.dones.push(transition.done);
    }

    /// Number of transitions in the batch.
    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    /// Reassemble transition `index` from the parallel fields.
    pub fn get(&self, index: usize) -> Option<Transition<O, A>>
    where
        O: Clone,
        A: Clone,
    {
        Some(Transition {
            observation: self.observations.get(index)?.clone(),
            action: self.actions.get(index)?.clone(),
            reward: *self.rewards.get(index)?,
            next_observation: self.next_observations.get(index)?.clone(),
            done: *self.dones.get(index)?,
        })
    }
}
