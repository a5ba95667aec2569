use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::replay::{
    config::ReplayConfig,
    error::ReplayError,
    transition::{Batch, Transition},
};

/// Fixed-capacity experience store that overwrites its oldest record once full.
///
/// Slots are allocated up front; `cursor` is the next slot to write and
/// `filled` counts occupied slots, so `len() <= capacity()` always holds.
#[derive(Debug, Clone)]
pub struct ReplayBuffer<O, A> {
    slots: Box<[Option<Transition<O, A>>]>,
    cursor: usize,
    filled: usize,
    rng: ChaCha8Rng,
}

impl<O, A> ReplayBuffer<O, A> {
    /// Create an empty buffer with an entropy-seeded sampler.
    pub fn new(capacity: usize) -> Result<Self, ReplayError> {
        Self::with_rng(capacity, ChaCha8Rng::from_entropy())
    }

    /// Create an empty buffer whose sampling is reproducible for `seed`.
    pub fn with_seed(capacity: usize, seed: u64) -> Result<Self, ReplayError> {
        Self::with_rng(capacity, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create a buffer from a parsed replay config.
    pub fn from_config(config: &ReplayConfig) -> Result<Self, ReplayError> {
        match config.seed {
            Some(seed) => Self::with_seed(config.capacity, seed),
            None => Self::new(config.capacity),
        }
    }

    fn with_rng(capacity: usize, rng: ChaCha8Rng) -> Result<Self, ReplayError> {
        if capacity == 0 {
            return Err(ReplayError::ZeroCapacity);
        }

        log::debug!("allocating replay buffer with {capacity} slots");
        let slots = (0..capacity).map(|_| None).collect();
        Ok(ReplayBuffer {
            slots,
            cursor: 0,
            filled: 0,
            rng,
        })
    }

    /// Number of stored transitions.
    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Hard ceiling on stored transitions, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Record one step.
    pub fn add(
        &mut self,
        observation: O,
        action: A,
        reward: f64,
        next_observation: O,
        done: bool,
    ) {
        self.push(Transition::new(
            observation,
            action,
            reward,
            next_observation,
            done,
        ));
    }

    /// Store a transition, overwriting the oldest one when full.
    pub fn push(&mut self, transition: Transition<O, A>) {
        let slot = &mut self.slots[self.cursor];
        if slot.is_some() {
            log::trace!("overwriting replay slot {}", self.cursor);
        } else {
            self.filled += 1;
        }
        *slot = Some(transition);
        self.cursor = (self.cursor + 1) % self.slots.len();
    }

    /// Iterate stored transitions from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Transition<O, A>> + '_ {
        let capacity = self.slots.len();
        let start = if self.filled == capacity {
            self.cursor
        } else {
            0
        };

        (0..self.filled).filter_map(move |offset| self.slots[(start + offset) % capacity].as_ref())
    }

    /// Sample `batch_size` transitions uniformly with replacement.
    pub fn sample(&mut self, batch_size: usize) -> Result<Batch<O, A>, ReplayError>
    where
        O: Clone,
        A: Clone,
    {
        let ReplayBuffer {
            slots, filled, rng, ..
        } = self;
        draw(slots, *filled, rng, batch_size)
    }

    /// Sample with a caller-provided random source.
    pub fn sample_with<R>(
        &self,
        rng: &mut R,
        batch_size: usize,
    ) -> Result<Batch<O, A>, ReplayError>
    where
        R: Rng + ?Sized,
        O: Clone,
        A: Clone,
    {
        draw(&self.slots, self.filled, rng, batch_size)
    }
}

fn draw<O, A, R>(
    slots: &[Option<Transition<O, A>>],
    filled: usize,
    rng: &mut R,
    batch_size: usize,
) -> Result<Batch<O, A>, ReplayError>
where
    O: Clone,
    A: Clone,
    R: Rng + ?Sized,
{
    if filled == 0 {
        return Err(ReplayError::EmptyBuffer);
    }

    let mut batch = Batch::with_capacity(batch_size);
    for _ in 0..batch_size {
        // Slots `0..filled` are always occupied: the cursor only wraps after
        // every slot has been written once.
        if let Some(transition) = slots[rng.gen_range(0..filled)].as_ref() {
            batch.push(transition);
        }
    }

    Ok(batch)
}
