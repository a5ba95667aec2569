use crate::{
    env::{Agent, Environment},
    replay::buffer::ReplayBuffer,
};

/// Outcome of a `play_and_record` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded<O> {
    /// Sum of rewards collected over the played steps.
    pub total_reward: f64,
    /// Observation to resume from on the next call.
    pub observation: O,
}

/// Play exactly `n_steps` from `observation`, recording every transition.
///
/// The agent picks exploratory actions. When an episode ends the transition is
/// stored with `done = true` and the environment is reset before continuing.
pub fn play_and_record<E, G>(
    agent: &mut G,
    env: &mut E,
    buffer: &mut ReplayBuffer<E::Observation, E::Action>,
    observation: E::Observation,
    n_steps: usize,
) -> Result<Recorded<E::Observation>, E::Error>
where
    E: Environment,
    G: Agent<E::Observation, E::Action>,
{
    let mut observation = observation;
    let mut total_reward = 0.0;

    for _ in 0..n_steps {
        let action_values = agent.action_values(&observation);
        let action = agent.sample_action(&action_values);
        let outcome = env.step(&action)?;

        buffer.add(
            observation,
            action,
            outcome.reward,
            outcome.observation.clone(),
            outcome.done,
        );
        total_reward += outcome.reward;

        observation = if outcome.done {
            log::debug!("episode finished while recording; resetting");
            env.reset()?
        } else {
            outcome.observation
        };
    }

    Ok(Recorded {
        total_reward,
        observation,
    })
}

/// Play `n_games` full episodes and return the mean total reward.
///
/// Each episode stops at `done` or after `t_max` steps. With `greedy` the
/// agent's highest-valued action is taken, otherwise its sampled one.
/// Zero games yield `0.0`.
pub fn evaluate<E, G>(
    env: &mut E,
    agent: &mut G,
    n_games: usize,
    greedy: bool,
    t_max: usize,
) -> Result<f64, E::Error>
where
    E: Environment,
    G: Agent<E::Observation, E::Action>,
{
    if n_games == 0 {
        return Ok(0.0);
    }

    let mut reward_sum = 0.0;
    for game in 0..n_games {
        let mut observation = env.reset()?;
        let mut episode_reward = 0.0;

        for _ in 0..t_max {
            let action_values = agent.action_values(&observation);
            let action = if greedy {
                agent.greedy_action(&action_values)
            } else {
                agent.sample_action(&action_values)
            };

            let outcome = env.step(&action)?;
            episode_reward += outcome.reward;
            observation = outcome.observation;
            if outcome.done {
                break;
            }
        }

        log::debug!("evaluation game {game} finished with reward {episode_reward}");
        reward_sum += episode_reward;
    }

    Ok(reward_sum / n_games as f64)
}
