use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tessera_core::{
    Agent, Environment, ReplayBuffer, ReplayConfig, discount, evaluate, play_and_record,
};
use tessera_mdp::{MdpSpec, TransitionModel};

const CHAIN_YAML: &str = r#"
version: 1
initial: left
states:
  - id: left
    actions:
      - id: stay
        outcomes:
          - next: left
            prob: 1.0
      - id: move
        outcomes:
          - next: middle
            prob: 0.8
          - next: left
            prob: 0.2
  - id: middle
    actions:
      - id: move
        outcomes:
          - next: goal
            prob: 0.8
            reward: 1.0
          - next: left
            prob: 0.2
  - id: goal
    terminal: true
"#;

/// Picks uniformly among the actions of the current state.
struct UniformAgent {
    model: TransitionModel<String, String>,
    state: String,
    rng: ChaCha8Rng,
}

impl Agent<String, String> for UniformAgent {
    fn action_values(&mut self, observation: &String) -> Vec<f64> {
        self.state = observation.clone();
        vec![0.0; self.model.actions(observation).len()]
    }

    fn sample_action(&mut self, action_values: &[f64]) -> String {
        let idx = self.rng.gen_range(0..action_values.len());
        self.model.actions(&self.state)[idx].clone()
    }

    fn greedy_action(&mut self, _action_values: &[f64]) -> String {
        self.model.actions(&self.state).last().cloned().unwrap_or_default()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let spec: MdpSpec = serde_yaml::from_str(CHAIN_YAML)?;
    let mut mdp = spec.compile(7)?;
    let config = ReplayConfig::from_default_yaml()?;
    let mut buffer = ReplayBuffer::from_config(&config)?;

    let mut agent = UniformAgent {
        model: mdp.transitions().clone(),
        state: mdp.current_state().clone(),
        rng: ChaCha8Rng::seed_from_u64(7),
    };

    let start = mdp.reset()?;
    let recorded = play_and_record(&mut agent, &mut mdp, &mut buffer, start, 500)?;
    println!(
        "recorded {} transitions, total reward {}",
        buffer.len(),
        recorded.total_reward
    );

    let batch = buffer.sample(config.batch_size)?;
    let returns = discount(&batch.rewards, 0.9);
    println!("first sampled return-to-go: {:?}", returns.first());

    let mean = evaluate(&mut mdp, &mut agent, 20, true, 50)?;
    println!("greedy mean reward over 20 games: {mean}");

    let observation = Environment::reset(&mut mdp)?;
    println!("back at {observation}");
    Ok(())
}
