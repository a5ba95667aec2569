use std::collections::HashMap;

use tessera_core::DEFAULT_GAMMA;
use tessera_mdp::{MdpBuilder, MdpError, action_value, optimal_action};

fn main() -> Result<(), MdpError> {
    let mut builder = MdpBuilder::new();
    builder.add_state("s0").add_state("s1").add_state("s2");

    builder.add_action("s0", "a0")?;
    builder.add_outcome("s0", "a0", "s0", 0.5, 0.0)?;
    builder.add_outcome("s0", "a0", "s2", 0.5, 0.0)?;
    builder.add_action("s0", "a1")?;
    builder.add_outcome("s0", "a1", "s2", 1.0, 0.0)?;

    builder.add_action("s1", "a0")?;
    builder.add_outcome("s1", "a0", "s0", 0.7, 5.0)?;
    builder.add_outcome("s1", "a0", "s1", 0.1, 0.0)?;
    builder.add_outcome("s1", "a0", "s2", 0.2, 0.0)?;
    builder.add_action("s1", "a1")?;
    builder.add_outcome("s1", "a1", "s1", 0.95, 0.0)?;
    builder.add_outcome("s1", "a1", "s2", 0.05, 0.0)?;

    builder.add_action("s2", "a0")?;
    builder.add_outcome("s2", "a0", "s0", 0.4, 0.0)?;
    builder.add_outcome("s2", "a0", "s1", 0.6, 0.0)?;
    builder.add_action("s2", "a1")?;
    builder.add_outcome("s2", "a1", "s0", 0.3, -1.0)?;
    builder.add_outcome("s2", "a1", "s1", 0.3, 0.0)?;
    builder.add_outcome("s2", "a1", "s2", 0.4, 0.0)?;

    let mdp = builder.compile(0)?;
    let gamma = DEFAULT_GAMMA;
    let mut values: HashMap<String, f64> =
        mdp.all_states().iter().map(|s| (s.clone(), 0.0)).collect();

    for iteration in 0..1000 {
        let mut next_values = HashMap::with_capacity(values.len());
        for state in mdp.all_states() {
            let mut best = f64::NEG_INFINITY;
            for action in mdp.actions(state) {
                best = best.max(action_value(&mdp, &values, state, action, gamma)?);
            }
            next_values.insert(state.clone(), if best.is_finite() { best } else { 0.0 });
        }

        let diff = mdp
            .all_states()
            .iter()
            .map(|s| (next_values[s] - values[s]).abs())
            .fold(0.0, f64::max);
        values = next_values;

        if diff < 1e-6 {
            println!("converged after {} iterations", iteration + 1);
            break;
        }
    }

    for state in mdp.all_states() {
        let action = optimal_action(&mdp, &values, state, gamma)?;
        println!("V({state}) = {:.3}, best action {action:?}", values[state]);
    }

    Ok(())
}
