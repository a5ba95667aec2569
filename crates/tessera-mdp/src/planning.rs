use std::collections::HashMap;

use crate::{Identifier, Mdp, MdpError};

/// Expected one-step return `Q(s, a) = sum_s' P(s'|s,a) * (r(s,a,s') + gamma * V(s'))`.
pub fn action_value<S: Identifier, A: Identifier>(
    mdp: &Mdp<S, A>,
    values: &HashMap<S, f64>,
    state: &S,
    action: &A,
    gamma: f64,
) -> Result<f64, MdpError> {
    let mut q = 0.0;
    for (next, prob) in mdp.next_states(state, action)? {
        let value = values
            .get(next)
            .copied()
            .ok_or_else(|| MdpError::MissingStateValue {
                state: next.describe(),
            })?;
        q += prob * (mdp.reward(state, action, next)? + gamma * value);
    }
    Ok(q)
}

/// Action with the highest `Q(s, a)` under `values`, `None` for terminal states.
///
/// Ties go to the action declared first.
pub fn optimal_action<S: Identifier, A: Identifier>(
    mdp: &Mdp<S, A>,
    values: &HashMap<S, f64>,
    state: &S,
    gamma: f64,
) -> Result<Option<A>, MdpError> {
    let mut best: Option<(&A, f64)> = None;
    for action in mdp.actions(state) {
        let q = action_value(mdp, values, state, action, gamma)?;
        if best.is_none_or(|(_, best_q)| q > best_q) {
            best = Some((action, q));
        }
    }
    Ok(best.map(|(action, _)| action.clone()))
}
