/// Discount factor used when callers have no better choice.
pub const DEFAULT_GAMMA: f64 = 0.99;

/// Convert per-step rewards into return-to-go values.
///
/// `out[t] = rewards[t] + gamma * out[t + 1]`, with the last entry equal to the
/// last reward. An empty input yields an empty output.
pub fn discount(rewards: &[f64], gamma: f64) -> Vec<f64> {
    let mut discounted = vec![0.0; rewards.len()];
    let mut running = 0.0;

    for (t, reward) in rewards.iter().enumerate().rev() {
        running = reward + gamma * running;
        discounted[t] = running;
    }

    discounted
}

/// Return-to-go from the first step, `0.0` for an empty sequence.
pub fn discounted_return(rewards: &[f64], gamma: f64) -> f64 {
    rewards
        .iter()
        .rev()
        .fold(0.0, |running, reward| reward + gamma * running)
}
