use crate::{
    Environment, ReplayBuffer, WithSnapshots, evaluate, play_and_record,
    tests::support::{NoisyWalk, ScriptedAgent},
};

#[test]
fn play_and_record_stores_every_step_and_resets_on_done() {
    let mut env = NoisyWalk::new(13, 3);
    let mut agent = ScriptedAgent {
        script: vec![0],
        cursor: 0,
    };
    let mut buffer = ReplayBuffer::with_seed(64, 0).expect("valid capacity");
    let start = env.reset().expect("reset");

    let recorded =
        play_and_record(&mut agent, &mut env, &mut buffer, start, 7).expect("walk never fails");

    assert_eq!(buffer.len(), 7);
    let transitions: Vec<_> = buffer.iter().cloned().collect();

    // Horizon 3 forces an episode boundary at least every third step.
    assert!(transitions.iter().filter(|t| t.done).count() >= 2);
    for pair in transitions.windows(2) {
        if pair[0].done {
            assert_eq!(pair[1].observation, 0);
        } else {
            assert_eq!(pair[1].observation, pair[0].next_observation);
        }
    }

    let reward_sum: f64 = transitions.iter().map(|t| t.reward).sum();
    assert!((recorded.total_reward - reward_sum).abs() < 1e-12);
    assert_eq!(agent.cursor, 7);
}

#[test]
fn play_and_record_resumes_from_returned_observation() {
    let mut env = NoisyWalk::new(19, 50);
    let mut agent = ScriptedAgent {
        script: vec![1, -1],
        cursor: 0,
    };
    let mut buffer = ReplayBuffer::with_seed(8, 0).expect("valid capacity");
    let start = env.reset().expect("reset");

    let first = play_and_record(&mut agent, &mut env, &mut buffer, start, 1).expect("step");
    let second = play_and_record(&mut agent, &mut env, &mut buffer, first.observation, 1)
        .expect("step");

    let transitions: Vec<_> = buffer.iter().cloned().collect();
    assert_eq!(transitions.len(), 2);
    if !transitions[0].done {
        assert_eq!(transitions[1].observation, transitions[0].next_observation);
    }
    assert_eq!(second.observation, env.position);
}

#[test]
fn evaluate_averages_episode_rewards() {
    let mut env = NoisyWalk::new(29, 4);
    let mut reference = env.clone();
    let mut agent = ScriptedAgent {
        script: vec![0],
        cursor: 0,
    };

    let mean = evaluate(&mut env, &mut agent, 3, true, 10).expect("walk never fails");

    // Replay the same games by hand with the greedy policy.
    let mut total = 0.0;
    for _ in 0..3 {
        let mut observation = reference.reset().expect("reset");
        for _ in 0..10 {
            let action = if observation > 1 { -1 } else { 1 };
            let outcome = reference.step(&action).expect("step");
            total += outcome.reward;
            observation = outcome.observation;
            if outcome.done {
                break;
            }
        }
    }

    assert!((mean - total / 3.0).abs() < 1e-12);
    assert_eq!(agent.cursor, 0, "greedy evaluation never samples");
}

#[test]
fn evaluate_with_no_games_is_zero() {
    let mut env = WithSnapshots::new(NoisyWalk::new(1, 4));
    let mut agent = ScriptedAgent {
        script: vec![0],
        cursor: 0,
    };
    assert_eq!(evaluate(&mut env, &mut agent, 0, false, 10).expect("nothing to play"), 0.0);
}
