use tessera_core::{ReplayBuffer, ReplayConfig, ReplayError, discount};

#[test]
fn public_buffer_feeds_discounted_returns() {
    let config = ReplayConfig::from_yaml_str("capacity: 4\nbatch_size: 2\nseed: 1\n")
        .expect("valid config");
    let mut buffer = ReplayBuffer::from_config(&config).expect("valid capacity");

    let rewards = [1.0, 0.0, 2.0, 3.0, 5.0];
    let returns = discount(&rewards, 0.9);
    for (t, ret) in returns.iter().enumerate() {
        let done = t + 1 == rewards.len();
        buffer.add(vec![t as f32; 3], t, *ret, vec![t as f32 + 1.0; 3], done);
    }

    assert_eq!(buffer.len(), config.capacity);
    let batch = buffer.sample(config.batch_size).expect("non-empty buffer");
    assert_eq!(batch.len(), 2);
    for (i, action) in batch.actions.iter().enumerate() {
        assert!(*action >= 1);
        assert_eq!(batch.observations[i], vec![*action as f32; 3]);
        assert!((batch.rewards[i] - returns[*action]).abs() < 1e-12);
    }
}

#[test]
fn public_empty_buffer_reports_empty() {
    let mut buffer: ReplayBuffer<Vec<f32>, usize> =
        ReplayBuffer::new(2).expect("valid capacity");
    assert!(buffer.is_empty());
    assert_eq!(buffer.sample(1).map(|b| b.len()), Err(ReplayError::EmptyBuffer));
}
