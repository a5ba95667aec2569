use proptest::prelude::*;

use crate::ReplayBuffer;

proptest! {
    #[test]
    fn buffer_keeps_exactly_the_most_recent_records(capacity in 1usize..32, extra in 1usize..64) {
        let mut buffer = ReplayBuffer::with_seed(capacity, 0).expect("valid capacity");
        let total = capacity + extra;

        for i in 0..total {
            buffer.add(i, (), 0.0, i + 1, false);
        }

        prop_assert_eq!(buffer.len(), capacity);
        let kept: Vec<usize> = buffer.iter().map(|t| t.observation).collect();
        let expected: Vec<usize> = (extra..total).collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn sampled_records_were_stored(
        capacity in 1usize..16,
        inserted in 1usize..40,
        batch_size in 0usize..32,
    ) {
        let mut buffer = ReplayBuffer::with_seed(capacity, 3).expect("valid capacity");
        for i in 0..inserted {
            buffer.add(i, i, 0.0, i, false);
        }

        let oldest_kept = inserted.saturating_sub(capacity);
        let batch = buffer.sample(batch_size).expect("non-empty buffer");
        prop_assert_eq!(batch.len(), batch_size);
        for (obs, action) in batch.observations.iter().zip(&batch.actions) {
            prop_assert_eq!(obs, action);
            prop_assert!(*obs >= oldest_kept && *obs < inserted);
        }
    }
}
