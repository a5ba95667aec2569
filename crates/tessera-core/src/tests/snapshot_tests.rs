use crate::{
    Checkpoint, Environment, SnapshotError, StepOutcome, WithSnapshots, tests::support::NoisyWalk,
};

fn play<E>(env: &mut E, actions: &[i64]) -> Vec<StepOutcome<i64, u32>>
where
    E: Environment<Observation = i64, Action = i64, Info = u32>,
{
    actions
        .iter()
        .map(|action| env.step(action).expect("walk steps never fail"))
        .collect()
}

#[test]
fn round_trip_reproduces_future_behaviour() {
    let actions = [1, 1, -1, 0, 1, -1, 1, 1];
    let mut wrapper = WithSnapshots::new(NoisyWalk::new(17, 100));
    play(&mut wrapper, &[1, 0]);

    let checkpoint = wrapper.get_snapshot().expect("snapshot");
    let expected = play(&mut wrapper, &actions);

    wrapper.load_snapshot(&checkpoint).expect("load");
    assert_eq!(play(&mut wrapper, &actions), expected);
}

#[test]
fn checkpoint_is_independent_of_later_mutation() {
    let mut wrapper = WithSnapshots::new(NoisyWalk::new(5, 100));
    let checkpoint = wrapper.get_snapshot().expect("snapshot");
    let bytes_before = checkpoint.as_bytes().to_vec();

    play(&mut wrapper, &[1, 1, 1]);
    wrapper.load_snapshot(&checkpoint).expect("first load");
    wrapper.load_snapshot(&checkpoint).expect("second load");

    assert_eq!(checkpoint.as_bytes(), bytes_before.as_slice());
    assert_eq!(wrapper.env().position, 0);
    assert_eq!(wrapper.env().steps, 0);
}

#[test]
fn get_result_leaves_checkpoint_untouched_and_is_repeatable() {
    let mut first = WithSnapshots::new(NoisyWalk::new(11, 100));
    let checkpoint = first.get_snapshot().expect("snapshot");
    let copy = checkpoint.clone();

    let a = first.get_result(&checkpoint, &1).expect("first branch");
    let mut second = WithSnapshots::<NoisyWalk>::from_checkpoint(&checkpoint).expect("fork");
    let b = second.get_result(&checkpoint, &1).expect("second branch");

    assert_eq!(checkpoint, copy);
    assert_eq!(a, b);
    assert_eq!(a.info, 1);

    let deeper = first.get_result(&a.snapshot, &-1).expect("follow-up");
    assert_eq!(deeper.info, 2);
}

#[test]
fn sibling_branches_do_not_interfere() {
    let mut wrapper = WithSnapshots::new(NoisyWalk::new(23, 100));
    let root = wrapper.get_snapshot().expect("snapshot");

    let left = wrapper.get_result(&root, &-1).expect("left");
    let right = wrapper.get_result(&root, &1).expect("right");
    let left_again = wrapper.get_result(&root, &-1).expect("left again");

    assert_eq!(left, left_again);
    assert_eq!(right.observation - left.observation, 2);
}

#[test]
fn parallel_branches_use_their_own_wrappers() {
    let mut wrapper = WithSnapshots::new(NoisyWalk::new(31, 100));
    let root = wrapper.get_snapshot().expect("snapshot");
    let sequential: Vec<_> = [-1, 0, 1]
        .iter()
        .map(|action| wrapper.get_result(&root, action).expect("branch"))
        .collect();

    let parallel: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = [-1, 0, 1]
            .into_iter()
            .map(|action| {
                let root = root.clone();
                scope.spawn(move || {
                    let mut branch =
                        WithSnapshots::<NoisyWalk>::from_checkpoint(&root).expect("fork");
                    branch.get_result(&root, &action).expect("branch")
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("branch thread"))
            .collect()
    });

    assert_eq!(sequential, parallel);
}

#[test]
fn snapshot_releases_viewer() {
    let mut env = NoisyWalk::new(3, 10);
    env.viewer = Some(1);
    let mut wrapper = WithSnapshots::new(env);

    let checkpoint = wrapper.get_snapshot().expect("snapshot");
    assert!(wrapper.env().viewer.is_none());

    let restored: NoisyWalk = checkpoint.decode().expect("decode");
    assert!(restored.viewer.is_none());
}

#[test]
fn recording_forbids_rewinding() {
    let mut wrapper = WithSnapshots::new(NoisyWalk::new(7, 10));
    let checkpoint = wrapper.get_snapshot().expect("snapshot");
    wrapper.begin_recording();

    assert!(wrapper.is_recording());
    assert!(matches!(
        wrapper.load_snapshot(&checkpoint),
        Err(SnapshotError::RecordingConflict)
    ));
    assert!(matches!(
        wrapper.get_result(&checkpoint, &1),
        Err(SnapshotError::RecordingConflict)
    ));

    // Moving forward is still allowed.
    assert!(wrapper.step(&1).is_ok());
    assert!(wrapper.get_snapshot().is_ok());
}

#[test]
fn garbage_checkpoint_fails_to_decode() {
    let mut wrapper = WithSnapshots::new(NoisyWalk::new(7, 10));
    let err = wrapper
        .load_snapshot(&Checkpoint::from_bytes(b"not a walk".to_vec()))
        .expect_err("decode should fail");
    assert!(matches!(err, SnapshotError::Decode(_)));
}
