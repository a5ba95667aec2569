mod driver_tests;
mod property_replay_tests;
mod snapshot_tests;
mod support;
