mod builder;
mod engine;
mod error;
mod ids;
mod io;
mod model;
mod planning;
mod spec;

pub use builder::MdpBuilder;
pub use engine::{InitialState, Mdp};
pub use error::MdpError;
pub use ids::Identifier;
pub use io::{compile_yaml, load_yaml, save_yaml};
pub use model::{PROB_TOLERANCE, RewardModel, TransitionModel};
pub use planning::{action_value, optimal_action};
pub use spec::{ActionSpec, MdpSpec, OutcomeSpec, StateSpec};
