mod grid;

pub use grid::codec::ObservationCodec;
pub use grid::config::GridConfig;
pub use grid::episode::{EpisodePhase, EpisodeRunner, StepInfo, StepResult};
pub use grid::error::{GridConfigError, GridError};
pub use grid::ids::{Action, ActionId, Observation, Position};
pub use grid::mdp::FiniteMdp;
pub use grid::model::{Geometry, GridWorldModel};
pub use grid::returns::{discounted_return, discounted_rewards};
pub use grid::snapshot::EpisodeSnapshot;
pub use grid::solver::{ValueIterationResult, value_iteration};
pub use grid::tables::{Outcome, RewardTable, TransitionTable};
pub use grid::trajectory::{Trajectory, Transition};
