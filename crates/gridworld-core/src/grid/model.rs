use serde::Serialize;
use tracing::debug;

use crate::grid::{
    codec::ObservationCodec,
    config::GridConfig,
    error::GridError,
    ids::{Action, ActionId, Observation, Position},
    mdp::FiniteMdp,
    tables::{Outcome, RewardTable, TransitionTable},
};

/// Read-only layout of a grid world, as handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Geometry {
    pub size: usize,
    pub goal: Position,
    pub forbidden: Vec<Position>,
    pub start: Position,
}

impl Geometry {
    pub fn is_forbidden(&self, position: Position) -> bool {
        self.forbidden.contains(&position)
    }
}

#[derive(Debug, Clone)]
/// Deterministic grid-world MDP with reward and transition tables built once at construction.
pub struct GridWorldModel {
    codec: ObservationCodec,
    geometry: Geometry,
    rewards: RewardTable,
    transitions: TransitionTable,
    gamma: f64,
    max_iter: usize,
}

impl GridWorldModel {
    /// Validate `config` and build both tables over all `size² × 5` pairs.
    pub fn new(config: &GridConfig) -> Result<Self, GridError> {
        config.validate()?;

        let mut forbidden: Vec<Position> = Vec::with_capacity(config.states_forbidden.len());
        for cell in &config.states_forbidden {
            if !forbidden.contains(cell) {
                forbidden.push(*cell);
            }
        }

        let geometry = Geometry {
            size: config.size,
            goal: config.goal(),
            forbidden,
            start: config.start(),
        };
        let codec = ObservationCodec::new(config.size);
        let observation_count = codec.observation_count();

        let mut rewards = RewardTable::filled(observation_count, Action::COUNT, config.reward_other);
        let mut rows = Vec::with_capacity(observation_count * Action::COUNT);

        for observation in codec.observations() {
            let current = codec.decode(observation);
            for action in Action::ALL {
                let next = next_position(current, action, config.size);
                let action_id = ActionId::from(action);

                // Later rules overwrite earlier ones: a wall bump beats goal and forbidden.
                if next == geometry.goal {
                    rewards.set(observation, action_id, config.reward_goal);
                }
                if geometry.is_forbidden(next) {
                    rewards.set(observation, action_id, config.reward_forbidden);
                }
                if next == current && action != Action::Stay {
                    rewards.set(observation, action_id, config.reward_boundary);
                }

                rows.push(vec![Outcome {
                    next: codec.encode(next),
                    prob: 1.0,
                }]);
            }
        }

        let transitions = TransitionTable::from_rows(observation_count, Action::COUNT, rows)
            .ok_or_else(|| GridError::invalid_configuration("transition table shape mismatch"))?;

        debug!(
            size = config.size,
            observations = observation_count,
            actions = Action::COUNT,
            forbidden = geometry.forbidden.len(),
            "built grid world model"
        );

        Ok(GridWorldModel {
            codec,
            geometry,
            rewards,
            transitions,
            gamma: config.gamma,
            max_iter: config.max_iter,
        })
    }

    /// Deterministic successor lookup.
    pub fn transition(
        &self,
        observation: Observation,
        action_id: ActionId,
    ) -> Result<Observation, GridError> {
        self.check(observation, action_id)?;
        self.transitions
            .most_likely(observation, action_id)
            .ok_or(GridError::InvalidObservation {
                observation,
                observation_count: self.codec.observation_count(),
            })
    }

    /// Mean reward lookup.
    pub fn reward(&self, observation: Observation, action_id: ActionId) -> Result<f64, GridError> {
        self.check(observation, action_id)?;
        self.rewards
            .get(observation, action_id)
            .ok_or(GridError::InvalidObservation {
                observation,
                observation_count: self.codec.observation_count(),
            })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn codec(&self) -> ObservationCodec {
        self.codec
    }

    pub fn size(&self) -> usize {
        self.codec.size()
    }

    /// Discount factor the model was configured with.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Truncation bound the model was configured with.
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    pub fn reward_table(&self) -> &RewardTable {
        &self.rewards
    }

    pub fn transition_table(&self) -> &TransitionTable {
        &self.transitions
    }
}

impl FiniteMdp for GridWorldModel {
    fn observation_count(&self) -> usize {
        self.codec.observation_count()
    }

    fn action_count(&self) -> usize {
        Action::COUNT
    }

    fn initial_observation(&self) -> Observation {
        self.codec.encode(self.geometry.start)
    }

    fn transition(
        &self,
        observation: Observation,
        action_id: ActionId,
    ) -> Result<Observation, GridError> {
        GridWorldModel::transition(self, observation, action_id)
    }

    fn reward(&self, observation: Observation, action_id: ActionId) -> Result<f64, GridError> {
        GridWorldModel::reward(self, observation, action_id)
    }
}

/// Apply the action's displacement; moves that leave the grid keep the agent in place.
fn next_position(current: Position, action: Action, size: usize) -> Position {
    current.offset(action.delta(), size).unwrap_or(current)
}
