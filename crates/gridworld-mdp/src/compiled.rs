use gridworld_core::{
    ActionId, FiniteMdp, GridError, GridWorldModel, Observation, Outcome, RewardTable,
    TransitionTable,
};
use tracing::debug;

use crate::{TabularError, TabularSpec};

/// Floating point tolerance used when validating probability sums.
pub(crate) const PROB_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
/// Runtime form of a tabular MDP with dense reward rows and precomputed CDFs.
pub struct TabularMdp {
    start: Observation,
    rewards: RewardTable,
    transitions: TransitionTable,
}

impl TabularMdp {
    /// Validate and compile a spec into a fast runtime representation.
    pub(crate) fn from_spec(spec: &TabularSpec) -> Result<Self, TabularError> {
        spec.validate_with_tolerance(PROB_TOLERANCE)?;

        let slots = spec.observation_count * spec.action_count;
        let mut rewards = vec![0.0; slots];
        let mut rows: Vec<Vec<Outcome>> = vec![Vec::new(); slots];

        for entry in &spec.observations {
            for action in &entry.actions {
                let slot = entry.observation * spec.action_count + action.action;
                rewards[slot] = action.reward;
                rows[slot] = action
                    .outcomes
                    .iter()
                    .map(|outcome| Outcome {
                        next: Observation::from(outcome.next),
                        prob: outcome.prob,
                    })
                    .collect();
            }
        }

        let rewards = RewardTable::from_values(spec.observation_count, spec.action_count, rewards)
            .ok_or(TabularError::EmptyModel)?;
        let transitions =
            TransitionTable::from_rows(spec.observation_count, spec.action_count, rows)
                .ok_or(TabularError::EmptyModel)?;

        debug!(
            observations = spec.observation_count,
            actions = spec.action_count,
            deterministic = transitions.is_deterministic(),
            "compiled tabular mdp"
        );

        Ok(Self {
            start: Observation::from(spec.start),
            rewards,
            transitions,
        })
    }

    /// Compile a grid world directly, keeping its one-hot kernel.
    pub fn from_grid(model: &GridWorldModel) -> Result<Self, TabularError> {
        TabularSpec::from_grid(model).compile()
    }

    /// Return the start observation.
    pub fn start(&self) -> Observation {
        self.start
    }

    pub fn reward_table(&self) -> &RewardTable {
        &self.rewards
    }

    pub fn transition_table(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn is_deterministic(&self) -> bool {
        self.transitions.is_deterministic()
    }

    /// Sample one `(next_observation, reward)` transition using a uniform sample in `[0, 1)`.
    pub fn sample_transition(
        &self,
        observation: Observation,
        action_id: ActionId,
        sample: f64,
    ) -> Result<(Observation, f64), GridError> {
        self.check(observation, action_id)?;
        let next = self
            .transitions
            .sample(observation, action_id, sample)
            .ok_or(GridError::InvalidObservation {
                observation,
                observation_count: self.observation_count(),
            })?;
        let reward = self.reward(observation, action_id)?;
        Ok((next, reward))
    }
}

impl FiniteMdp for TabularMdp {
    fn observation_count(&self) -> usize {
        self.transitions.observation_count()
    }

    fn action_count(&self) -> usize {
        self.transitions.action_count()
    }

    fn initial_observation(&self) -> Observation {
        self.start
    }

    /// Most probable successor; exact for one-hot kernels.
    fn transition(
        &self,
        observation: Observation,
        action_id: ActionId,
    ) -> Result<Observation, GridError> {
        self.check(observation, action_id)?;
        self.transitions
            .most_likely(observation, action_id)
            .ok_or(GridError::InvalidObservation {
                observation,
                observation_count: self.observation_count(),
            })
    }

    fn outcomes(
        &self,
        observation: Observation,
        action_id: ActionId,
    ) -> Result<Vec<(Observation, f64)>, GridError> {
        self.check(observation, action_id)?;
        let row = self
            .transitions
            .distribution(observation, action_id)
            .ok_or(GridError::InvalidObservation {
                observation,
                observation_count: self.observation_count(),
            })?;
        Ok(row.iter().map(|outcome| (outcome.next, outcome.prob)).collect())
    }

    fn reward(&self, observation: Observation, action_id: ActionId) -> Result<f64, GridError> {
        self.check(observation, action_id)?;
        self.rewards
            .get(observation, action_id)
            .ok_or(GridError::InvalidObservation {
                observation,
                observation_count: self.observation_count(),
            })
    }
}
