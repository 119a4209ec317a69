use crate::grid::{
    error::GridError,
    ids::{ActionId, Observation},
};

/// Narrow capability interface for finite MDPs.
///
/// Episode runners and solvers depend on this trait only, never on a concrete grid.
/// `transition` yields a single successor; `outcomes` yields the full kernel row and
/// defaults to the one-hot row of `transition`.
pub trait FiniteMdp {
    /// Number of observations; valid observations are `[0, observation_count)`.
    fn observation_count(&self) -> usize;

    /// Number of actions available in every observation.
    fn action_count(&self) -> usize;

    /// Observation every episode starts from.
    fn initial_observation(&self) -> Observation;

    /// Successor of `observation` under `action_id`.
    fn transition(
        &self,
        observation: Observation,
        action_id: ActionId,
    ) -> Result<Observation, GridError>;

    /// Successor distribution as `(next, probability)` pairs.
    fn outcomes(
        &self,
        observation: Observation,
        action_id: ActionId,
    ) -> Result<Vec<(Observation, f64)>, GridError> {
        Ok(vec![(self.transition(observation, action_id)?, 1.0)])
    }

    /// Mean reward of taking `action_id` in `observation`.
    fn reward(&self, observation: Observation, action_id: ActionId) -> Result<f64, GridError>;

    /// Validate both indices against this MDP's bounds.
    fn check(&self, observation: Observation, action_id: ActionId) -> Result<(), GridError> {
        if action_id.index() >= self.action_count() {
            return Err(GridError::InvalidAction {
                action_id,
                action_count: self.action_count(),
            });
        }
        if observation.index() >= self.observation_count() {
            return Err(GridError::InvalidObservation {
                observation,
                observation_count: self.observation_count(),
            });
        }
        Ok(())
    }
}
