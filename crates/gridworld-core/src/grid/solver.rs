use tracing::debug;

use crate::grid::{
    error::GridError,
    ids::{ActionId, Observation},
    mdp::FiniteMdp,
};

/// Outcome of a value-iteration run.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueIterationResult {
    /// Optimal state value per observation.
    pub values: Vec<f64>,
    /// Greedy action per observation; the lowest index wins ties.
    pub policy: Vec<ActionId>,
    pub sweeps: usize,
    /// Largest value change in the final sweep.
    pub max_delta: f64,
    pub converged: bool,
}

impl ValueIterationResult {
    pub fn value(&self, observation: Observation) -> Option<f64> {
        self.values.get(observation.index()).copied()
    }

    pub fn action(&self, observation: Observation) -> Option<ActionId> {
        self.policy.get(observation.index()).copied()
    }
}

/// Solve the Bellman optimality equation by synchronous sweeps,
/// taking expectations over each row of the transition kernel.
///
/// Stops once no value moves by more than `tolerance`, or after `max_sweeps`.
pub fn value_iteration<M: FiniteMdp + ?Sized>(
    mdp: &M,
    gamma: f64,
    tolerance: f64,
    max_sweeps: usize,
) -> Result<ValueIterationResult, GridError> {
    if !gamma.is_finite() || gamma <= 0.0 || gamma > 1.0 {
        return Err(GridError::InvalidConfiguration {
            reason: format!("gamma must be in (0, 1], got {gamma}"),
        });
    }
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(GridError::InvalidConfiguration {
            reason: format!("tolerance must be finite and >= 0, got {tolerance}"),
        });
    }

    let observation_count = mdp.observation_count();
    let action_count = mdp.action_count();
    let mut values = vec![0.0; observation_count];
    let mut policy = vec![ActionId::from(0); observation_count];
    let mut sweeps = 0;
    let mut max_delta = f64::INFINITY;

    while sweeps < max_sweeps && max_delta > tolerance {
        let mut next_values = values.clone();
        max_delta = 0.0;

        for (index, slot) in next_values.iter_mut().enumerate() {
            let observation = Observation::from(index);
            let (best_action, best_value) =
                best_action(mdp, &values, observation, action_count, gamma)?;
            max_delta = f64::max(max_delta, (best_value - values[index]).abs());
            *slot = best_value;
            policy[index] = best_action;
        }

        values = next_values;
        sweeps += 1;
    }

    // Greedy policy with respect to the final values.
    for (index, slot) in policy.iter_mut().enumerate() {
        *slot = best_action(mdp, &values, Observation::from(index), action_count, gamma)?.0;
    }

    let converged = max_delta <= tolerance;
    debug!(sweeps, max_delta, converged, "value iteration finished");

    Ok(ValueIterationResult {
        values,
        policy,
        sweeps,
        max_delta,
        converged,
    })
}

fn best_action<M: FiniteMdp + ?Sized>(
    mdp: &M,
    values: &[f64],
    observation: Observation,
    action_count: usize,
    gamma: f64,
) -> Result<(ActionId, f64), GridError> {
    if action_count == 0 {
        return Ok((ActionId::from(0), 0.0));
    }

    let mut best = (ActionId::from(0), f64::NEG_INFINITY);
    for action in 0..action_count {
        let action_id = ActionId::from(action);
        let reward = mdp.reward(observation, action_id)?;
        let mut expected_next = 0.0;
        for (next, prob) in mdp.outcomes(observation, action_id)? {
            let next_value = values
                .get(next.index())
                .copied()
                .ok_or(GridError::InvalidObservation {
                    observation: next,
                    observation_count: values.len(),
                })?;
            expected_next += prob * next_value;
        }
        let q = reward + gamma * expected_next;
        if q > best.1 {
            best = (action_id, q);
        }
    }
    Ok(best)
}
