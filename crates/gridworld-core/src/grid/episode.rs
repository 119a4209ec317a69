use tracing::{debug, trace};

use crate::grid::{
    error::GridError,
    ids::{ActionId, Observation},
    mdp::FiniteMdp,
    model::GridWorldModel,
    returns::discounted_return,
    snapshot::EpisodeSnapshot,
    trajectory::{Trajectory, Transition},
};

/// Where an episode runner currently stands.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EpisodePhase {
    /// Constructed, `reset` not called yet.
    Uninitialized,
    /// Accepting steps, truncation bound not reached.
    Ready,
    /// `step_count >= max_iter`. Further steps are still accepted.
    Truncated,
    /// Closed by the caller; needs `reset` before stepping again.
    Closed,
}

/// Extra per-step data returned alongside the transition.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StepInfo {
    pub step_count: usize,
    pub previous_observation: Observation,
}

/// Result of a single `step`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f64,
    /// Always `false`: reaching the goal does not end the episode.
    pub terminated: bool,
    pub truncated: bool,
    pub info: StepInfo,
}

/// Episodic step/reset driver over a finite MDP, logging every transition.
///
/// The runner borrows its model, so the model is fully built before any episode starts
/// and stays immutable for the runner's lifetime.
#[derive(Debug, Clone)]
pub struct EpisodeRunner<'m, M: FiniteMdp = GridWorldModel> {
    model: &'m M,
    max_iter: usize,
    current: Observation,
    step_count: usize,
    trajectory: Trajectory,
    ready: bool,
    phase: EpisodePhase,
}

impl<'m, M: FiniteMdp> EpisodeRunner<'m, M> {
    /// Create a runner truncating episodes after `max_iter` steps.
    pub fn new(model: &'m M, max_iter: usize) -> Result<Self, GridError> {
        if max_iter == 0 {
            return Err(GridError::InvalidConfiguration {
                reason: "max_iter must be greater than 0".to_string(),
            });
        }

        Ok(EpisodeRunner {
            model,
            max_iter,
            current: model.initial_observation(),
            step_count: 0,
            trajectory: Trajectory::new(),
            ready: false,
            phase: EpisodePhase::Uninitialized,
        })
    }

    /// Start a fresh episode and return the start observation.
    pub fn reset(&mut self) -> Observation {
        self.step_count = 0;
        self.trajectory.clear();
        self.current = self.model.initial_observation();
        self.ready = true;
        self.phase = EpisodePhase::Ready;

        debug!(start = self.current.index(), "episode reset");
        self.current
    }

    /// Advance the episode by one action.
    pub fn step(&mut self, action_id: ActionId) -> Result<StepResult, GridError> {
        if !self.ready {
            return Err(GridError::NotReady);
        }

        let previous = self.current;
        let observation = self.model.transition(previous, action_id)?;
        let reward = self.model.reward(previous, action_id)?;

        self.trajectory.push(Transition {
            previous_observation: previous,
            observation,
            reward,
            action: action_id,
        });
        self.step_count += 1;
        self.current = observation;

        let truncated = self.step_count >= self.max_iter;
        if truncated && self.phase == EpisodePhase::Ready {
            self.phase = EpisodePhase::Truncated;
            debug!(steps = self.step_count, "episode truncated");
        }
        trace!(
            step = self.step_count,
            from = previous.index(),
            to = observation.index(),
            action = action_id.index(),
            reward,
            "episode step"
        );

        Ok(StepResult {
            observation,
            reward,
            terminated: false,
            truncated,
            info: StepInfo {
                step_count: self.step_count,
                previous_observation: previous,
            },
        })
    }

    /// Stop accepting steps until the next `reset`. The trajectory is kept for inspection.
    pub fn close(&mut self) {
        self.ready = false;
        self.phase = EpisodePhase::Closed;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    pub fn current_observation(&self) -> Observation {
        self.current
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn model(&self) -> &'m M {
        self.model
    }

    /// Discounted return of the current trajectory.
    pub fn discounted_return(&self, gamma: f64) -> f64 {
        discounted_return(self.trajectory.as_slice(), gamma)
    }
}

impl<'m> EpisodeRunner<'m, GridWorldModel> {
    /// Runner truncating at the `max_iter` the grid was configured with.
    pub fn from_model(model: &'m GridWorldModel) -> Self {
        EpisodeRunner {
            model,
            max_iter: model.max_iter(),
            current: model.initial_observation(),
            step_count: 0,
            trajectory: Trajectory::new(),
            ready: false,
            phase: EpisodePhase::Uninitialized,
        }
    }

    /// Capture geometry and trajectory for an external renderer.
    pub fn snapshot(&self, gamma: f64) -> EpisodeSnapshot {
        EpisodeSnapshot {
            step_count: self.step_count,
            max_iter: self.max_iter,
            truncated: self.step_count >= self.max_iter,
            geometry: self.model.geometry().clone(),
            transitions: self.trajectory.as_slice().to_vec(),
            discounted_return: self.discounted_return(gamma),
        }
    }
}
