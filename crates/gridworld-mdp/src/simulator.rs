use gridworld_core::{ActionId, FiniteMdp, Observation, Trajectory, Transition};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::{TabularError, TabularMdp};

#[derive(Debug, Clone)]
/// Seeded simulator sampling the transition kernel of a compiled MDP.
pub struct TabularSimulator {
    mdp: TabularMdp,
    rng: ChaCha8Rng,
}

impl TabularSimulator {
    /// Create a simulator with deterministic RNG seed.
    pub fn new(mdp: TabularMdp, seed: u64) -> Self {
        Self {
            mdp,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Borrow the underlying compiled MDP.
    pub fn mdp(&self) -> &TabularMdp {
        &self.mdp
    }

    /// Sample one `(next_observation, reward)` transition.
    pub fn step(
        &mut self,
        observation: Observation,
        action_id: ActionId,
    ) -> Result<(Observation, f64), TabularError> {
        let sample = (self.rng.next_u64() as f64) / ((u64::MAX as f64) + 1.0);
        Ok(self.mdp.sample_transition(observation, action_id, sample)?)
    }

    /// Roll out `max_steps` transitions from the start observation under `policy`.
    pub fn run_episode<F>(
        &mut self,
        mut policy: F,
        max_steps: usize,
    ) -> Result<Trajectory, TabularError>
    where
        F: FnMut(Observation) -> ActionId,
    {
        let mut trajectory = Trajectory::new();
        let mut observation = self.mdp.initial_observation();

        for _ in 0..max_steps {
            let action = policy(observation);
            let (next, reward) = self.step(observation, action)?;
            trajectory.push(Transition {
                previous_observation: observation,
                observation: next,
                reward,
                action,
            });
            observation = next;
        }

        debug!(steps = trajectory.len(), "simulated episode");
        Ok(trajectory)
    }
}
