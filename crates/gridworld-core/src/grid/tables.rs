use serde::Serialize;

use crate::grid::ids::{ActionId, Observation};

/// Mean reward for every `(observation, action)` pair, stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardTable {
    action_count: usize,
    values: Vec<f64>,
}

impl RewardTable {
    /// A table with every entry set to `fill`.
    pub(crate) fn filled(observation_count: usize, action_count: usize, fill: f64) -> Self {
        RewardTable {
            action_count,
            values: vec![fill; observation_count * action_count],
        }
    }

    /// Wrap observation-major rewards; `None` when the length does not match the shape.
    pub fn from_values(
        observation_count: usize,
        action_count: usize,
        values: Vec<f64>,
    ) -> Option<Self> {
        let expected = observation_count.checked_mul(action_count)?;
        (values.len() == expected).then_some(RewardTable {
            action_count,
            values,
        })
    }

    pub(crate) fn set(&mut self, observation: Observation, action_id: ActionId, reward: f64) {
        let slot = self.slot(observation, action_id);
        self.values[slot] = reward;
    }

    /// Reward for a pair, `None` when either index is out of range.
    pub fn get(&self, observation: Observation, action_id: ActionId) -> Option<f64> {
        if action_id.index() >= self.action_count
            || observation.index() >= self.observation_count()
        {
            return None;
        }
        self.values
            .get(self.slot(observation, action_id))
            .copied()
    }

    /// All rewards for one observation, indexed by action.
    pub fn row(&self, observation: Observation) -> Option<&[f64]> {
        let start = observation.index().checked_mul(self.action_count)?;
        let end = start.checked_add(self.action_count)?;
        self.values.get(start..end)
    }

    pub fn observation_count(&self) -> usize {
        if self.action_count == 0 {
            0
        } else {
            self.values.len() / self.action_count
        }
    }

    pub fn action_count(&self) -> usize {
        self.action_count
    }

    /// Callers check both indices first, so the arithmetic stays within `values.len()`.
    fn slot(&self, observation: Observation, action_id: ActionId) -> usize {
        observation.index() * self.action_count + action_id.index()
    }
}

/// One entry of a transition distribution.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub next: Observation,
    pub prob: f64,
}

/// Sparse distribution over next observations with its precomputed CDF.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct Distribution {
    outcomes: Vec<Outcome>,
    #[serde(skip)]
    cdf: Vec<f64>,
}

impl Distribution {
    fn new(outcomes: Vec<Outcome>) -> Self {
        let mut cumulative = 0.0_f64;
        let cdf = outcomes
            .iter()
            .map(|outcome| {
                cumulative += outcome.prob;
                cumulative
            })
            .collect();
        Distribution { outcomes, cdf }
    }
}

/// Next-observation distribution for every `(observation, action)` pair.
///
/// Rows are stored sparsely: a one-hot row holds a single outcome with probability 1.0,
/// a stochastic row holds every successor with non-zero mass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionTable {
    observation_count: usize,
    action_count: usize,
    rows: Vec<Distribution>,
}

impl TransitionTable {
    /// Build a table from rows laid out observation-major, `observation_count * action_count` long.
    /// Returns `None` when the row count does not match the declared shape.
    pub fn from_rows(
        observation_count: usize,
        action_count: usize,
        rows: Vec<Vec<Outcome>>,
    ) -> Option<Self> {
        if Some(rows.len()) != observation_count.checked_mul(action_count) {
            return None;
        }
        Some(TransitionTable {
            observation_count,
            action_count,
            rows: rows.into_iter().map(Distribution::new).collect(),
        })
    }

    pub fn observation_count(&self) -> usize {
        self.observation_count
    }

    pub fn action_count(&self) -> usize {
        self.action_count
    }

    /// Non-zero outcomes of a row.
    pub fn distribution(&self, observation: Observation, action_id: ActionId) -> Option<&[Outcome]> {
        self.row(observation, action_id)
            .map(|row| row.outcomes.as_slice())
    }

    /// Probability of landing on `next`.
    pub fn probability(
        &self,
        observation: Observation,
        action_id: ActionId,
        next: Observation,
    ) -> Option<f64> {
        let row = self.row(observation, action_id)?;
        Some(
            row.outcomes
                .iter()
                .filter(|outcome| outcome.next == next)
                .map(|outcome| outcome.prob)
                .sum(),
        )
    }

    /// Dense probability vector of length `observation_count`.
    pub fn probabilities(&self, observation: Observation, action_id: ActionId) -> Option<Vec<f64>> {
        let row = self.row(observation, action_id)?;
        let mut dense = vec![0.0; self.observation_count];
        for outcome in &row.outcomes {
            if let Some(slot) = dense.get_mut(outcome.next.index()) {
                *slot += outcome.prob;
            }
        }
        Some(dense)
    }

    /// Most probable successor; the first one listed wins ties.
    /// For a one-hot row this is the only successor.
    pub fn most_likely(&self, observation: Observation, action_id: ActionId) -> Option<Observation> {
        let row = self.row(observation, action_id)?;
        row.outcomes
            .iter()
            .fold(None::<&Outcome>, |best, outcome| match best {
                Some(best) if best.prob >= outcome.prob => Some(best),
                _ => Some(outcome),
            })
            .map(|outcome| outcome.next)
    }

    /// Sample a successor from a uniform number in `[0, 1)` using the row CDF.
    pub fn sample(
        &self,
        observation: Observation,
        action_id: ActionId,
        sample: f64,
    ) -> Option<Observation> {
        let row = self.row(observation, action_id)?;
        if row.outcomes.is_empty() {
            return None;
        }

        let mut chosen_idx = row.cdf.partition_point(|p| *p <= sample);
        if chosen_idx >= row.outcomes.len() {
            chosen_idx = row.outcomes.len() - 1;
        }
        Some(row.outcomes[chosen_idx].next)
    }

    /// Whether every row assigns probability 1.0 to a single successor.
    pub fn is_deterministic(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.outcomes.len() == 1 && row.outcomes[0].prob == 1.0)
    }

    fn row(&self, observation: Observation, action_id: ActionId) -> Option<&Distribution> {
        if observation.index() >= self.observation_count || action_id.index() >= self.action_count {
            return None;
        }
        self.rows
            .get(observation.index() * self.action_count + action_id.index())
    }
}
