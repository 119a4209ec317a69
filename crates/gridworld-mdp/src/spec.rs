use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{TabularError, TabularMdp, compiled::PROB_TOLERANCE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Serializable finite-MDP schema with a possibly stochastic transition kernel.
pub struct TabularSpec {
    /// Schema version for future compatibility checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    pub observation_count: usize,
    pub action_count: usize,
    /// Observation every episode starts from.
    pub start: usize,
    /// One entry per observation, each listing every action.
    pub observations: Vec<ObservationSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationSpec {
    pub observation: usize,
    pub actions: Vec<ActionSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Mean reward and successor distribution of one `(observation, action)` pair.
pub struct ActionSpec {
    pub action: usize,
    /// Human-readable label, ignored by compilation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub reward: f64,
    pub outcomes: Vec<OutcomeSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSpec {
    pub next: usize,
    pub prob: f64,
}

impl TabularSpec {
    /// Parse a spec from YAML text. Validation is left to `validate` or `compile`.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, TabularError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Validate, then serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, TabularError> {
        self.validate()?;
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate schema invariants using the crate default tolerance.
    pub fn validate(&self) -> Result<(), TabularError> {
        self.validate_with_tolerance(PROB_TOLERANCE)
    }

    /// Validate shape, completeness, and probability constraints.
    pub fn validate_with_tolerance(&self, tolerance: f64) -> Result<(), TabularError> {
        if self.observation_count == 0 || self.action_count == 0 {
            return Err(TabularError::EmptyModel);
        }
        if self.start >= self.observation_count {
            return Err(TabularError::StartOutOfRange {
                start: self.start,
                observation_count: self.observation_count,
            });
        }

        let mut declared = HashSet::with_capacity(self.observations.len());
        for entry in &self.observations {
            let observation = entry.observation;
            if observation >= self.observation_count {
                return Err(TabularError::ObservationOutOfRange {
                    observation,
                    observation_count: self.observation_count,
                });
            }
            if !declared.insert(observation) {
                return Err(TabularError::DuplicateObservation { observation });
            }

            let mut actions = HashSet::with_capacity(entry.actions.len());
            for spec in &entry.actions {
                let action = spec.action;
                if action >= self.action_count {
                    return Err(TabularError::ActionOutOfRange {
                        observation,
                        action,
                        action_count: self.action_count,
                    });
                }
                if !actions.insert(action) {
                    return Err(TabularError::DuplicateAction {
                        observation,
                        action,
                    });
                }
                if !spec.reward.is_finite() {
                    return Err(TabularError::InvalidReward {
                        observation,
                        action,
                        value: spec.reward,
                    });
                }
                if spec.outcomes.is_empty() {
                    return Err(TabularError::EmptyOutcomes {
                        observation,
                        action,
                    });
                }

                let mut sum = 0.0_f64;
                for (outcome_index, outcome) in spec.outcomes.iter().enumerate() {
                    if !outcome.prob.is_finite() || outcome.prob < 0.0 {
                        return Err(TabularError::InvalidProbability {
                            observation,
                            action,
                            outcome_index,
                            value: outcome.prob,
                        });
                    }
                    if outcome.next >= self.observation_count {
                        return Err(TabularError::UnknownNextObservation {
                            observation,
                            action,
                            next: outcome.next,
                        });
                    }
                    sum += outcome.prob;
                }

                if (sum - 1.0).abs() > tolerance {
                    return Err(TabularError::ProbabilitySum {
                        observation,
                        action,
                        sum,
                        tolerance,
                    });
                }
            }

            // Every action has to be defined in every observation.
            if let Some(action) = (0..self.action_count).find(|a| !actions.contains(a)) {
                return Err(TabularError::MissingAction {
                    observation,
                    action,
                });
            }
        }

        if let Some(observation) = (0..self.observation_count).find(|o| !declared.contains(o)) {
            return Err(TabularError::MissingObservation { observation });
        }

        Ok(())
    }

    /// Compile this spec into the runtime representation.
    pub fn compile(&self) -> Result<TabularMdp, TabularError> {
        TabularMdp::from_spec(self)
    }
}
