use std::fmt;

use crate::grid::ids::{ActionId, Observation};

/// Error type for model lookups, episode stepping and model construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// An action index outside `[0, action_count)`.
    InvalidAction {
        action_id: ActionId,
        action_count: usize,
    },
    /// An observation outside `[0, observation_count)`.
    InvalidObservation {
        observation: Observation,
        observation_count: usize,
    },
    /// `step` was called before `reset`, or after the episode was closed.
    NotReady,
    /// Construction parameters were rejected.
    InvalidConfiguration { reason: String },
}

impl GridError {
    pub(crate) fn invalid_configuration(reason: impl Into<String>) -> Self {
        GridError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidAction {
                action_id,
                action_count,
            } => write!(
                f,
                "invalid action {} (expected an index in [0, {}))",
                action_id.index(),
                action_count
            ),
            GridError::InvalidObservation {
                observation,
                observation_count,
            } => write!(
                f,
                "invalid observation {} (expected an index in [0, {}))",
                observation.index(),
                observation_count
            ),
            GridError::NotReady => {
                write!(f, "episode is not ready; call reset before step")
            }
            GridError::InvalidConfiguration { reason } => {
                write!(f, "invalid grid configuration: {reason}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Error type for loading and validating a `GridConfig`.
#[derive(Debug)]
pub enum GridConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Invalid(GridError),
}

impl fmt::Display for GridConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridConfigError::Io(err) => write!(f, "failed to read config file: {err}"),
            GridConfigError::Yaml(err) => write!(f, "failed to parse config YAML: {err}"),
            GridConfigError::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for GridConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridConfigError::Io(err) => Some(err),
            GridConfigError::Yaml(err) => Some(err),
            GridConfigError::Invalid(err) => Some(err),
        }
    }
}

impl From<GridError> for GridConfigError {
    fn from(err: GridError) -> Self {
        GridConfigError::Invalid(err)
    }
}
