use gridworld_core::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for tabular MDP loading, validation, compilation and simulation.
pub enum TabularError {
    #[error("failed to read YAML file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("model must declare at least one observation and one action")]
    EmptyModel,

    #[error("start observation {start} is outside [0, {observation_count})")]
    StartOutOfRange {
        start: usize,
        observation_count: usize,
    },

    #[error("observation {observation} is outside [0, {observation_count})")]
    ObservationOutOfRange {
        observation: usize,
        observation_count: usize,
    },

    #[error("observation {observation} is declared more than once")]
    DuplicateObservation { observation: usize },

    #[error("observation {observation} is never declared")]
    MissingObservation { observation: usize },

    #[error("observation {observation} declares action {action} outside [0, {action_count})")]
    ActionOutOfRange {
        observation: usize,
        action: usize,
        action_count: usize,
    },

    #[error("observation {observation} declares action {action} more than once")]
    DuplicateAction { observation: usize, action: usize },

    #[error("observation {observation} does not declare action {action}")]
    MissingAction { observation: usize, action: usize },

    #[error("observation {observation}, action {action} must contain at least one outcome")]
    EmptyOutcomes { observation: usize, action: usize },

    #[error("outcome of observation {observation}, action {action} references unknown next observation {next}")]
    UnknownNextObservation {
        observation: usize,
        action: usize,
        next: usize,
    },

    #[error(
        "invalid probability in observation {observation}, action {action}, outcome {outcome_index}: {value}"
    )]
    InvalidProbability {
        observation: usize,
        action: usize,
        outcome_index: usize,
        value: f64,
    },

    #[error("invalid reward in observation {observation}, action {action}: {value}")]
    InvalidReward {
        observation: usize,
        action: usize,
        value: f64,
    },

    #[error(
        "probability sum for observation {observation}, action {action} must be within {tolerance} of 1.0, got {sum}"
    )]
    ProbabilitySum {
        observation: usize,
        action: usize,
        sum: f64,
        tolerance: f64,
    },
}
