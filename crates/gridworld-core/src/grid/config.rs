use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::grid::{
    error::{GridConfigError, GridError},
    ids::{Action, Position},
};

const DEFAULT_GRID_CONFIG_YAML: &str = include_str!("../../config/grid.default.yaml");

/// Construction parameters for a grid world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Edge length of the square grid.
    pub size: usize,
    /// Discount factor in `(0, 1]`.
    pub gamma: f64,
    pub reward_goal: f64,
    pub reward_other: f64,
    pub reward_forbidden: f64,
    pub reward_boundary: f64,
    /// Start cell, `(0, 0)` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_start: Option<Position>,
    /// Goal cell, `(size - 1, size - 1)` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_goal: Option<Position>,
    pub states_forbidden: Vec<Position>,
    /// Step count at which an episode is truncated.
    pub max_iter: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            size: 5,
            gamma: 0.9,
            reward_goal: 1.0,
            reward_other: 0.0,
            reward_forbidden: -1.0,
            reward_boundary: -1.0,
            state_start: None,
            state_goal: None,
            states_forbidden: Vec::new(),
            max_iter: 100,
        }
    }
}

impl GridConfig {
    /// Default parameters on a `size`×`size` grid.
    pub fn new(size: usize) -> Self {
        GridConfig {
            size,
            ..GridConfig::default()
        }
    }

    /// Parse a grid config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GridConfigError> {
        let config: GridConfig = serde_yaml::from_str(yaml).map_err(GridConfigError::Yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a grid config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, GridConfigError> {
        let yaml = fs::read_to_string(path).map_err(GridConfigError::Io)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_GRID_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, GridConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Serialize this config back to YAML.
    pub fn to_yaml(&self) -> Result<String, GridConfigError> {
        serde_yaml::to_string(self).map_err(GridConfigError::Yaml)
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set the goal, other, forbidden and boundary rewards in one call.
    pub fn with_rewards(mut self, goal: f64, other: f64, forbidden: f64, boundary: f64) -> Self {
        self.reward_goal = goal;
        self.reward_other = other;
        self.reward_forbidden = forbidden;
        self.reward_boundary = boundary;
        self
    }

    pub fn with_start(mut self, start: impl Into<Position>) -> Self {
        self.state_start = Some(start.into());
        self
    }

    pub fn with_goal(mut self, goal: impl Into<Position>) -> Self {
        self.state_goal = Some(goal.into());
        self
    }

    pub fn with_forbidden<I, P>(mut self, forbidden: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Position>,
    {
        self.states_forbidden = forbidden.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Start cell with the default applied.
    pub fn start(&self) -> Position {
        self.state_start.unwrap_or(Position::new(0, 0))
    }

    /// Goal cell with the default applied.
    pub fn goal(&self) -> Position {
        self.state_goal.unwrap_or_else(|| {
            let last = self.size.saturating_sub(1);
            Position::new(last, last)
        })
    }

    /// Check every construction invariant.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.size == 0 {
            return Err(GridError::invalid_configuration(
                "size must be greater than 0",
            ));
        }
        // Every (observation, action) pair gets a table slot.
        if self
            .size
            .checked_mul(self.size)
            .and_then(|n| n.checked_mul(Action::COUNT))
            .is_none()
        {
            return Err(GridError::invalid_configuration(format!(
                "size {} is too large to tabulate",
                self.size
            )));
        }
        if !self.gamma.is_finite() || self.gamma <= 0.0 || self.gamma > 1.0 {
            return Err(GridError::invalid_configuration(format!(
                "gamma must be in (0, 1], got {}",
                self.gamma
            )));
        }
        for (name, value) in [
            ("reward_goal", self.reward_goal),
            ("reward_other", self.reward_other),
            ("reward_forbidden", self.reward_forbidden),
            ("reward_boundary", self.reward_boundary),
        ] {
            if !value.is_finite() {
                return Err(GridError::invalid_configuration(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.max_iter == 0 {
            return Err(GridError::invalid_configuration(
                "max_iter must be greater than 0",
            ));
        }

        let start = self.start();
        if !start.in_bounds(self.size) {
            return Err(GridError::invalid_configuration(format!(
                "start {start} lies outside a {size}x{size} grid",
                size = self.size
            )));
        }
        let goal = self.goal();
        if !goal.in_bounds(self.size) {
            return Err(GridError::invalid_configuration(format!(
                "goal {goal} lies outside a {size}x{size} grid",
                size = self.size
            )));
        }
        if let Some(cell) = self
            .states_forbidden
            .iter()
            .find(|cell| !cell.in_bounds(self.size))
        {
            return Err(GridError::invalid_configuration(format!(
                "forbidden cell {cell} lies outside a {size}x{size} grid",
                size = self.size
            )));
        }

        Ok(())
    }
}
