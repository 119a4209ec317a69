use serde::Serialize;

use crate::grid::{model::Geometry, trajectory::Transition};

/// Point-in-time view of an episode for renderers and loggers.
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeSnapshot {
    pub step_count: usize,
    pub max_iter: usize,
    pub truncated: bool,
    pub geometry: Geometry,
    pub transitions: Vec<Transition>,
    pub discounted_return: f64,
}

impl EpisodeSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
