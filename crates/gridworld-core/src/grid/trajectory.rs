use serde::Serialize;

use crate::grid::ids::{Action, ActionId, Observation};

/// One logged step: where the agent was, where it landed, what it earned and what it did.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub previous_observation: Observation,
    pub observation: Observation,
    pub reward: f64,
    pub action: ActionId,
}

/// Append-only log of an episode's transitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trajectory {
    transitions: Vec<Transition>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    pub(crate) fn clear(&mut self) {
        self.transitions.clear();
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn as_slice(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transition> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&Transition> {
        self.transitions.last()
    }

    /// Rewards in recorded order.
    pub fn rewards(&self) -> impl Iterator<Item = f64> + '_ {
        self.transitions.iter().map(|t| t.reward)
    }

    /// Plain-text rendering of the walk:
    /// `||s_0=0, r_0=0.0||  --a_0=right--> ||s_1=1, r_1=0.0||  ...`
    pub fn ascii_trace(&self) -> String {
        let Some(first) = self.transitions.first() else {
            return String::new();
        };

        let mut trace = format!("||s_0={}, r_0=0.0||", first.previous_observation);
        for (step, transition) in self.transitions.iter().enumerate() {
            let action = Action::from_id(transition.action)
                .map(|action| action.name().to_string())
                .unwrap_or_else(|| transition.action.to_string());
            trace.push_str(&format!(
                "  --a_{step}={action}--> ||s_{}={}, r_{}={:?}||",
                step + 1,
                transition.observation,
                step + 1,
                transition.reward
            ));
        }
        trace
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Transition;
    type IntoIter = std::slice::Iter<'a, Transition>;

    fn into_iter(self) -> Self::IntoIter {
        self.transitions.iter()
    }
}

impl From<Vec<Transition>> for Trajectory {
    fn from(transitions: Vec<Transition>) -> Self {
        Trajectory { transitions }
    }
}
