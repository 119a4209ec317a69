use gridworld_core::{Action, ActionId, FiniteMdp, GridWorldModel};

use crate::{ActionSpec, ObservationSpec, OutcomeSpec, TabularSpec};

impl TabularSpec {
    /// Describe a grid world's reward and transition tables in the tabular schema.
    pub fn from_grid(model: &GridWorldModel) -> TabularSpec {
        let rewards = model.reward_table();
        let transitions = model.transition_table();

        let observations = model
            .codec()
            .observations()
            .map(|observation| ObservationSpec {
                observation: observation.index(),
                actions: Action::ALL
                    .iter()
                    .map(|action| {
                        let action_id = ActionId::from(*action);
                        ActionSpec {
                            action: action.index(),
                            name: Some(action.name().to_string()),
                            reward: rewards.get(observation, action_id).unwrap_or_default(),
                            outcomes: transitions
                                .distribution(observation, action_id)
                                .unwrap_or_default()
                                .iter()
                                .map(|outcome| OutcomeSpec {
                                    next: outcome.next.index(),
                                    prob: outcome.prob,
                                })
                                .collect(),
                        }
                    })
                    .collect(),
            })
            .collect();

        TabularSpec {
            version: Some(1),
            observation_count: model.observation_count(),
            action_count: model.action_count(),
            start: model.initial_observation().index(),
            observations,
        }
    }
}
