use crate::grid::{
    config::GridConfig,
    error::GridError,
    ids::{Action, ActionId, Observation, Position},
    mdp::FiniteMdp,
    model::GridWorldModel,
};

fn obs(model: &GridWorldModel, row: usize, col: usize) -> Observation {
    model.codec().encode(Position::new(row, col))
}

#[test]
fn corner_bump_stays_in_place_with_boundary_reward() {
    let model = GridWorldModel::new(&GridConfig::new(3).with_rewards(1.0, 0.0, -1.0, -2.0))
        .expect("valid config");
    let corner = obs(&model, 0, 0);

    for action in [Action::Up, Action::Left] {
        let next = model
            .transition(corner, action.into())
            .expect("valid lookup");
        let reward = model.reward(corner, action.into()).expect("valid lookup");

        assert_eq!(next, corner);
        assert!((reward - -2.0).abs() < f64::EPSILON);
    }
}

#[test]
fn stepping_onto_goal_earns_goal_reward() {
    let model =
        GridWorldModel::new(&GridConfig::new(2).with_goal((1, 1))).expect("valid config");
    let from = obs(&model, 0, 1);

    let next = model
        .transition(from, Action::Down.into())
        .expect("valid lookup");
    let reward = model
        .reward(from, Action::Down.into())
        .expect("valid lookup");

    assert_eq!(next, obs(&model, 1, 1));
    assert!((reward - 1.0).abs() < f64::EPSILON);
}

#[test]
fn stepping_onto_forbidden_cell_earns_forbidden_reward() {
    let model = GridWorldModel::new(
        &GridConfig::new(3)
            .with_rewards(1.0, 0.0, -5.0, -1.0)
            .with_forbidden([(1, 0)]),
    )
    .expect("valid config");
    let from = obs(&model, 0, 0);

    let next = model
        .transition(from, Action::Down.into())
        .expect("valid lookup");
    let reward = model
        .reward(from, Action::Down.into())
        .expect("valid lookup");

    assert_eq!(next, obs(&model, 1, 0));
    assert!((reward - -5.0).abs() < f64::EPSILON);
}

#[test]
fn plain_moves_and_stay_earn_the_baseline_reward() {
    let model = GridWorldModel::new(&GridConfig::new(3).with_rewards(1.0, 0.25, -1.0, -1.0))
        .expect("valid config");
    let centre = obs(&model, 1, 1);

    for action in Action::ALL {
        let reward = model.reward(centre, action.into()).expect("valid lookup");
        assert!((reward - 0.25).abs() < f64::EPSILON, "{action}");
    }
    assert_eq!(
        model
            .transition(centre, Action::Stay.into())
            .expect("valid lookup"),
        centre
    );
}

#[test]
fn wall_bump_overrides_goal_reward() {
    let model = GridWorldModel::new(
        &GridConfig::new(2)
            .with_goal((0, 0))
            .with_rewards(1.0, 0.0, -1.0, -2.0),
    )
    .expect("valid config");
    let goal = obs(&model, 0, 0);

    let bump = model.reward(goal, Action::Up.into()).expect("valid lookup");
    let stay = model
        .reward(goal, Action::Stay.into())
        .expect("valid lookup");

    assert!((bump - -2.0).abs() < f64::EPSILON);
    assert!((stay - 1.0).abs() < f64::EPSILON);
}

#[test]
fn forbidden_overrides_goal_on_the_same_cell() {
    let model = GridWorldModel::new(
        &GridConfig::new(2)
            .with_goal((1, 1))
            .with_forbidden([(1, 1)])
            .with_rewards(1.0, 0.0, -3.0, -1.0),
    )
    .expect("valid config");

    let reward = model
        .reward(obs(&model, 0, 1), Action::Down.into())
        .expect("valid lookup");

    assert!((reward - -3.0).abs() < f64::EPSILON);
}

#[test]
fn out_of_range_indices_are_rejected() {
    let model = GridWorldModel::new(&GridConfig::new(3)).expect("valid config");

    let err = model
        .transition(Observation::from(0), ActionId::from(5))
        .expect_err("action 5 does not exist");
    assert_eq!(
        err,
        GridError::InvalidAction {
            action_id: ActionId::from(5),
            action_count: 5,
        }
    );

    let err = model
        .reward(Observation::from(9), ActionId::from(0))
        .expect_err("observation 9 is off a 3x3 grid");
    assert_eq!(
        err,
        GridError::InvalidObservation {
            observation: Observation::from(9),
            observation_count: 9,
        }
    );
}

#[test]
fn transition_rows_are_one_hot() {
    let model = GridWorldModel::new(&GridConfig::new(3).with_forbidden([(1, 1)]))
        .expect("valid config");
    let table = model.transition_table();
    let from = obs(&model, 0, 1);

    assert!(table.is_deterministic());

    let dense = table
        .probabilities(from, Action::Down.into())
        .expect("row exists");
    assert_eq!(dense.len(), 9);
    assert_eq!(dense.iter().filter(|p| **p == 1.0).count(), 1);
    assert_eq!(dense[obs(&model, 1, 1).index()], 1.0);
    assert_eq!(
        table.probability(from, Action::Down.into(), from),
        Some(0.0)
    );
}

#[test]
fn geometry_reports_resolved_defaults() {
    let model = GridWorldModel::new(&GridConfig::new(4).with_forbidden([(2, 1), (2, 1)]))
        .expect("valid config");
    let geometry = model.geometry();

    assert_eq!(geometry.size, 4);
    assert_eq!(geometry.start, Position::new(0, 0));
    assert_eq!(geometry.goal, Position::new(3, 3));
    assert_eq!(geometry.forbidden, vec![Position::new(2, 1)]);
    assert_eq!(model.initial_observation(), Observation::from(0));
    assert_eq!(model.observation_count(), 16);
    assert_eq!(model.action_count(), 5);
}

#[test]
fn invalid_configuration_is_rejected_at_construction() {
    let err = GridWorldModel::new(&GridConfig::new(2).with_goal((2, 2)))
        .expect_err("goal is off the grid");

    assert!(matches!(err, GridError::InvalidConfiguration { .. }));
}

#[test]
fn single_cell_grid_bumps_on_every_move() {
    let model = GridWorldModel::new(&GridConfig::new(1)).expect("valid config");
    let only = Observation::from(0);

    for action in Action::ALL {
        assert_eq!(
            model.transition(only, action.into()).expect("valid lookup"),
            only
        );
    }
    // The goal defaults to the only cell, but every real move is a wall bump.
    let bump = model
        .reward(only, Action::Right.into())
        .expect("valid lookup");
    let stay = model
        .reward(only, Action::Stay.into())
        .expect("valid lookup");
    assert!((bump - -1.0).abs() < f64::EPSILON);
    assert!((stay - 1.0).abs() < f64::EPSILON);
}

#[test]
fn reward_table_lookups_reject_huge_observations() {
    let model = GridWorldModel::new(&GridConfig::new(3)).expect("valid config");
    let rewards = model.reward_table();

    assert_eq!(
        rewards.get(Observation::from(usize::MAX), ActionId::from(0)),
        None
    );
    assert_eq!(rewards.get(Observation::from(9), ActionId::from(0)), None);
    assert_eq!(rewards.row(Observation::from(usize::MAX)), None);
    assert_eq!(rewards.row(Observation::from(usize::MAX / 5)), None);
    assert_eq!(
        model
            .transition_table()
            .distribution(Observation::from(usize::MAX), ActionId::from(0)),
        None
    );
    assert!(matches!(
        model.reward(Observation::from(usize::MAX), ActionId::from(0)),
        Err(GridError::InvalidObservation { .. })
    ));
}
