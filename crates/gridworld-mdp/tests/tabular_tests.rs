use gridworld_core::{
    Action, ActionId, EpisodeRunner, FiniteMdp, GridConfig, GridWorldModel, Observation,
    discounted_return, value_iteration,
};
use gridworld_mdp::{
    TabularError, TabularMdp, TabularSimulator, TabularSpec, compile_yaml, load_yaml, save_grid_yaml,
    save_yaml,
};

const SLIPPERY_YAML: &str = r#"
version: 1
observation_count: 2
action_count: 2
start: 0
observations:
  - observation: 0
    actions:
      - action: 0
        reward: 0.0
        outcomes:
          - next: 0
            prob: 1.0
      - action: 1
        name: slip
        reward: 1.0
        outcomes:
          - next: 1
            prob: 0.7
          - next: 0
            prob: 0.3
  - observation: 1
    actions:
      - action: 0
        reward: 0.0
        outcomes:
          - next: 1
            prob: 1.0
      - action: 1
        reward: -0.5
        outcomes:
          - next: 0
            prob: 1.0
"#;

fn slippery() -> TabularMdp {
    let spec: TabularSpec = serde_yaml::from_str(SLIPPERY_YAML).expect("valid yaml");
    spec.compile().expect("compile should succeed")
}

fn grid() -> GridWorldModel {
    GridWorldModel::new(
        &GridConfig::new(3)
            .with_forbidden([(1, 2), (2, 0)])
            .with_rewards(1.0, 0.0, -1.0, -1.0),
    )
    .expect("valid config")
}

#[test]
fn yaml_parse_and_compile_success() {
    let mdp = slippery();

    assert_eq!(mdp.observation_count(), 2);
    assert_eq!(mdp.action_count(), 2);
    assert_eq!(mdp.start(), Observation::from(0));
    assert!(!mdp.is_deterministic());

    // The most probable successor stands in for the deterministic lookup.
    let next = mdp
        .transition(Observation::from(0), ActionId::from(1))
        .expect("valid lookup");
    assert_eq!(next, Observation::from(1));
    let reward = mdp
        .reward(Observation::from(1), ActionId::from(1))
        .expect("valid lookup");
    assert!((reward - -0.5).abs() < f64::EPSILON);
}

#[test]
fn validation_fails_for_probability_sum() {
    let yaml = r#"
observation_count: 1
action_count: 1
start: 0
observations:
  - observation: 0
    actions:
      - action: 0
        reward: 0.0
        outcomes:
          - next: 0
            prob: 0.9
"#;

    let spec: TabularSpec = serde_yaml::from_str(yaml).expect("valid syntax");
    let err = spec.compile().expect_err("compile should fail");

    assert!(matches!(err, TabularError::ProbabilitySum { .. }));
}

#[test]
fn validation_fails_for_unknown_next_observation() {
    let yaml = r#"
observation_count: 1
action_count: 1
start: 0
observations:
  - observation: 0
    actions:
      - action: 0
        reward: 0.0
        outcomes:
          - next: 3
            prob: 1.0
"#;

    let spec: TabularSpec = serde_yaml::from_str(yaml).expect("valid syntax");
    let err = spec.compile().expect_err("compile should fail");

    assert!(matches!(
        err,
        TabularError::UnknownNextObservation { next: 3, .. }
    ));
}

#[test]
fn validation_requires_a_complete_table() {
    let mut spec: TabularSpec = serde_yaml::from_str(SLIPPERY_YAML).expect("valid syntax");
    spec.observations[1].actions.pop();
    let err = spec.validate().expect_err("action 1 is missing");
    assert!(matches!(
        err,
        TabularError::MissingAction {
            observation: 1,
            action: 1
        }
    ));

    let mut spec: TabularSpec = serde_yaml::from_str(SLIPPERY_YAML).expect("valid syntax");
    spec.observations[1].observation = 0;
    let err = spec.validate().expect_err("observation 0 is declared twice");
    assert!(matches!(
        err,
        TabularError::DuplicateObservation { observation: 0 }
    ));

    let mut spec: TabularSpec = serde_yaml::from_str(SLIPPERY_YAML).expect("valid syntax");
    spec.start = 2;
    let err = spec.validate().expect_err("start is out of range");
    assert!(matches!(err, TabularError::StartOutOfRange { .. }));
}

#[test]
fn grid_export_matches_the_model_everywhere() {
    let model = grid();
    let tabular = TabularMdp::from_grid(&model).expect("grid export compiles");

    assert!(tabular.is_deterministic());
    assert_eq!(tabular.start(), model.initial_observation());

    for observation in model.codec().observations() {
        for action in Action::ALL {
            let action_id = ActionId::from(action);
            assert_eq!(
                tabular.transition(observation, action_id).expect("lookup"),
                model.transition(observation, action_id).expect("lookup")
            );
            assert_eq!(
                tabular.reward(observation, action_id).expect("lookup"),
                model.reward(observation, action_id).expect("lookup")
            );
        }
    }

    let spec = TabularSpec::from_grid(&model);
    assert_eq!(spec.observations[0].actions[0].name.as_deref(), Some("up"));
}

#[test]
fn sampling_is_deterministic_for_fixed_seed() {
    let mut sim_a = TabularSimulator::new(slippery(), 42);
    let mut sim_b = TabularSimulator::new(slippery(), 42);

    let mut trace_a = Vec::new();
    let mut trace_b = Vec::new();

    for _ in 0..20 {
        trace_a.push(
            sim_a
                .step(Observation::from(0), ActionId::from(1))
                .expect("valid step"),
        );
        trace_b.push(
            sim_b
                .step(Observation::from(0), ActionId::from(1))
                .expect("valid step"),
        );
    }

    assert_eq!(trace_a, trace_b);
}

#[test]
fn sampled_frequencies_follow_the_kernel() {
    let mut simulator = TabularSimulator::new(slippery(), 7);
    let draws = 4_000;

    let landed = (0..draws)
        .filter(|_| {
            let (next, _) = simulator
                .step(Observation::from(0), ActionId::from(1))
                .expect("valid step");
            next == Observation::from(1)
        })
        .count();

    let frequency = landed as f64 / draws as f64;
    assert!((frequency - 0.7).abs() < 0.05, "frequency {frequency}");
}

#[test]
fn simulated_grid_episode_matches_the_episode_runner() {
    let model = grid();
    let plan = [Action::Right, Action::Right, Action::Down, Action::Down, Action::Stay];

    let mut runner = EpisodeRunner::new(&model, plan.len()).expect("valid runner");
    runner.reset();
    for action in plan {
        runner.step(action.into()).expect("step should succeed");
    }

    let mut simulator =
        TabularSimulator::new(TabularMdp::from_grid(&model).expect("compile"), 1);
    let mut cursor = plan.iter();
    let trajectory = simulator
        .run_episode(
            |_| ActionId::from(*cursor.next().unwrap_or(&Action::Stay)),
            plan.len(),
        )
        .expect("episode should run");

    assert_eq!(&trajectory, runner.trajectory());
    assert!(
        (discounted_return(trajectory.as_slice(), 0.9) - runner.discounted_return(0.9)).abs()
            < 1e-12
    );
}

#[test]
fn invalid_action_is_rejected_by_the_simulator() {
    let mut simulator = TabularSimulator::new(slippery(), 3);

    let err = simulator
        .step(Observation::from(0), ActionId::from(2))
        .expect_err("action 2 does not exist");

    assert!(matches!(err, TabularError::Grid(_)));
}

#[test]
fn solver_agrees_on_grid_and_tabular_forms() {
    let model = grid();
    let tabular = TabularMdp::from_grid(&model).expect("compile");

    let direct = value_iteration(&model, 0.9, 1e-10, 2_000).expect("solve grid");
    let via_table = value_iteration(&tabular, 0.9, 1e-10, 2_000).expect("solve table");

    assert_eq!(direct.policy, via_table.policy);
    for (a, b) in direct.values.iter().zip(&via_table.values) {
        assert!((a - b).abs() < 1e-9);
    }
}

#[test]
fn yaml_files_round_trip() {
    let model = grid();
    let spec = TabularSpec::from_grid(&model);
    let path = std::env::temp_dir().join(format!(
        "gridworld-mdp-roundtrip-{}.yaml",
        std::process::id()
    ));

    save_grid_yaml(&path, &model).expect("write yaml");
    let loaded = load_yaml(&path).expect("read yaml");
    let compiled = compile_yaml(&path).expect("compile yaml");

    let mut broken = spec.clone();
    broken.start = 99;
    let err = save_yaml(&path, &broken).expect_err("invalid spec must not be written");
    let reread = load_yaml(&path).expect("file left intact");
    let _ = std::fs::remove_file(&path);

    assert!(matches!(err, TabularError::StartOutOfRange { start: 99, .. }));
    assert_eq!(loaded, spec);
    assert_eq!(reread, spec);
    assert_eq!(compiled.observation_count(), 9);
}

#[test]
fn yaml_text_parses_without_validating() {
    let mut spec = TabularSpec::from_yaml_str(SLIPPERY_YAML).expect("valid syntax");
    assert_eq!(spec.version, Some(1));
    assert_eq!(
        TabularSpec::from_yaml_str(&spec.to_yaml().expect("serialize")).expect("reparse"),
        spec
    );

    spec.observations[0].actions[1].outcomes[0].prob = 0.2;
    let reparsed = TabularSpec::from_yaml_str(&serde_yaml::to_string(&spec).expect("serialize"))
        .expect("parsing skips validation");
    assert!(matches!(
        reparsed.to_yaml(),
        Err(TabularError::ProbabilitySum { .. })
    ));
    assert!(matches!(
        TabularSpec::from_yaml_str("observation_count: [1"),
        Err(TabularError::Yaml(_))
    ));
}

#[test]
fn solver_takes_expectations_over_stochastic_rows() {
    let yaml = r#"
observation_count: 2
action_count: 2
start: 0
observations:
  - observation: 0
    actions:
      - action: 0
        reward: 0.0
        outcomes:
          - next: 0
            prob: 1.0
      - action: 1
        reward: 0.0
        outcomes:
          - next: 1
            prob: 0.51
          - next: 0
            prob: 0.49
  - observation: 1
    actions:
      - action: 0
        reward: 1.0
        outcomes:
          - next: 1
            prob: 1.0
      - action: 1
        reward: 1.0
        outcomes:
          - next: 1
            prob: 1.0
"#;

    let spec: TabularSpec = serde_yaml::from_str(yaml).expect("valid syntax");
    let mdp = spec.compile().expect("compile should succeed");

    let row = mdp
        .outcomes(Observation::from(0), ActionId::from(1))
        .expect("valid lookup");
    assert_eq!(
        row,
        vec![(Observation::from(1), 0.51), (Observation::from(0), 0.49)]
    );

    let result = value_iteration(&mdp, 0.9, 1e-12, 10_000).expect("solve");
    assert!(result.converged);

    // V1 = 1 / (1 - 0.9); V0 = 0.9 * (0.51 * V1 + 0.49 * V0).
    let v1 = 10.0;
    let v0 = 0.9 * 0.51 * v1 / (1.0 - 0.9 * 0.49);
    assert!((result.values[1] - v1).abs() < 1e-6);
    assert!((result.values[0] - v0).abs() < 1e-6, "V0 = {}", result.values[0]);
    assert_eq!(result.policy[0], ActionId::from(1));
}
