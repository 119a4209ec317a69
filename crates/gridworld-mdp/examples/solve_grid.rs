use std::path::PathBuf;

use gridworld_core::{ActionId, EpisodeRunner, GridConfig, GridWorldModel, value_iteration};
use gridworld_mdp::{TabularMdp, TabularSimulator};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => GridConfig::from_yaml_path(&path).expect("failed to load grid config"),
        None => GridConfig::new(3)
            .with_forbidden([(1, 2), (2, 0)])
            .with_max_iter(6),
    };

    let model = GridWorldModel::new(&config).expect("failed to build grid world");
    let solution =
        value_iteration(&model, config.gamma, 1e-9, 10_000).expect("value iteration failed");

    let mut runner = EpisodeRunner::from_model(&model);
    let mut observation = runner.reset();
    loop {
        let action = solution
            .action(observation)
            .expect("policy covers every observation");
        let step = runner.step(action).expect("step failed");
        observation = step.observation;
        if step.terminated || step.truncated {
            break;
        }
    }

    println!("{}", runner.trajectory().ascii_trace());
    println!(
        "discounted_return={:.6} sweeps={}",
        runner.discounted_return(config.gamma),
        solution.sweeps
    );

    let mut simulator = TabularSimulator::new(
        TabularMdp::from_grid(&model).expect("grid export failed"),
        12345,
    );
    let sampled = simulator
        .run_episode(
            |obs| solution.action(obs).unwrap_or(ActionId::from(0)),
            config.max_iter,
        )
        .expect("simulation failed");
    println!("sampled_steps={}", sampled.len());

    let snapshot = runner.snapshot(config.gamma);
    println!(
        "{}",
        snapshot.to_json_pretty().expect("snapshot serialization failed")
    );
}
