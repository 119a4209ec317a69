use std::{fs, path::Path};

use gridworld_core::GridWorldModel;
use tracing::debug;

use crate::{TabularError, TabularMdp, TabularSpec};

/// Read a tabular spec from a YAML file without validating it.
pub fn load_yaml(path: impl AsRef<Path>) -> Result<TabularSpec, TabularError> {
    let path = path.as_ref();
    let spec = TabularSpec::from_yaml_str(&fs::read_to_string(path)?)?;
    debug!(
        path = %path.display(),
        observations = spec.observation_count,
        actions = spec.action_count,
        "loaded tabular spec"
    );
    Ok(spec)
}

/// Read, validate and compile a tabular MDP in one go.
pub fn compile_yaml(path: impl AsRef<Path>) -> Result<TabularMdp, TabularError> {
    load_yaml(path)?.compile()
}

/// Write `spec` as YAML. Invalid specs are refused before the file is touched.
pub fn save_yaml(path: impl AsRef<Path>, spec: &TabularSpec) -> Result<(), TabularError> {
    let path = path.as_ref();
    fs::write(path, spec.to_yaml()?)?;
    debug!(path = %path.display(), "saved tabular spec");
    Ok(())
}

/// Export a grid world's one-hot kernel and reward table as a tabular YAML file.
pub fn save_grid_yaml(path: impl AsRef<Path>, model: &GridWorldModel) -> Result<(), TabularError> {
    save_yaml(path, &TabularSpec::from_grid(model))
}
