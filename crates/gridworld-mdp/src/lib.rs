mod compiled;
mod error;
mod export;
mod io;
mod simulator;
mod spec;

pub use compiled::TabularMdp;
pub use error::TabularError;
pub use io::{compile_yaml, load_yaml, save_grid_yaml, save_yaml};
pub use simulator::TabularSimulator;
pub use spec::{ActionSpec, ObservationSpec, OutcomeSpec, TabularSpec};
